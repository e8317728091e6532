//! SQLite storage backend
//!
//! Keeps a graph snapshot in a single `triples` table so repeated offline
//! runs do not have to re-parse the snapshot. Insertion order (rowid) gives
//! the first-match order for entity lookups.

use super::mint::{IdentifierMinter, MintStrategy};
use super::traits::{GraphStore, OpenStore, StorageError, StorageResult};
use crate::graph::vocab::{rdf, xsd};
use crate::graph::{ntriples, Iri, Literal, Term, Triple};
use crate::query::{EntityQuery, ValueQuery};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;

const KIND_IRI: i64 = 0;
const KIND_LITERAL: i64 = 1;

/// SQLite-backed graph store
///
/// Thread-safe via internal mutex on the connection.
pub struct SqliteGraph {
    conn: Mutex<Connection>,
    minter: IdentifierMinter,
}

impl SqliteGraph {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS triples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject TEXT NOT NULL,
                predicate TEXT NOT NULL,
                object TEXT NOT NULL,
                object_kind INTEGER NOT NULL,
                datatype TEXT NOT NULL DEFAULT '',
                language TEXT NOT NULL DEFAULT '',
                UNIQUE (subject, predicate, object, object_kind, datatype, language)
            );

            -- Entity lookups go predicate + literal value first
            CREATE INDEX IF NOT EXISTS idx_triples_po
                ON triples(predicate, object);
            CREATE INDEX IF NOT EXISTS idx_triples_sp
                ON triples(subject, predicate);
            CREATE INDEX IF NOT EXISTS idx_triples_object
                ON triples(object, object_kind);
            "#,
        )?;
        Ok(())
    }

    fn with_connection(conn: Connection, namespace: &str, strategy: MintStrategy) -> StorageResult<Self> {
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            minter: IdentifierMinter::new(namespace, strategy),
        })
    }

    /// Insert triples, ignoring ones already present. Returns rows inserted.
    pub fn insert_triples<'a>(&self, triples: impl IntoIterator<Item = &'a Triple>) -> StorageResult<usize> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO triples (subject, predicate, object, object_kind, datatype, language)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )?;
            for triple in triples {
                let (object, kind, datatype, language) = object_to_row(&triple.object);
                inserted += stmt.execute(params![
                    triple.subject.as_str(),
                    triple.predicate.as_str(),
                    object,
                    kind,
                    datatype,
                    language,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Load an N-Triples snapshot into the store
    pub fn import_ntriples(&self, text: &str) -> StorageResult<usize> {
        let triples = ntriples::parse_document(text)?;
        self.insert_triples(&triples)
    }

    /// Open an existing store without creating or modifying anything.
    ///
    /// Runs read through this: a missing file or a database without a
    /// `triples` table is an error rather than an empty graph.
    pub fn open_read_only(path: impl AsRef<Path>, namespace: &str) -> StorageResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StorageError::MissingStore(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let has_triples: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'triples')",
            [],
            |row| row.get(0),
        )?;
        if !has_triples {
            return Err(StorageError::NotAGraphStore(path.to_path_buf()));
        }
        Ok(Self {
            conn: Mutex::new(conn),
            minter: IdentifierMinter::new(namespace, MintStrategy::Random),
        })
    }

    /// Total number of stored triples
    pub fn count(&self) -> StorageResult<usize> {
        let conn = self.conn.lock().unwrap();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM triples", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

fn object_to_row(term: &Term) -> (&str, i64, &str, &str) {
    match term {
        Term::Iri(iri) => (iri.as_str(), KIND_IRI, "", ""),
        Term::Literal(lit) => (
            lit.lexical.as_str(),
            KIND_LITERAL,
            lit.datatype.as_ref().map(Iri::as_str).unwrap_or(""),
            lit.language.as_deref().unwrap_or(""),
        ),
    }
}

fn row_to_object(object: String, kind: i64, datatype: String, language: String) -> Term {
    if kind == KIND_IRI {
        return Term::Iri(Iri::new(object));
    }
    Term::Literal(Literal {
        lexical: object,
        datatype: (!datatype.is_empty()).then(|| Iri::new(datatype)),
        language: (!language.is_empty()).then_some(language),
    })
}

impl OpenStore for SqliteGraph {
    fn open(path: impl AsRef<Path>, namespace: &str) -> StorageResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn, namespace, MintStrategy::Random)
    }

    fn open_in_memory(namespace: &str) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, namespace, MintStrategy::Sequential)
    }
}

impl GraphStore for SqliteGraph {
    fn find_entity(&self, query: &EntityQuery) -> StorageResult<Option<Iri>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT v.subject FROM triples v
            WHERE v.predicate = ?1
              AND v.object = ?2
              AND v.object_kind = ?3
              AND v.language = ''
              AND (v.datatype = '' OR v.datatype = ?4)
              AND EXISTS (
                  SELECT 1 FROM triples t
                  WHERE t.subject = v.subject
                    AND t.predicate = ?5
                    AND t.object = ?6
                    AND t.object_kind = ?7
              )
            ORDER BY v.id
            LIMIT 1
            "#,
        )?;
        let mut rows = stmt.query(params![
            query.predicate.as_str(),
            query.value,
            KIND_LITERAL,
            xsd::STRING,
            rdf::TYPE,
            query.entity_type.as_str(),
            KIND_IRI,
        ])?;
        match rows.next()? {
            Some(row) => Ok(Some(Iri::new(row.get::<_, String>(0)?))),
            None => Ok(None),
        }
    }

    fn values(&self, query: &ValueQuery) -> StorageResult<Vec<Term>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT object, object_kind, datatype, language FROM triples
            WHERE subject = ?1 AND predicate = ?2
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map(params![query.subject.as_str(), query.predicate.as_str()], |row| {
            Ok(row_to_object(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?;
        let mut terms = Vec::new();
        for term in rows {
            terms.push(term?);
        }
        Ok(terms)
    }

    fn is_in_use(&self, iri: &Iri) -> StorageResult<bool> {
        let conn = self.conn.lock().unwrap();
        let used: bool = conn.query_row(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM triples
                WHERE subject = ?1 OR (object = ?1 AND object_kind = ?2)
            )
            "#,
            params![iri.as_str(), KIND_IRI],
            |row| row.get(0),
        )?;
        Ok(used)
    }

    fn mint_identifier(&self) -> StorageResult<Iri> {
        self.minter.mint(|iri| self.is_in_use(iri))
    }
}
