//! Row orchestrator
//!
//! Drives one respondent row through identity verification, then through
//! every property and group handler in a fixed order. A row's triples are
//! collected separately and only merged into the run once the row completes.

use super::composite::CompositeRecord;
use super::layout::{self, SurveyLayout};
use super::patent::PatentRegistry;
use super::row::Row;
use crate::codes::{CodeLookup, GeoTable};
use crate::diff::{diff_scalar, DiffAccumulator, ExceptionRecord, RejectReason};
use crate::graph::vocab::{foaf, rdf, skos, ufv, vivo};
use crate::graph::{Iri, Term, Triple};
use crate::resolve::EntityResolver;
use crate::storage::{GraphStore, StorageResult};
use tracing::{debug, info, warn};

/// Outcome of identity verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Verified(Iri),
    Rejected(RejectReason),
}

pub struct RowOrchestrator<'a> {
    store: &'a dyn GraphStore,
    resolver: EntityResolver<'a>,
    layout: &'a SurveyLayout,
    geo: &'a GeoTable,
    registry: &'a dyn PatentRegistry,
}

impl<'a> RowOrchestrator<'a> {
    pub fn new(
        store: &'a dyn GraphStore,
        layout: &'a SurveyLayout,
        geo: &'a GeoTable,
        registry: &'a dyn PatentRegistry,
    ) -> Self {
        Self {
            store,
            resolver: EntityResolver::new(store),
            layout,
            geo,
            registry,
        }
    }

    /// Process rows in ascending row-number order
    pub fn process_all<'r>(&self, rows: impl IntoIterator<Item = &'r Row>) -> DiffAccumulator {
        let mut rows: Vec<&Row> = rows.into_iter().collect();
        rows.sort_by_key(|row| row.number());

        let mut run = DiffAccumulator::new();
        for row in rows {
            run.absorb(self.process_row(row));
        }
        info!(
            rows = run.rows_absorbed(),
            add = run.add_set().len(),
            sub = run.sub_set().len(),
            exceptions = run.exceptions().len(),
            "survey processed"
        );
        run
    }

    /// Process one row. The returned accumulator holds either the row's
    /// triples or a single exception record, never both.
    pub fn process_row(&self, row: &Row) -> DiffAccumulator {
        let ufid = row.field(layout::UFID);
        let result = self.verify(row).and_then(|identity| match identity {
            Identity::Verified(subject) => {
                let mut acc = DiffAccumulator::new();
                self.apply_handlers(&subject, row, &mut acc)?;
                Ok(acc)
            }
            Identity::Rejected(reason) => {
                let mut acc = DiffAccumulator::new();
                acc.reject(ExceptionRecord::new(row.number(), ufid, reason));
                Ok(acc)
            }
        });

        match result {
            Ok(acc) => {
                for record in acc.exceptions() {
                    warn!(row = record.row, ufid = %record.identifier, reason = %record.reason, "row skipped");
                }
                acc
            }
            Err(e) => {
                warn!(row = row.number(), ufid, error = %e, "row skipped after failed lookup");
                let mut acc = DiffAccumulator::new();
                acc.reject(ExceptionRecord::new(
                    row.number(),
                    ufid,
                    RejectReason::LookupFailed(e.to_string()),
                ));
                acc
            }
        }
    }

    /// Resolve the respondent by identifier and cross-check the last name
    pub fn verify(&self, row: &Row) -> StorageResult<Identity> {
        let ufid = row.field(layout::UFID);
        let Some(subject) = self.resolver.resolve(ufv::CURRENT_ENTITY, ufv::UFID, ufid)? else {
            return Ok(Identity::Rejected(RejectReason::IdentifierNotFound));
        };

        let survey_name = row.field(layout::LAST_NAME);
        let graph_name = self.resolver.current_value(&subject, foaf::LAST_NAME)?;
        match graph_name {
            Some(name) if name.lexical() == survey_name => {
                debug!(row = row.number(), subject = %subject, "identity verified");
                Ok(Identity::Verified(subject))
            }
            other => Ok(Identity::Rejected(RejectReason::NameMismatch {
                graph_name: other.map(|t| t.lexical().to_string()),
                survey_name: survey_name.to_string(),
            })),
        }
    }

    fn apply_handlers(&self, subject: &Iri, row: &Row, acc: &mut DiffAccumulator) -> StorageResult<()> {
        self.scalar(subject, vivo::ERA_COMMONS_ID, row.field(layout::ERA_COMMONS_ID), acc)?;

        for cols in self.layout.awards() {
            if let Some(record) = CompositeRecord::award(row, cols, &self.resolver)? {
                record.emit(subject, self.store, acc)?;
            }
        }
        for cols in self.layout.degrees() {
            if let Some(record) = CompositeRecord::degree(row, cols, &self.resolver)? {
                record.emit(subject, self.store, acc)?;
            }
        }

        self.scalar(subject, vivo::RESEARCH_OVERVIEW, row.field(layout::RESEARCH_OVERVIEW), acc)?;

        for column in self.layout.expertise() {
            let concept = self
                .resolver
                .resolve(skos::CONCEPT, rdf::LABEL, row.field(column))?;
            if let Some(concept) = concept {
                self.link(subject, vivo::HAS_SUBJECT_AREA, concept, acc)?;
            }
        }

        for column in self.layout.focus() {
            match self.geo.lookup(row.field(column)) {
                CodeLookup::Known(area) => {
                    let place = self
                        .resolver
                        .resolve(area.kind.class_iri(), rdf::LABEL, &area.name)?;
                    if let Some(place) = place {
                        self.link(subject, vivo::HAS_GEOGRAPHIC_FOCUS, place, acc)?;
                    }
                }
                CodeLookup::Unrecognized(code) => {
                    debug!(row = row.number(), column = %column, code = %code, "geographic code not in table");
                }
                CodeLookup::Blank => {}
            }
        }

        for cols in self.layout.patents() {
            if let Some(record) = CompositeRecord::patent(row, cols, self.registry) {
                record.emit(subject, self.store, acc)?;
            }
        }

        for cols in self.layout.roles() {
            if let Some(record) = CompositeRecord::service_role(row, cols, &self.resolver)? {
                record.emit(subject, self.store, acc)?;
            }
        }

        Ok(())
    }

    fn scalar(&self, subject: &Iri, predicate: &str, proposed: &str, acc: &mut DiffAccumulator) -> StorageResult<()> {
        if proposed.trim().is_empty() {
            return Ok(());
        }
        let current = self.resolver.current_value(subject, predicate)?;
        acc.apply_scalar(diff_scalar(subject, predicate, current.as_ref(), proposed));
        Ok(())
    }

    /// Assert a resource-valued property unless the graph already has it
    fn link(&self, subject: &Iri, predicate: &str, object: Iri, acc: &mut DiffAccumulator) -> StorageResult<()> {
        let object = Term::from(object);
        if self.resolver.has_statement(subject, predicate, &object)? {
            return Ok(());
        }
        let triple = Triple::new(subject.clone(), predicate, object);
        if !acc.add_set().contains(&triple) {
            acc.assert(triple);
        }
        Ok(())
    }
}
