//! Composite entity builder
//!
//! Awards, degrees, patents and editorial roles are multi-field records.
//! Each group that passes its presence test becomes a freshly minted entity
//! described by a type triple, a relation back to the respondent, one triple
//! per known field and, when dates are known, a date sub-entity. Composite
//! records are only ever added.

use super::date::DateInterval;
use super::layout::{AwardColumns, DegreeColumns, PatentColumns, RoleColumns};
use super::patent::{PatentRecord, PatentRegistry};
use super::row::Row;
use crate::codes::{is_answered, DegreeCode, ServiceRoleCode};
use crate::diff::DiffAccumulator;
use crate::graph::vocab::{bibo, dcterms, foaf, rdf, vivo};
use crate::graph::{Iri, Literal, Term, Triple};
use crate::resolve::EntityResolver;
use crate::storage::{GraphStore, StorageResult};
use chrono::NaiveDate;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Award {
    pub sponsor: Option<Iri>,
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Degree {
    pub degree: Option<Iri>,
    pub institution: Option<Iri>,
    pub field: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRole {
    pub role: ServiceRoleCode,
    pub journal: Option<Iri>,
    pub interval: DateInterval,
}

/// One composite group of a row, with its cross-references resolved
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeRecord {
    Award(Award),
    Degree(Degree),
    Patent(PatentRecord),
    ServiceRole(ServiceRole),
}

impl CompositeRecord {
    /// Read award group `cols`. Present when the sponsor is answered.
    pub fn award(row: &Row, cols: &AwardColumns, resolver: &EntityResolver) -> StorageResult<Option<Self>> {
        let sponsor = row.field(&cols.sponsor);
        if sponsor.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(CompositeRecord::Award(Award {
            sponsor: resolver.resolve(foaf::ORGANIZATION, rdf::LABEL, sponsor)?,
            name: non_blank(row.field(&cols.name)),
            date: cols.start.read(row),
        })))
    }

    /// Read degree group `cols`. Present when a degree code is chosen.
    pub fn degree(row: &Row, cols: &DegreeColumns, resolver: &EntityResolver) -> StorageResult<Option<Self>> {
        let choice = row.field(&cols.choice);
        if !is_answered(choice) {
            return Ok(None);
        }
        Ok(Some(CompositeRecord::Degree(Degree {
            degree: DegreeCode::from_code(choice).known().map(DegreeCode::iri),
            institution: resolver.resolve(foaf::ORGANIZATION, rdf::LABEL, row.field(&cols.institution))?,
            field: non_blank(row.field(&cols.field)),
            date: cols.date.read(row),
        })))
    }

    /// Read patent group `cols`. Present when a patent number is given.
    ///
    /// Registry failures are logged and the patent keeps its number only.
    pub fn patent(row: &Row, cols: &PatentColumns, registry: &dyn PatentRegistry) -> Option<Self> {
        let number = row.field(&cols.number).trim();
        if number.is_empty() {
            return None;
        }
        let record = match registry.lookup(number) {
            Ok(Some(record)) => record,
            Ok(None) => PatentRecord::number_only(number),
            Err(e) => {
                warn!(row = row.number(), patent = number, error = %e, "patent lookup failed");
                PatentRecord::number_only(number)
            }
        };
        Some(CompositeRecord::Patent(record))
    }

    /// Read editorial role group `cols`. Present when the role code names a
    /// known role; the role decides the entity's type.
    pub fn service_role(row: &Row, cols: &RoleColumns, resolver: &EntityResolver) -> StorageResult<Option<Self>> {
        let code = row.field(&cols.code);
        let Some(role) = ServiceRoleCode::from_code(code).known() else {
            if is_answered(code) {
                debug!(row = row.number(), code, "unrecognized role code, group skipped");
            }
            return Ok(None);
        };
        Ok(Some(CompositeRecord::ServiceRole(ServiceRole {
            role,
            journal: resolver.resolve(bibo::JOURNAL, rdf::LABEL, row.field(&cols.journal))?,
            interval: DateInterval::new(cols.start.read(row), cols.end.read(row)),
        })))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CompositeRecord::Award(_) => "award",
            CompositeRecord::Degree(_) => "degree",
            CompositeRecord::Patent(_) => "patent",
            CompositeRecord::ServiceRole(_) => "service role",
        }
    }

    pub fn class_iri(&self) -> &'static str {
        match self {
            CompositeRecord::Award(_) => vivo::AWARD_RECEIPT,
            CompositeRecord::Degree(_) => vivo::EDUCATIONAL_TRAINING,
            CompositeRecord::Patent(_) => bibo::PATENT,
            CompositeRecord::ServiceRole(r) => r.role.role_class(),
        }
    }

    /// Predicate relating the entity back to the respondent
    fn subject_relation(&self) -> &'static str {
        match self {
            CompositeRecord::Award(_) => vivo::AWARD_OR_HONOR_FOR,
            CompositeRecord::Degree(_) => vivo::EDUCATIONAL_TRAINING_OF,
            CompositeRecord::Patent(_) => dcterms::CREATOR,
            CompositeRecord::ServiceRole(_) => vivo::ROLE_OF,
        }
    }

    /// Mint the entity and write its triples to the add set.
    /// Returns the new entity's identifier.
    pub fn emit(&self, subject: &Iri, store: &dyn GraphStore, acc: &mut DiffAccumulator) -> StorageResult<Iri> {
        let entity = store.mint_identifier()?;
        debug!(kind = self.kind(), entity = %entity, subject = %subject, "minted composite entity");

        acc.assert(Triple::new(entity.clone(), rdf::TYPE, Term::iri(self.class_iri())));
        acc.assert(Triple::new(entity.clone(), self.subject_relation(), subject.clone()));

        let mut link = |predicate: &str, object: Term| {
            acc.assert(Triple::new(entity.clone(), predicate, object));
        };
        match self {
            CompositeRecord::Award(award) => {
                if let Some(org) = &award.sponsor {
                    link(vivo::AWARD_CONFERRED_BY, org.clone().into());
                }
                if let Some(name) = &award.name {
                    link(rdf::LABEL, Term::plain(name.as_str()));
                }
            }
            CompositeRecord::Degree(degree) => {
                if let Some(iri) = &degree.degree {
                    link(vivo::DEGREE_EARNED, iri.clone().into());
                }
                if let Some(org) = &degree.institution {
                    link(vivo::TRAINING_AT_ORGANIZATION, org.clone().into());
                }
                if let Some(field) = &degree.field {
                    link(vivo::MAJOR_FIELD, Term::plain(field.as_str()));
                }
            }
            CompositeRecord::Patent(patent) => {
                link(vivo::PATENT_NUMBER, Term::plain(patent.number.as_str()));
                if let Some(title) = &patent.title {
                    link(rdf::LABEL, Term::plain(title.as_str()));
                }
            }
            CompositeRecord::ServiceRole(role) => {
                if let Some(journal) = &role.journal {
                    link(vivo::ROLE_CONTRIBUTES_TO, journal.clone().into());
                }
                link(rdf::LABEL, Term::plain(role.role.label()));
            }
        }

        match self {
            CompositeRecord::Award(Award { date: Some(date), .. }) => {
                let value = emit_date_value(*date, store, acc)?;
                acc.assert(Triple::new(entity.clone(), vivo::DATE_TIME_VALUE, value));
            }
            CompositeRecord::Patent(PatentRecord { issued: Some(date), .. }) => {
                let value = emit_date_value(*date, store, acc)?;
                acc.assert(Triple::new(entity.clone(), vivo::DATE_ISSUED, value));
            }
            CompositeRecord::Degree(Degree { date, .. }) => {
                if let Some(interval) = emit_interval(DateInterval::ending(*date), store, acc)? {
                    acc.assert(Triple::new(entity.clone(), vivo::DATE_TIME_INTERVAL, interval));
                }
            }
            CompositeRecord::ServiceRole(ServiceRole { interval, .. }) => {
                if let Some(interval) = emit_interval(*interval, store, acc)? {
                    acc.assert(Triple::new(entity.clone(), vivo::DATE_TIME_INTERVAL, interval));
                }
            }
            CompositeRecord::Award(_) | CompositeRecord::Patent(_) => {}
        }

        Ok(entity)
    }
}

/// A `DateTimeValue` at day precision
fn emit_date_value(date: NaiveDate, store: &dyn GraphStore, acc: &mut DiffAccumulator) -> StorageResult<Iri> {
    let value = store.mint_identifier()?;
    debug!(entity = %value, "minted date value");
    acc.assert(Triple::new(value.clone(), rdf::TYPE, Term::iri(vivo::DATE_TIME_VALUE_CLASS)));
    acc.assert(Triple::new(value.clone(), vivo::DATE_TIME, Literal::date_time(date)));
    acc.assert(Triple::new(
        value.clone(),
        vivo::DATE_TIME_PRECISION,
        Term::iri(vivo::YEAR_MONTH_DAY_PRECISION),
    ));
    Ok(value)
}

/// A `DateTimeInterval` carrying whichever bounds are known; nothing when
/// neither is
fn emit_interval(
    interval: DateInterval,
    store: &dyn GraphStore,
    acc: &mut DiffAccumulator,
) -> StorageResult<Option<Iri>> {
    if interval.is_empty() {
        return Ok(None);
    }
    let node = store.mint_identifier()?;
    debug!(entity = %node, "minted date interval");
    acc.assert(Triple::new(node.clone(), rdf::TYPE, Term::iri(vivo::DATE_TIME_INTERVAL_CLASS)));
    if let Some(start) = interval.start {
        acc.assert(Triple::new(node.clone(), vivo::START, Literal::date(start)));
    }
    if let Some(end) = interval.end {
        acc.assert(Triple::new(node.clone(), vivo::END, Literal::date(end)));
    }
    Ok(Some(node))
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
