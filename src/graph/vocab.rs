//! Vocabulary constants and the prefix table
//!
//! Every IRI the reconciler writes or queries is declared here. The prefix
//! table compacts predicates for RDF/XML output and expands prefixed names
//! read from configuration.

/// RDF / RDFS
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XML Schema datatypes
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

pub mod foaf {
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";
    pub const LAST_NAME: &str = "http://xmlns.com/foaf/0.1/lastName";
    pub const ORGANIZATION: &str = "http://xmlns.com/foaf/0.1/Organization";
}

pub mod skos {
    pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";
    pub const CONCEPT: &str = "http://www.w3.org/2004/02/skos/core#Concept";
}

pub mod bibo {
    pub const NS: &str = "http://purl.org/ontology/bibo/";
    pub const JOURNAL: &str = "http://purl.org/ontology/bibo/Journal";
    pub const PATENT: &str = "http://purl.org/ontology/bibo/Patent";
}

pub mod dcterms {
    pub const NS: &str = "http://purl.org/dc/terms/";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
}

/// University-local extension ontology
pub mod ufv {
    pub const NS: &str = "http://vivo.ufl.edu/ontology/vivo-ufl/";
    pub const CURRENT_ENTITY: &str = "http://vivo.ufl.edu/ontology/vivo-ufl/UFCurrentEntity";
    pub const UFID: &str = "http://vivo.ufl.edu/ontology/vivo-ufl/ufid";
}

/// Academic degree individuals, `academicDegree<N>`
pub mod degree {
    pub const NS: &str = "http://vivoweb.org/ontology/degree/";
}

/// VIVO core ontology
pub mod vivo {
    pub const NS: &str = "http://vivoweb.org/ontology/core#";

    // scalar properties
    pub const ERA_COMMONS_ID: &str = "http://vivoweb.org/ontology/core#eRACommonsId";
    pub const RESEARCH_OVERVIEW: &str = "http://vivoweb.org/ontology/core#researchOverview";

    // resource properties on the person
    pub const HAS_SUBJECT_AREA: &str = "http://vivoweb.org/ontology/core#hasSubjectArea";
    pub const HAS_GEOGRAPHIC_FOCUS: &str = "http://vivoweb.org/ontology/core#hasGeographicFocus";

    // geography
    pub const STATE_OR_PROVINCE: &str = "http://vivoweb.org/ontology/core#StateOrProvince";
    pub const COUNTRY: &str = "http://vivoweb.org/ontology/core#Country";

    // awards
    pub const AWARD_RECEIPT: &str = "http://vivoweb.org/ontology/core#AwardReceipt";
    pub const AWARD_OR_HONOR_FOR: &str = "http://vivoweb.org/ontology/core#awardOrHonorFor";
    pub const AWARD_CONFERRED_BY: &str = "http://vivoweb.org/ontology/core#awardConferredBy";

    // degrees
    pub const EDUCATIONAL_TRAINING: &str = "http://vivoweb.org/ontology/core#EducationalTraining";
    pub const EDUCATIONAL_TRAINING_OF: &str = "http://vivoweb.org/ontology/core#educationalTrainingOf";
    pub const DEGREE_EARNED: &str = "http://vivoweb.org/ontology/core#degreeEarned";
    pub const TRAINING_AT_ORGANIZATION: &str =
        "http://vivoweb.org/ontology/core#trainingAtOrganization";
    pub const MAJOR_FIELD: &str = "http://vivoweb.org/ontology/core#majorField";

    // patents
    pub const PATENT_NUMBER: &str = "http://vivoweb.org/ontology/core#patentNumber";
    pub const DATE_ISSUED: &str = "http://vivoweb.org/ontology/core#dateIssued";

    // service roles
    pub const EDITOR_ROLE: &str = "http://vivoweb.org/ontology/core#EditorRole";
    pub const MEMBER_ROLE: &str = "http://vivoweb.org/ontology/core#MemberRole";
    pub const REVIEWER_ROLE: &str = "http://vivoweb.org/ontology/core#ReviewerRole";
    pub const ROLE_OF: &str = "http://vivoweb.org/ontology/core#roleOf";
    pub const ROLE_CONTRIBUTES_TO: &str = "http://vivoweb.org/ontology/core#roleContributesTo";

    // time
    pub const DATE_TIME_VALUE: &str = "http://vivoweb.org/ontology/core#dateTimeValue";
    pub const DATE_TIME_VALUE_CLASS: &str = "http://vivoweb.org/ontology/core#DateTimeValue";
    pub const DATE_TIME: &str = "http://vivoweb.org/ontology/core#dateTime";
    pub const DATE_TIME_PRECISION: &str = "http://vivoweb.org/ontology/core#dateTimePrecision";
    pub const YEAR_MONTH_DAY_PRECISION: &str =
        "http://vivoweb.org/ontology/core#yearMonthDayPrecision";
    pub const DATE_TIME_INTERVAL: &str = "http://vivoweb.org/ontology/core#dateTimeInterval";
    pub const DATE_TIME_INTERVAL_CLASS: &str = "http://vivoweb.org/ontology/core#DateTimeInterval";
    pub const START: &str = "http://vivoweb.org/ontology/core#start";
    pub const END: &str = "http://vivoweb.org/ontology/core#end";
}

/// Prefix → namespace bindings, in declaration order
#[derive(Debug, Clone)]
pub struct Prefixes {
    bindings: Vec<(String, String)>,
}

impl Prefixes {
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// The bindings every document this crate writes is expressed in
    pub fn standard() -> Self {
        Self::empty()
            .with("rdf", rdf::NS)
            .with("rdfs", rdf::RDFS_NS)
            .with("xsd", xsd::NS)
            .with("foaf", foaf::NS)
            .with("skos", skos::NS)
            .with("bibo", bibo::NS)
            .with("dcterms", dcterms::NS)
            .with("vivo", vivo::NS)
            .with("ufVivo", ufv::NS)
    }

    /// Add or replace a binding
    pub fn with(mut self, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let namespace = namespace.into();
        match self.bindings.iter_mut().find(|(p, _)| *p == prefix) {
            Some(binding) => binding.1 = namespace,
            None => self.bindings.push((prefix, namespace)),
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Expand `prefix:local` to a full IRI. Strings that are not a known
    /// prefixed name are returned unchanged.
    pub fn expand(&self, name: &str) -> String {
        if let Some((prefix, local)) = name.split_once(':') {
            if let Some((_, ns)) = self.bindings.iter().find(|(p, _)| p == prefix) {
                return format!("{}{}", ns, local);
            }
        }
        name.to_string()
    }

    /// Split an IRI into `(prefix, local)` using the longest matching
    /// namespace. The local part must be a valid XML name.
    pub fn compact<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.bindings
            .iter()
            .filter(|(_, ns)| iri.starts_with(ns.as_str()))
            .max_by_key(|(_, ns)| ns.len())
            .map(|(p, ns)| (p.as_str(), &iri[ns.len()..]))
            .filter(|(_, local)| is_xml_local_name(local))
    }
}

impl Default for Prefixes {
    fn default() -> Self {
        Self::standard()
    }
}

fn is_xml_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
