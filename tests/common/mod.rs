//! Shared fixtures for end-to-end runs
//!
//! A small graph snapshot holding two people, two organizations, a journal,
//! two concepts and two places, plus a builder for survey CSV files carrying
//! the full default column layout.

#![allow(dead_code)]

use surveydiff::SurveyLayout;

pub const NAMESPACE: &str = "http://vivo.ufl.edu/individual/";
pub const CONLON: &str = "http://vivo.ufl.edu/individual/n25562";
pub const SMITH: &str = "http://vivo.ufl.edu/individual/n1133";
pub const TEST_UNIVERSITY: &str = "http://vivo.ufl.edu/individual/n7001";
pub const NIH: &str = "http://vivo.ufl.edu/individual/n7002";
pub const CIRCULATION: &str = "http://vivo.ufl.edu/individual/n8001";
pub const GENOMICS: &str = "http://vivo.ufl.edu/individual/n9001";
pub const FLORIDA: &str = "http://vivo.ufl.edu/individual/n9101";
pub const KENYA: &str = "http://vivo.ufl.edu/individual/n9102";

pub const SNAPSHOT: &str = r#"# fixture graph
<http://vivo.ufl.edu/individual/n25562> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://vivo.ufl.edu/ontology/vivo-ufl/UFCurrentEntity> .
<http://vivo.ufl.edu/individual/n25562> <http://vivo.ufl.edu/ontology/vivo-ufl/ufid> "12345678" .
<http://vivo.ufl.edu/individual/n25562> <http://xmlns.com/foaf/0.1/lastName> "Conlon" .
<http://vivo.ufl.edu/individual/n25562> <http://vivoweb.org/ontology/core#eRACommonsId> "MCONLON" .
<http://vivo.ufl.edu/individual/n1133> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://vivo.ufl.edu/ontology/vivo-ufl/UFCurrentEntity> .
<http://vivo.ufl.edu/individual/n1133> <http://vivo.ufl.edu/ontology/vivo-ufl/ufid> "87654321"^^<http://www.w3.org/2001/XMLSchema#string> .
<http://vivo.ufl.edu/individual/n1133> <http://xmlns.com/foaf/0.1/lastName> "Smith" .
<http://vivo.ufl.edu/individual/n1133> <http://vivoweb.org/ontology/core#hasSubjectArea> <http://vivo.ufl.edu/individual/n9001> .
<http://vivo.ufl.edu/individual/n7001> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://xmlns.com/foaf/0.1/Organization> .
<http://vivo.ufl.edu/individual/n7001> <http://www.w3.org/2000/01/rdf-schema#label> "Test University" .
<http://vivo.ufl.edu/individual/n7002> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://xmlns.com/foaf/0.1/Organization> .
<http://vivo.ufl.edu/individual/n7002> <http://www.w3.org/2000/01/rdf-schema#label> "National Institutes of Health"^^<http://www.w3.org/2001/XMLSchema#string> .
<http://vivo.ufl.edu/individual/n8001> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://purl.org/ontology/bibo/Journal> .
<http://vivo.ufl.edu/individual/n8001> <http://www.w3.org/2000/01/rdf-schema#label> "Circulation" .
<http://vivo.ufl.edu/individual/n9001> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .
<http://vivo.ufl.edu/individual/n9001> <http://www.w3.org/2000/01/rdf-schema#label> "Genomics" .
<http://vivo.ufl.edu/individual/n9101> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://vivoweb.org/ontology/core#StateOrProvince> .
<http://vivo.ufl.edu/individual/n9101> <http://www.w3.org/2000/01/rdf-schema#label> "Florida" .
<http://vivo.ufl.edu/individual/n9102> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://vivoweb.org/ontology/core#Country> .
<http://vivo.ufl.edu/individual/n9102> <http://www.w3.org/2000/01/rdf-schema#label> "Kenya" .
"#;

pub const GEO_TABLE: &str = "code,name\n10,Florida\n51,Wyoming\n120,Kenya\n";

/// CSV text with every default column; unspecified answers are blank
pub fn survey_csv(rows: &[&[(&str, &str)]]) -> String {
    let layout = SurveyLayout::default();
    let columns = layout.expected_columns();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns).unwrap();
    for row in rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|col| {
                row.iter()
                    .find(|(name, _)| name == col)
                    .map(|(_, value)| *value)
                    .unwrap_or("")
            })
            .collect();
        writer.write_record(&record).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
