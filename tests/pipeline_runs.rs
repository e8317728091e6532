//! End-to-end runs over fixture graphs
//!
//! Each test drives whole survey files through the row orchestrator or the
//! full pipeline and checks the add set, the sub set and the exception log.

mod common;

use common::*;
use std::path::Path;
use surveydiff::graph::vocab::{degree, rdf, vivo, xsd};
use surveydiff::storage::OpenStore;
use surveydiff::{
    DiffAccumulator, DocumentFormat, GeoTable, GraphStore, Iri, Literal, MemoryGraph, OfflineRegistry,
    RowOrchestrator, SqliteGraph, StoreConfig, Survey, SurveyLayout, SyncConfig, Term, Triple,
};

fn fixture_graph() -> MemoryGraph {
    MemoryGraph::from_ntriples(NAMESPACE, SNAPSHOT).unwrap()
}

fn diff(store: &dyn GraphStore, csv: &str) -> DiffAccumulator {
    let survey = Survey::from_reader(csv.as_bytes()).unwrap();
    let layout = SurveyLayout::default();
    let geo = GeoTable::from_reader(GEO_TABLE.as_bytes()).unwrap();
    RowOrchestrator::new(store, &layout, &geo, &OfflineRegistry).process_all(survey.rows())
}

fn objects(acc: &DiffAccumulator, subject: &Iri, predicate: &str) -> Vec<Term> {
    acc.add_set()
        .iter()
        .filter(|t| &t.subject == subject && t.predicate.as_str() == predicate)
        .map(|t| t.object.clone())
        .collect()
}

/// The entity typed `class` in the add set
fn entity_of_type(acc: &DiffAccumulator, class: &str) -> Iri {
    acc.add_set()
        .iter()
        .find(|t| t.predicate.as_str() == rdf::TYPE && t.object == Term::iri(class))
        .map(|t| t.subject.clone())
        .unwrap_or_else(|| panic!("no entity of type {class}"))
}

#[test]
fn degree_row_produces_training_entity() {
    let graph = fixture_graph();
    let csv = survey_csv(&[&[
        ("uf_id_number", "12345678"),
        ("last_name", "Conlon"),
        ("degree_choice_1", "49"),
        ("deg_1_inst", "Test University"),
        ("deg_1_date_y", "2010"),
    ]]);
    let acc = diff(&graph, &csv);

    assert!(acc.exceptions().is_empty());
    assert!(acc.sub_set().is_empty());

    let training = entity_of_type(&acc, vivo::EDUCATIONAL_TRAINING);
    assert!(training.as_str().starts_with(NAMESPACE));
    assert_eq!(
        objects(&acc, &training, vivo::EDUCATIONAL_TRAINING_OF),
        vec![Term::iri(CONLON)]
    );
    assert_eq!(
        objects(&acc, &training, vivo::DEGREE_EARNED),
        vec![Term::iri(format!("{}academicDegree4", degree::NS))]
    );
    assert_eq!(
        objects(&acc, &training, vivo::TRAINING_AT_ORGANIZATION),
        vec![Term::iri(TEST_UNIVERSITY)]
    );

    let intervals = objects(&acc, &training, vivo::DATE_TIME_INTERVAL);
    assert_eq!(intervals.len(), 1);
    let interval = intervals[0].as_iri().unwrap();
    assert_ne!(interval, &training);
    assert_eq!(
        objects(&acc, interval, rdf::TYPE),
        vec![Term::iri(vivo::DATE_TIME_INTERVAL_CLASS)]
    );
    assert_eq!(
        objects(&acc, interval, vivo::END),
        vec![Term::Literal(Literal::typed("2010-01-01", xsd::DATE))]
    );
}

#[test]
fn rejected_rows_are_logged_and_contribute_nothing() {
    let graph = fixture_graph();
    let csv = survey_csv(&[
        &[("uf_id_number", "00000000"), ("last_name", "Nobody"), ("era_commons_id", "X1")],
        &[("uf_id_number", "87654321"), ("last_name", "Smyth"), ("degree_choice_1", "11")],
        &[("uf_id_number", "12345678"), ("last_name", "Conlon"), ("expert_1_overv", "Informatics")],
    ]);
    let acc = diff(&graph, &csv);

    let log: Vec<String> = acc.exceptions().iter().map(|e| e.to_string()).collect();
    assert_eq!(
        log,
        vec![
            "Row 1 UFID 00000000 not found".to_string(),
            "Row 2 UFID 87654321 last name in graph = Smith does not match survey last name = Smyth"
                .to_string(),
        ]
    );
    assert_eq!(
        acc.add_set().as_slice(),
        &[Triple::new(CONLON, vivo::RESEARCH_OVERVIEW, Literal::plain("Informatics"))]
    );
    assert!(acc.sub_set().is_empty());
}

#[test]
fn typed_identifier_literal_still_verifies() {
    let graph = fixture_graph();
    let csv = survey_csv(&[&[("uf_id_number", "87654321"), ("last_name", "Smith"), ("expert_1", "Genomics")]]);
    let acc = diff(&graph, &csv);
    assert!(acc.exceptions().is_empty());
    // Smith already has Genomics
    assert!(acc.is_noop());
}

#[test]
fn scalar_diffs_are_idempotent_once_applied() {
    let mut graph = fixture_graph();
    let csv = survey_csv(&[&[
        ("uf_id_number", "12345678"),
        ("last_name", "Conlon"),
        ("era_commons_id", "CONLONM"),
        ("expert_1_overv", "Clinical informatics"),
        ("expert_1", "Genomics"),
        ("focus_1_country", "120"),
    ]]);

    let first = diff(&graph, &csv);
    assert_eq!(
        first.sub_set().as_slice(),
        &[Triple::new(CONLON, vivo::ERA_COMMONS_ID, Literal::plain("MCONLON"))]
    );
    assert_eq!(first.add_set().len(), 4);
    assert!(first
        .add_set()
        .contains(&Triple::new(CONLON, vivo::HAS_GEOGRAPHIC_FOCUS, Term::iri(KENYA))));

    graph.apply(first.add_set(), first.sub_set());
    let second = diff(&graph, &csv);
    assert!(second.is_noop());
    assert!(second.exceptions().is_empty());
}

#[test]
fn blank_answers_never_retract() {
    let graph = fixture_graph();
    let csv = survey_csv(&[&[("uf_id_number", "12345678"), ("last_name", "Conlon"), ("era_commons_id", "")]]);
    let acc = diff(&graph, &csv);
    assert!(acc.is_noop());
    assert!(acc.sub_set().iter().all(|t| !t.object.is_blank()));
}

#[test]
fn composite_groups_are_gated_on_their_required_field() {
    let graph = fixture_graph();
    let csv = survey_csv(&[&[
        ("uf_id_number", "12345678"),
        ("last_name", "Conlon"),
        ("award_1_name", "Orphan award name"),
        ("award_1_start_y", "2012"),
        ("degree_choice_2", "0"),
        ("deg_2_inst", "Test University"),
        ("roles_1_journal", "Circulation"),
    ]]);
    let acc = diff(&graph, &csv);
    assert!(acc.is_noop());
    assert!(acc.exceptions().is_empty());
}

#[test]
fn full_row_covers_every_handler() {
    let graph = fixture_graph();
    let csv = survey_csv(&[&[
        ("uf_id_number", "12345678"),
        ("last_name", "Conlon"),
        ("award_1_sponsor", "National Institutes of Health"),
        ("award_1_name", "K24 Mentoring Award"),
        ("award_1_start_y", "2013"),
        ("award_1_start_m", "7"),
        ("degree_choice_1", "41"),
        ("deg_1_inst", "Test University"),
        ("deg_1_field", "Medicine"),
        ("deg_1_date_y", "1986"),
        ("deg_1_date_m", "5"),
        ("deg_1_date_d", "31"),
        ("focus_1_country", "10"),
        ("patent_1_number", "8123456"),
        ("roles_1_yn", "1"),
        ("roles_1_journal", "Circulation"),
        ("roles_1_start_y", "2009"),
        ("roles_1_end_y", "2013"),
    ]]);
    let acc = diff(&graph, &csv);
    assert!(acc.exceptions().is_empty());

    let award = entity_of_type(&acc, vivo::AWARD_RECEIPT);
    assert_eq!(objects(&acc, &award, vivo::AWARD_CONFERRED_BY), vec![Term::iri(NIH)]);
    let value = objects(&acc, &award, vivo::DATE_TIME_VALUE);
    assert_eq!(
        objects(&acc, value[0].as_iri().unwrap(), vivo::DATE_TIME),
        vec![Term::Literal(Literal::typed("2013-07-01T00:00:00", xsd::DATE_TIME))]
    );

    let training = entity_of_type(&acc, vivo::EDUCATIONAL_TRAINING);
    assert_eq!(objects(&acc, &training, vivo::MAJOR_FIELD), vec![Term::plain("Medicine")]);

    assert!(acc
        .add_set()
        .contains(&Triple::new(CONLON, vivo::HAS_GEOGRAPHIC_FOCUS, Term::iri(FLORIDA))));

    let patent = entity_of_type(&acc, surveydiff::graph::vocab::bibo::PATENT);
    assert_eq!(objects(&acc, &patent, vivo::PATENT_NUMBER), vec![Term::plain("8123456")]);

    let role = entity_of_type(&acc, vivo::EDITOR_ROLE);
    assert_eq!(objects(&acc, &role, vivo::ROLE_CONTRIBUTES_TO), vec![Term::iri(CIRCULATION)]);
    assert_eq!(objects(&acc, &role, rdf::LABEL), vec![Term::plain("Editor-in-Chief")]);
    let interval = objects(&acc, &role, vivo::DATE_TIME_INTERVAL);
    let interval = interval[0].as_iri().unwrap();
    assert_eq!(
        objects(&acc, interval, vivo::START),
        vec![Term::Literal(Literal::typed("2009-01-01", xsd::DATE))]
    );
    assert_eq!(
        objects(&acc, interval, vivo::END),
        vec![Term::Literal(Literal::typed("2013-01-01", xsd::DATE))]
    );

    // every minted identifier is distinct
    let mut minted: Vec<&Iri> = acc
        .add_set()
        .iter()
        .filter(|t| t.predicate.as_str() == rdf::TYPE)
        .map(|t| &t.subject)
        .collect();
    let total = minted.len();
    minted.sort_by_key(|iri| iri.as_str().to_string());
    minted.dedup();
    assert_eq!(minted.len(), total);
}

#[test]
fn sqlite_store_gives_the_same_diff() {
    let memory = fixture_graph();
    let sqlite = SqliteGraph::open_in_memory(NAMESPACE).unwrap();
    sqlite.import_ntriples(SNAPSHOT).unwrap();

    let csv = survey_csv(&[
        &[("uf_id_number", "12345678"), ("last_name", "Conlon"), ("era_commons_id", "CONLONM")],
        &[("uf_id_number", "87654321"), ("last_name", "Smith"), ("focus_2_country", "120")],
    ]);
    let from_memory = diff(&memory, &csv);
    let from_sqlite = diff(&sqlite, &csv);

    assert_eq!(from_memory.add_set(), from_sqlite.add_set());
    assert_eq!(from_memory.sub_set(), from_sqlite.sub_set());
}

#[test]
fn pipeline_writes_documents_after_processing() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("graph.nt");
    let geo = dir.path().join("geo.csv");
    let input = dir.path().join("VIVODataCollection.csv");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();
    std::fs::write(&geo, GEO_TABLE).unwrap();
    std::fs::write(
        &input,
        survey_csv(&[
            &[("uf_id_number", "12345678"), ("last_name", "Conlon"), ("era_commons_id", "CONLONM")],
            &[("uf_id_number", "11111111"), ("last_name", "Ghost")],
        ]),
    )
    .unwrap();

    let config = SyncConfig {
        store: StoreConfig::Memory {
            snapshot: Some(snapshot),
        },
        geo_table: Some(geo),
        out_dir: Some(dir.path().join("out")),
        ..SyncConfig::default()
    };
    let summary = surveydiff::run(&input, &config).unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.retracted, 1);
    assert_eq!(summary.exceptions, 1);
    assert_eq!(summary.paths.add, dir.path().join("out/VIVODataCollection_add.rdf"));

    let add = std::fs::read_to_string(&summary.paths.add).unwrap();
    assert!(add.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(add.contains("<vivo:eRACommonsId>CONLONM</vivo:eRACommonsId>"));
    assert!(add.trim_end().ends_with("</rdf:RDF>"));

    let sub = std::fs::read_to_string(&summary.paths.sub).unwrap();
    assert!(sub.contains("<vivo:eRACommonsId>MCONLON</vivo:eRACommonsId>"));

    let exceptions = std::fs::read_to_string(&summary.paths.exceptions).unwrap();
    assert_eq!(exceptions, "Row 2 UFID 11111111 not found\n");
}

#[test]
fn pipeline_ntriples_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.csv");
    std::fs::write(
        &input,
        survey_csv(&[&[("uf_id_number", "12345678"), ("last_name", "Conlon"), ("patent_1_number", "7000001")]]),
    )
    .unwrap();
    let snapshot = dir.path().join("graph.nt");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();

    let config = SyncConfig {
        store: StoreConfig::Memory {
            snapshot: Some(snapshot),
        },
        format: DocumentFormat::NTriples,
        ..SyncConfig::default()
    };
    let summary = surveydiff::run(&input, &config).unwrap();
    assert_eq!(summary.paths.add, dir.path().join("survey_add.nt"));

    let text = std::fs::read_to_string(&summary.paths.add).unwrap();
    let triples = surveydiff::graph::ntriples::parse_document(&text).unwrap();
    assert_eq!(triples.len(), summary.added);
    assert!(triples.contains(&Triple::new(
        triples[0].subject.clone(),
        vivo::PATENT_NUMBER,
        Literal::plain("7000001")
    )));
    assert!(Path::new(&summary.paths.exceptions).exists());
}
