//! Unit tests for per-study variable extraction

use std::collections::BTreeSet;

use cdecount::pipeline::{extract_study_variables, parse_variable_list, CdeError, StudyVariables};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;

mod common;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_whitespace_is_trimmed() {
    assert_eq!(parse_variable_list("a, b ,c"), set(&["a", "b", "c"]));
}

#[test]
fn test_repeated_tokens_collapse() {
    assert_eq!(parse_variable_list("a,a, a ,b"), set(&["a", "b"]));
}

#[test]
fn test_empty_text_yields_empty_string_member() {
    assert_eq!(parse_variable_list(""), set(&[""]));
    assert_eq!(parse_variable_list("a,,b"), set(&["", "a", "b"]));
}

#[test]
fn test_rows_for_same_study_are_unioned() {
    let df = common::study_dataframe(&[("phs000002", "a,b"), ("phs000002", "b,c")]);

    let studies = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap();

    assert_eq!(studies.len(), 1, "Study should appear once");
    assert_eq!(studies.get("phs000002"), Some(&set(&["a", "b", "c"])));
}

#[test]
fn test_first_encountered_order() {
    let df = common::study_dataframe(&[
        ("phs3", "x"),
        ("phs1", "y"),
        ("phs3", "z"),
        ("phs2", "w"),
    ]);

    let studies = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap();

    assert_eq!(studies.study_ids(), &["phs3", "phs1", "phs2"]);
    let ids: Vec<&str> = studies.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["phs3", "phs1", "phs2"]);
}

#[test]
fn test_shuffled_rows_give_identical_sets() {
    let rows = vec![
        ("phs1", "a, b"),
        ("phs1", "c"),
        ("phs2", "x,y"),
        ("phs1", "b ,d"),
        ("phs2", "y, z"),
        ("phs3", "q"),
    ];
    let baseline = extract_study_variables(&common::study_dataframe(&rows), "dbGaP ID", "Variables")
        .unwrap();

    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let mut shuffled = rows.clone();
        shuffled.shuffle(&mut rng);
        let studies =
            extract_study_variables(&common::study_dataframe(&shuffled), "dbGaP ID", "Variables")
                .unwrap();

        for id in ["phs1", "phs2", "phs3"] {
            assert_eq!(studies.get(id), baseline.get(id), "Set for {} changed under shuffle", id);
        }
    }
}

#[test]
fn test_null_variables_register_empty_study() {
    let df = df! {
        "dbGaP ID" => ["phs1", "phs2"],
        "Variables" => [Some("a"), None],
    }
    .unwrap();

    let studies = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap();

    assert_eq!(studies.len(), 2);
    assert_eq!(studies.get("phs2"), Some(&BTreeSet::new()));
}

#[test]
fn test_null_study_id_rows_are_skipped() {
    let df = df! {
        "dbGaP ID" => [Some("phs1"), None],
        "Variables" => ["a", "b"],
    }
    .unwrap();

    let studies = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap();

    assert_eq!(studies.len(), 1);
    assert_eq!(studies.get("phs1"), Some(&set(&["a"])));
}

#[test]
fn test_numeric_study_ids_are_stringified() {
    let df = df! {
        "dbGaP ID" => [1001i64, 1002, 1001],
        "Variables" => ["a", "b", "c"],
    }
    .unwrap();

    let studies = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap();

    assert_eq!(studies.get("1001"), Some(&set(&["a", "c"])));
    assert_eq!(studies.get("1002"), Some(&set(&["b"])));
}

#[test]
fn test_missing_column_is_reported() {
    let df = df! {
        "Study" => ["phs1"],
        "Variables" => ["a"],
    }
    .unwrap();

    let err = extract_study_variables(&df, "dbGaP ID", "Variables").unwrap_err();

    match err.downcast_ref::<CdeError>() {
        Some(CdeError::MissingColumn { column, available }) => {
            assert_eq!(column, "dbGaP ID");
            assert!(available.contains(&"Study".to_string()));
        }
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_custom_column_names() {
    let df = df! {
        "accession" => ["phs9"],
        "fields" => ["u, v"],
    }
    .unwrap();

    let studies = extract_study_variables(&df, "accession", "fields").unwrap();

    assert_eq!(studies.get("phs9"), Some(&set(&["u", "v"])));
}

#[test]
fn test_add_row_directly() {
    let mut studies = StudyVariables::new();
    assert!(studies.is_empty());

    studies.add_row("phs1", Some("a"));
    studies.add_row("phs1", None);
    studies.add_row("phs1", Some("b"));

    assert_eq!(studies.len(), 1);
    assert_eq!(studies.get("phs1"), Some(&set(&["a", "b"])));
}
