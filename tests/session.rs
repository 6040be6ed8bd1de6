//! 세션 단위 기록표/저항표 교체 동작 테스트.
use std::io::Write;

use voltage_drop_toolbox::config::Config;
use voltage_drop_toolbox::session::{Session, TableSource, UploadOutcome};
use voltage_drop_toolbox::wire::{CalculationInput, DataError, WireTable};

fn input(gauge: &str, current: f64) -> CalculationInput {
    CalculationInput {
        source_voltage_v: 24.0,
        load_current_a: current,
        conductor_count: 1,
        gauge: gauge.into(),
        wire_length_ft: 300.0,
    }
}

#[test]
fn append_then_clear_empties_records() {
    let mut session = Session::new(WireTable::builtin());
    for i in 0..5 {
        session.add_record(&input("14", i as f64)).expect("record");
    }
    assert_eq!(session.records().len(), 5);
    let currents: Vec<f64> = session
        .records()
        .rows()
        .iter()
        .map(|r| r.input.load_current_a)
        .collect();
    assert_eq!(currents, [0.0, 1.0, 2.0, 3.0, 4.0]);

    session.clear_records();
    assert!(session.records().is_empty());
    assert_eq!(session.records().len(), 0);
}

#[test]
fn identical_records_are_not_deduplicated() {
    let mut session = Session::new(WireTable::builtin());
    session.add_record(&input("12", 1.0)).unwrap();
    session.add_record(&input("12", 1.0)).unwrap();
    assert_eq!(session.records().len(), 2);
}

#[test]
fn rejected_upload_keeps_previous_table() {
    let mut session = Session::new(WireTable::builtin());
    let before = session.table().clone();
    let outcome = session.upload_table_csv("bad.csv", "awg_size,ohms\n14,2.5\n".as_bytes());
    assert!(matches!(
        outcome,
        UploadOutcome::Rejected(DataError::MissingColumns(_))
    ));
    assert_eq!(session.table(), &before);
    assert_eq!(session.table_source(), &TableSource::Builtin);
}

#[test]
fn accepted_upload_replaces_table() {
    let mut session = Session::new(WireTable::builtin());
    let outcome = session.upload_table_csv(
        "custom.csv",
        "gauge,resistance_at_25C\nbus-bar,0.01\n".as_bytes(),
    );
    assert!(outcome.is_replaced());
    assert_eq!(session.table().len(), 1);
    assert_eq!(
        session.table_source(),
        &TableSource::Upload("custom.csv".into())
    );
    let res = session.calculate(&input("bus-bar", 10.0)).unwrap();
    assert!((res.total_resistance_ohm - 0.006).abs() < 1e-12);
}

#[test]
fn missing_configured_table_starts_empty_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config {
        wire_table_path: Some(dir.path().join("missing.csv")),
        ..Config::default()
    };
    let mut session = Session::from_config(&cfg);
    assert!(session.table().is_empty());
    assert!(matches!(session.load_error(), Some(DataError::NotFound(_))));
    assert_eq!(session.default_gauge(None), None);

    // 업로드에 성공하면 오류 상태가 해제된다.
    let outcome = session.upload_table_csv("ok.csv", "gauge,resistance_at_25C\n14,2.575\n".as_bytes());
    assert!(outcome.is_replaced());
    assert!(session.load_error().is_none());
}

#[test]
fn upload_from_missing_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(WireTable::builtin());
    let outcome = session.upload_table_file(&dir.path().join("none.csv"));
    assert!(matches!(outcome, UploadOutcome::Rejected(DataError::NotFound(_))));
    assert!(!session.table().is_empty());
}

#[test]
fn file_upload_matches_table_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wires.csv");
    std::fs::write(&path, "gauge,resistance_at_25C\n14,2.5\n\n12,abc\n").unwrap();

    let mut session = Session::new(WireTable::builtin());
    let outcome = session.upload_table_file(&path);
    let direct = WireTable::from_path(&path).unwrap_err();
    match outcome {
        UploadOutcome::Rejected(e) => assert_eq!(e.to_string(), direct.to_string()),
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(session.table_source(), &TableSource::Builtin);

    std::fs::write(&path, "gauge,resistance_at_25C\n14,2.5\n").unwrap();
    assert!(session.upload_table_file(&path).is_replaced());
    assert_eq!(session.table_source(), &TableSource::Upload("wires.csv".into()));
}

#[test]
fn exported_table_can_be_uploaded_again() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_wire_resistance.csv");
    let session = Session::new(WireTable::builtin());
    session.export_table(&path).expect("export");

    let mut other = Session::new(WireTable::default());
    assert!(other.upload_table_file(&path).is_replaced());
    assert_eq!(other.table(), session.table());
}

#[test]
fn records_export_to_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.csv");
    let mut session = Session::new(WireTable::builtin());
    session.add_record(&input("14", 1.0)).unwrap();
    session.export_records(&path).expect("export");
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.lines().nth(1).unwrap().starts_with("24,1,1,14,300,"));
}

#[test]
fn configured_default_gauge_is_preferred() {
    let session = Session::new(WireTable::builtin());
    assert_eq!(session.default_gauge(Some("12")), Some("12".to_string()));
    // 표에 없는 게이지는 기본 행으로 대체된다.
    let fallback = session.default_gauge(Some("999")).unwrap();
    assert!(session.table().find(&fallback).is_some());
}

#[test]
fn table_file_with_legacy_headers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "awg,r_25c\n10,1.018").unwrap();
    let session = Session::from_table_file(file.path());
    assert!(session.load_error().is_none());
    assert_eq!(session.table().len(), 1);
}
