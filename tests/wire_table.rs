//! 저항표 CSV 로드/검증 테스트.
use std::io::Write;

use tempfile::NamedTempFile;
use voltage_drop_toolbox::wire::{DataError, WireTable};

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_table_from_file_in_row_order() {
    let file = csv_file("gauge,resistance_at_25C\n10,1.018\n12,1.619\n14,2.575\n");
    let table = WireTable::from_path(file.path()).expect("load");
    let gauges: Vec<&str> = table.gauges().collect();
    assert_eq!(gauges, ["10", "12", "14"]);
    assert_eq!(table.find("12").unwrap().resistance_per_kft, 1.619);
}

#[test]
fn extra_columns_and_padding_are_ignored() {
    let csv = "material, gauge ,diameter_in, resistance_at_25C\ncopper, 18 ,0.0403, 6.51\n";
    let table = WireTable::from_reader(csv.as_bytes()).expect("load");
    assert_eq!(table.len(), 1);
    assert_eq!(table.find("18").unwrap().resistance_per_kft, 6.51);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = WireTable::from_path(&path).unwrap_err();
    assert!(matches!(err, DataError::NotFound(ref p) if p == &path), "{err:?}");
}

#[test]
fn load_or_empty_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    let (table, err) = WireTable::load_or_empty(&dir.path().join("nope.csv"));
    assert!(table.is_empty());
    assert!(matches!(err, Some(DataError::NotFound(_))));
}

#[test]
fn empty_sources_are_rejected() {
    assert!(matches!(
        WireTable::from_reader("".as_bytes()),
        Err(DataError::Empty)
    ));
    assert!(matches!(
        WireTable::from_reader("gauge,resistance_at_25C\n".as_bytes()),
        Err(DataError::Empty)
    ));
}

#[test]
fn missing_columns_are_listed() {
    let err = WireTable::from_reader("size,ohms\n14,2.5\n".as_bytes()).unwrap_err();
    match err {
        DataError::MissingColumns(cols) => {
            assert_eq!(cols, vec!["gauge".to_string(), "resistance_at_25C".to_string()])
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = WireTable::from_reader("gauge,ohms\n14,2.5\n".as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::MissingColumns(ref c) if c == &["resistance_at_25C"]));
}

#[test]
fn malformed_rows_report_row_number() {
    let err = WireTable::from_reader("gauge,resistance_at_25C\n14,2.5\n12,abc\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { row: 3, .. }), "{err:?}");

    let err = WireTable::from_reader("gauge,resistance_at_25C\n14,2.5,extra\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { row: 2, .. }), "{err:?}");
}

#[test]
fn blank_lines_do_not_shift_row_numbers() {
    let err = WireTable::from_reader("gauge,resistance_at_25C\n14,2.5\n\n\n12,abc\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { row: 5, .. }), "{err:?}");

    let err = WireTable::from_reader("gauge,resistance_at_25C\n\n14,-2.5\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { row: 3, .. }), "{err:?}");

    let err = WireTable::from_reader("gauge,resistance_at_25C\n14,2.5\n\n12,1.6,extra\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::Parse { row: 4, .. }), "{err:?}");
}

#[test]
fn duplicate_gauges_rejected() {
    let err = WireTable::from_reader("gauge,resistance_at_25C\n14,2.5\n14,2.6\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, DataError::DuplicateGauge(ref g) if g == "14"));
}

#[test]
fn exported_csv_loads_back_identically() {
    let table = WireTable::builtin();
    let csv = table.to_csv().expect("to_csv");
    assert!(csv.starts_with("gauge,resistance_at_25C\n"));
    let reloaded = WireTable::from_reader(csv.as_bytes()).expect("reload");
    assert_eq!(reloaded, table);
}
