//! 전압강하 계산 파이프라인 회귀 테스트.
use voltage_drop_toolbox::wire::{
    calculate, total_resistance, voltage_at_load, CalcError, CalculationInput, WireGaugeEntry,
    WireTable,
};

fn reference_table() -> WireTable {
    WireTable::from_entries(vec![
        WireGaugeEntry::new("14", 2.575),
        WireGaugeEntry::new("20", 3.07),
    ])
    .expect("reference table")
}

fn input(gauge: &str, conductors: u32) -> CalculationInput {
    CalculationInput {
        source_voltage_v: 24.0,
        load_current_a: 1.0,
        conductor_count: conductors,
        gauge: gauge.into(),
        wire_length_ft: 300.0,
    }
}

#[test]
fn reference_run_300ft() {
    let r = total_resistance(300.0, 3.07, 1).expect("resistance");
    assert!((r - 1.842).abs() < 1e-9, "r={r}");

    let load = voltage_at_load(24.0, r, 1.0);
    assert!((load.load_voltage_v - 22.158).abs() < 1e-9);
    assert!((load.percent_drop - 7.675).abs() < 1e-6, "pct={}", load.percent_drop);
}

#[test]
fn calculate_joins_table_and_formulas() {
    let res = calculate(&input("20", 1), &reference_table()).expect("calc");
    assert_eq!(res.resistance_per_kft, 3.07);
    assert!((res.total_resistance_ohm - 1.842).abs() < 1e-9);
    assert!((res.drop_v - 1.842).abs() < 1e-9);
    assert!((res.load_voltage_v - 22.158).abs() < 1e-9);
}

#[test]
fn gauge_lookup_ignores_case_and_whitespace() {
    let table = WireTable::from_entries(vec![WireGaugeEntry::new("1/0", 0.1002)]).unwrap();
    let mut inp = input(" 1/0 ", 1);
    assert!(calculate(&inp, &table).is_ok());
    inp.gauge = "2/0".into();
    assert_eq!(
        calculate(&inp, &table),
        Err(CalcError::UnknownGauge("2/0".into()))
    );
}

#[test]
fn zero_drop_gives_exact_zero_percent() {
    let mut inp = input("20", 1);
    inp.load_current_a = 0.0;
    let res = calculate(&inp, &reference_table()).unwrap();
    assert_eq!(res.drop_v, 0.0);
    assert_eq!(res.percent_drop, 0.0);
    assert_eq!(res.load_voltage_v, 24.0);

    inp.load_current_a = 3.0;
    inp.wire_length_ft = 0.0;
    assert_eq!(calculate(&inp, &reference_table()).unwrap().percent_drop, 0.0);
}

#[test]
fn more_conductors_strictly_reduce_resistance() {
    let table = reference_table();
    let values: Vec<f64> = (1..=6)
        .map(|n| calculate(&input("14", n), &table).unwrap().total_resistance_ohm)
        .collect();
    for pair in values.windows(2) {
        assert!(pair[1] < pair[0], "{values:?}");
    }
}

#[test]
fn overloaded_run_passes_through_unclamped() {
    let mut inp = input("20", 1);
    inp.load_current_a = 20.0;
    let res = calculate(&inp, &reference_table()).unwrap();
    assert!(res.load_voltage_v < 0.0);
    assert!(res.percent_drop > 100.0);
}

#[test]
fn zero_conductors_rejected_by_pipeline() {
    assert_eq!(
        calculate(&input("20", 0), &reference_table()),
        Err(CalcError::ZeroConductors)
    );
}

#[test]
fn nan_voltage_rejected() {
    let mut inp = input("20", 1);
    inp.source_voltage_v = f64::NAN;
    assert!(matches!(
        calculate(&inp, &reference_table()),
        Err(CalcError::InvalidInput("source voltage", _))
    ));
}
