//! 직류 선로 전압강하 계산 모듈 모음.
//! 게이지 저항표, 왕복 선로 저항, 부하단 전압 계산으로 구성한다.

pub mod resistance;
pub mod voltage_drop;
pub mod wire_table;

pub use resistance::*;
pub use voltage_drop::*;
pub use wire_table::*;

/// 결과 아래에 표시하는 공식 설명.
pub const FORMULA_NOTES: &[&str] = &[
    "Wire resistance: R_wire = 2 × L_wire × R_length / 1000 / n_conductors",
    "Voltage at the load: V_load = V_source - I_wire × R_wire",
    "Percent drop: (1 - V_load / V_source) × 100, 0 when there is no drop",
];
