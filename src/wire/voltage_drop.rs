use serde::{Deserialize, Serialize};

use super::resistance::{total_resistance, CalcError};
use super::wire_table::WireTable;

/// 부하단 전압 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadVoltage {
    /// 선로 전압강하 [V]
    pub drop_v: f64,
    /// 부하단 전압 [V]
    pub load_voltage_v: f64,
    /// 공급 전압 대비 강하율 [%]
    pub percent_drop: f64,
}

/// 옴의 법칙으로 선로 전압강하와 부하단 전압을 계산한다.
///
/// 결과는 보정하지 않는다. 설계 전류를 넘는 입력이면 부하단 전압이 음수가 되거나
/// 강하율이 100 %를 넘을 수 있으며 그대로 돌려준다.
pub fn voltage_at_load(source_voltage_v: f64, resistance_ohm: f64, current_a: f64) -> LoadVoltage {
    let drop_v = current_a * resistance_ohm;
    let load_voltage_v = source_voltage_v - drop_v;
    let percent_drop = if drop_v == 0.0 {
        0.0
    } else {
        (1.0 - load_voltage_v / source_voltage_v) * 100.0
    };
    LoadVoltage {
        drop_v,
        load_voltage_v,
        percent_drop,
    }
}

/// 전압강하 계산 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// 공급 전압 [V]
    pub source_voltage_v: f64,
    /// 부하 전류 [A]
    pub load_current_a: f64,
    /// 병렬 도체 수 (1 이상)
    pub conductor_count: u32,
    /// 저항표의 게이지 이름
    pub gauge: String,
    /// 편도 선로 길이 [ft]
    pub wire_length_ft: f64,
}

/// 전압강하 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    /// 선택 게이지의 저항 [ohm/kft]
    pub resistance_per_kft: f64,
    /// 왕복 선로 총 저항 [ohm]
    pub total_resistance_ohm: f64,
    pub drop_v: f64,
    pub load_voltage_v: f64,
    pub percent_drop: f64,
}

/// 저항표 조회부터 부하단 전압까지 한 번에 계산한다.
pub fn calculate(
    input: &CalculationInput,
    table: &WireTable,
) -> Result<CalculationResult, CalcError> {
    if !input.source_voltage_v.is_finite() {
        return Err(CalcError::InvalidInput("source voltage", input.source_voltage_v));
    }
    if !input.load_current_a.is_finite() {
        return Err(CalcError::InvalidInput("load current", input.load_current_a));
    }
    let entry = table
        .find(&input.gauge)
        .ok_or_else(|| CalcError::UnknownGauge(input.gauge.clone()))?;
    let r = total_resistance(
        input.wire_length_ft,
        entry.resistance_per_kft,
        input.conductor_count,
    )?;
    let load = voltage_at_load(input.source_voltage_v, r, input.load_current_a);
    Ok(CalculationResult {
        resistance_per_kft: entry.resistance_per_kft,
        total_resistance_ohm: r,
        drop_v: load.drop_v,
        load_voltage_v: load.load_voltage_v,
        percent_drop: load.percent_drop,
    })
}

/// `V_load = 22.16 V (7.68 % drop)` 형태의 요약 문자열.
pub fn format_summary(result: &CalculationResult) -> String {
    format!(
        "V_load = {:.2} V ({:.2} % drop)",
        result.load_voltage_v, result.percent_drop
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_case_24v() {
        let out = voltage_at_load(24.0, 1.842, 1.0);
        assert!((out.load_voltage_v - 22.158).abs() < 1e-9);
        assert!((out.percent_drop - 7.675).abs() < 1e-6, "pct={}", out.percent_drop);
    }

    #[test]
    fn zero_drop_is_exactly_zero_percent() {
        assert_eq!(voltage_at_load(24.0, 0.0, 5.0).percent_drop, 0.0);
        assert_eq!(voltage_at_load(24.0, 1.842, 0.0).percent_drop, 0.0);
        assert_eq!(voltage_at_load(0.0, 0.0, 0.0).percent_drop, 0.0);
    }

    #[test]
    fn overload_is_not_clamped() {
        let out = voltage_at_load(12.0, 2.0, 10.0);
        assert_eq!(out.load_voltage_v, -8.0);
        assert!((out.percent_drop - 166.666_666).abs() < 1e-3);
    }

    #[test]
    fn reverse_current_gives_negative_drop() {
        let out = voltage_at_load(12.0, 1.0, -1.0);
        assert_eq!(out.load_voltage_v, 13.0);
        assert!(out.percent_drop < 0.0);
    }

    #[test]
    fn summary_uses_two_decimals() {
        let res = CalculationResult {
            resistance_per_kft: 3.07,
            total_resistance_ohm: 1.842,
            drop_v: 1.842,
            load_voltage_v: 22.158,
            percent_drop: 7.6752,
        };
        assert_eq!(format_summary(&res), "V_load = 22.16 V (7.68 % drop)");
    }
}
