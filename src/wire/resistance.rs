/// 저항표 단위(ohm/kft)를 피트 길이에 맞추기 위한 환산값.
pub const FEET_PER_KILOFOOT: f64 = 1000.0;

/// 선로 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    /// 도체 수가 0
    #[error("conductor count must be at least 1")]
    ZeroConductors,
    /// 음수/NaN 등 계산에 쓸 수 없는 입력
    #[error("invalid {0}: {1}")]
    InvalidInput(&'static str, f64),
    /// 저항표에 없는 게이지
    #[error("gauge '{0}' is not in the wire table")]
    UnknownGauge(String),
}

/// 왕복 선로의 총 저항[ohm]을 계산한다.
///
/// 공급선과 귀환선을 모두 포함하므로 길이에 2를 곱하고, 병렬 도체 수로 나눈다.
pub fn total_resistance(
    length_ft: f64,
    resistance_per_kft: f64,
    conductor_count: u32,
) -> Result<f64, CalcError> {
    if conductor_count == 0 {
        return Err(CalcError::ZeroConductors);
    }
    if !length_ft.is_finite() || length_ft < 0.0 {
        return Err(CalcError::InvalidInput("wire length", length_ft));
    }
    if !resistance_per_kft.is_finite() || resistance_per_kft < 0.0 {
        return Err(CalcError::InvalidInput("resistance per kft", resistance_per_kft));
    }
    Ok(2.0 * length_ft * resistance_per_kft / FEET_PER_KILOFOOT / f64::from(conductor_count))
}
