use crate::quantity::{QuantityKind, QuantityValue};
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 숫자로 해석할 수 없는 값
    #[error("invalid number: {0}")]
    InvalidNumber(String),
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `V`, `mA`, `ft`, `m`, `kft` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Voltage => {
            let from = parse_voltage_unit(from_unit_str)?;
            let to = parse_voltage_unit(to_unit_str)?;
            Ok(convert_voltage(value, from, to))
        }
        QuantityKind::Current => {
            let from = parse_current_unit(from_unit_str)?;
            let to = parse_current_unit(to_unit_str)?;
            Ok(convert_current(value, from, to))
        }
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
    }
}

/// `"24.0 volts"`, `"300ft"`, `"1.5"`처럼 값과 단위가 붙은 문자열을 기준 단위 값으로 읽는다.
///
/// 단위를 생략하면 기준 단위(V, A, ft)로 간주한다.
pub fn parse_quantity(kind: QuantityKind, text: &str) -> Result<QuantityValue, ConversionError> {
    let (num, unit) = split_value_unit(text);
    let value: f64 = num
        .parse()
        .map_err(|_| ConversionError::InvalidNumber(text.trim().to_string()))?;
    let unit = if unit.is_empty() {
        kind.base_symbol()
    } else {
        unit
    };
    let value_base = convert(kind, value, unit, kind.base_symbol())?;
    Ok(QuantityValue { kind, value_base })
}

fn split_value_unit(text: &str) -> (&str, &str) {
    let s = text.trim();
    if let Some((num, unit)) = s.split_once(char::is_whitespace) {
        return (num.trim(), unit.trim());
    }
    let bytes = s.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        let c = bytes[idx];
        let exponent = (c == b'e' || c == b'E')
            && idx > 0
            && bytes
                .get(idx + 1)
                .is_some_and(|n| n.is_ascii_digit() || *n == b'-' || *n == b'+');
        if c.is_ascii_digit() || c == b'.' || c == b'-' || c == b'+' || exponent {
            idx += 1;
        } else {
            break;
        }
    }
    (&s[..idx], s[idx..].trim())
}

pub fn parse_voltage_unit(s: &str) -> Result<VoltageUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "v" | "volt" | "volts" => Ok(VoltageUnit::Volt),
        "mv" | "millivolt" | "millivolts" => Ok(VoltageUnit::MilliVolt),
        "kv" | "kilovolt" | "kilovolts" => Ok(VoltageUnit::KiloVolt),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_current_unit(s: &str) -> Result<CurrentUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "a" | "amp" | "amps" | "ampere" | "amperes" => Ok(CurrentUnit::Ampere),
        "ma" | "milliamp" | "milliampere" | "milliamperes" => Ok(CurrentUnit::MilliAmpere),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.to_lowercase().as_str() {
        "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
        "kft" => Ok(LengthUnit::Kilofoot),
        "in" | "inch" => Ok(LengthUnit::Inch),
        "yd" | "yard" => Ok(LengthUnit::Yard),
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "mm" => Ok(LengthUnit::Millimeter),
        "cm" => Ok(LengthUnit::Centimeter),
        "km" => Ok(LengthUnit::Kilometer),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_attached_and_spaced_units() {
        assert_eq!(split_value_unit("24.0 volts"), ("24.0", "volts"));
        assert_eq!(split_value_unit("300ft"), ("300", "ft"));
        assert_eq!(split_value_unit("1.5e3mA"), ("1.5e3", "mA"));
        assert_eq!(split_value_unit(" 12 "), ("12", ""));
    }

    #[test]
    fn metres_become_feet() {
        let q = parse_quantity(QuantityKind::Length, "100 m").unwrap();
        assert!((q.value_base - 328.084).abs() < 1e-3);
    }

    #[test]
    fn bare_number_uses_base_unit() {
        let q = parse_quantity(QuantityKind::Current, "2.5").unwrap();
        assert_eq!(q.value_base, 2.5);
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = parse_quantity(QuantityKind::Voltage, "12 furlongs").unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("furlongs".into()));
    }
}
