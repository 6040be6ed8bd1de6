use serde::{Deserialize, Serialize};

/// 길이 단위. 저항표가 ohm/kft 기준이므로 내부 기준은 피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Foot,
    Kilofoot,
    Inch,
    Yard,
    Meter,
    Millimeter,
    Centimeter,
    Kilometer,
}

const FT_PER_M: f64 = 1.0 / 0.3048;

fn to_foot(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Foot => value,
        LengthUnit::Kilofoot => value * 1000.0,
        LengthUnit::Inch => value / 12.0,
        LengthUnit::Yard => value * 3.0,
        LengthUnit::Meter => value * FT_PER_M,
        LengthUnit::Millimeter => value / 1000.0 * FT_PER_M,
        LengthUnit::Centimeter => value / 100.0 * FT_PER_M,
        LengthUnit::Kilometer => value * 1000.0 * FT_PER_M,
    }
}

fn from_foot(value_ft: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Foot => value_ft,
        LengthUnit::Kilofoot => value_ft / 1000.0,
        LengthUnit::Inch => value_ft * 12.0,
        LengthUnit::Yard => value_ft / 3.0,
        LengthUnit::Meter => value_ft / FT_PER_M,
        LengthUnit::Millimeter => value_ft / FT_PER_M * 1000.0,
        LengthUnit::Centimeter => value_ft / FT_PER_M * 100.0,
        LengthUnit::Kilometer => value_ft / FT_PER_M / 1000.0,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let ft = to_foot(value, from);
    from_foot(ft, to)
}

impl LengthUnit {
    /// 화면/CLI 표시용 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Foot => "ft",
            LengthUnit::Kilofoot => "kft",
            LengthUnit::Inch => "in",
            LengthUnit::Yard => "yd",
            LengthUnit::Meter => "m",
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Kilometer => "km",
        }
    }
}
