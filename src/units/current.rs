use serde::{Deserialize, Serialize};

/// 전류 단위. 내부 기준은 암페어이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentUnit {
    Ampere,
    MilliAmpere,
}

/// 전류를 다른 단위로 변환한다.
pub fn convert_current(value: f64, from: CurrentUnit, to: CurrentUnit) -> f64 {
    let amp = match from {
        CurrentUnit::Ampere => value,
        CurrentUnit::MilliAmpere => value / 1000.0,
    };
    match to {
        CurrentUnit::Ampere => amp,
        CurrentUnit::MilliAmpere => amp * 1000.0,
    }
}

impl CurrentUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrentUnit::Ampere => "A",
            CurrentUnit::MilliAmpere => "mA",
        }
    }
}
