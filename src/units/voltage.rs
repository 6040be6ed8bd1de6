use serde::{Deserialize, Serialize};

/// 전압 단위. 내부 기준은 볼트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoltageUnit {
    Volt,
    MilliVolt,
    KiloVolt,
}

fn to_volt(value: f64, unit: VoltageUnit) -> f64 {
    match unit {
        VoltageUnit::Volt => value,
        VoltageUnit::MilliVolt => value / 1000.0,
        VoltageUnit::KiloVolt => value * 1000.0,
    }
}

fn from_volt(value_v: f64, unit: VoltageUnit) -> f64 {
    match unit {
        VoltageUnit::Volt => value_v,
        VoltageUnit::MilliVolt => value_v * 1000.0,
        VoltageUnit::KiloVolt => value_v / 1000.0,
    }
}

/// 전압을 다른 단위로 변환한다.
pub fn convert_voltage(value: f64, from: VoltageUnit, to: VoltageUnit) -> f64 {
    from_volt(to_volt(value, from), to)
}

impl VoltageUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            VoltageUnit::Volt => "V",
            VoltageUnit::MilliVolt => "mV",
            VoltageUnit::KiloVolt => "kV",
        }
    }
}
