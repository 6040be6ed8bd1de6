//! 단위 정의 및 변환 모듈 모음.

pub mod current;
pub mod length;
pub mod voltage;

pub use current::{convert_current, CurrentUnit};
pub use length::{convert_length, LengthUnit};
pub use voltage::{convert_voltage, VoltageUnit};
