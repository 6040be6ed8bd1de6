/// 입력으로 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Voltage,
    Current,
    Length,
}

impl QuantityKind {
    /// 내부 기준 단위 기호. 단위 없이 숫자만 입력하면 이 단위로 해석한다.
    pub fn base_symbol(&self) -> &'static str {
        match self {
            QuantityKind::Voltage => "V",
            QuantityKind::Current => "A",
            QuantityKind::Length => "ft",
        }
    }
}

/// 내부 기준 단위로 환산된 값을 담는 컨테이너.
///
/// `value_base`는 전압=V, 전류=A, 길이=ft 기준으로 저장한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityValue {
    pub kind: QuantityKind,
    pub value_base: f64,
}
