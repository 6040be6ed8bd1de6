//! 세션 동안 누적되는 계산 기록표.

use crate::wire::{CalculationInput, CalculationResult, DataError};

/// 기록표의 열 제목.
pub const RECORD_HEADERS: [&str; 7] = [
    "Source Voltage",
    "Load Current",
    "Number of Conductors",
    "Conductor Size",
    "Conductor Length",
    "Load Voltage",
    "Percent Drop",
];

/// 입력과 결과를 묶은 기록 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub input: CalculationInput,
    pub result: CalculationResult,
}

impl RecordRow {
    pub fn new(input: CalculationInput, result: CalculationResult) -> Self {
        Self { input, result }
    }

    /// 화면 표시용 셀 문자열. 순서는 `RECORD_HEADERS`와 같다.
    pub fn cells(&self) -> [String; 7] {
        [
            format!("{:.2} V", self.input.source_voltage_v),
            format!("{:.3} A", self.input.load_current_a),
            self.input.conductor_count.to_string(),
            self.input.gauge.clone(),
            format!("{:.1} ft", self.input.wire_length_ft),
            format!("{:.3} V", self.result.load_voltage_v),
            format!("{:.2} %", self.result.percent_drop),
        ]
    }
}

/// 입력 순서를 유지하는 기록표. 중복 제거나 크기 제한은 없다.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    rows: Vec<RecordRow>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, row: RecordRow) {
        self.rows.push(row);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[RecordRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 기록을 단위 없는 숫자 CSV로 내보낸다.
    pub fn to_csv(&self) -> Result<String, DataError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(RECORD_HEADERS)?;
        for row in &self.rows {
            wtr.write_record([
                row.input.source_voltage_v.to_string(),
                row.input.load_current_a.to_string(),
                row.input.conductor_count.to_string(),
                row.input.gauge.clone(),
                row.input.wire_length_ft.to_string(),
                row.result.load_voltage_v.to_string(),
                row.result.percent_drop.to_string(),
            ])?;
        }
        crate::wire::wire_table::finish_csv(wtr)
    }
}
