//! AWG 게이지별 선로 저항표(ohm/kft, 25 °C)를 CSV에서 읽어온다.
//!
//! 헤더가 첫 줄에 있어야 하며 `gauge`, `resistance_at_25C` 열은 필수다.
//! 기존 시트 양식의 `awg`, `r_25c` 헤더도 같은 열로 인정한다.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub const GAUGE_COLUMN: &str = "gauge";
pub const RESISTANCE_COLUMN: &str = "resistance_at_25C";

const GAUGE_HEADERS: &[&str] = &[GAUGE_COLUMN, "awg"];
const RESISTANCE_HEADERS: &[&str] = &[RESISTANCE_COLUMN, "r_25c"];

/// 프로그램에 포함된 기본 저항표(구리, AWG 4/0 ~ 30).
const BUILTIN_CSV: &str = include_str!("../../data/wire_resistance.csv");

/// 기존 시트가 열릴 때 선택하던 행 위치.
const DEFAULT_ROW: usize = 10;

/// 저항표 로드 중 발생 가능한 오류.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// 파일이 존재하지 않음
    #[error("wire table not found: {}", .0.display())]
    NotFound(PathBuf),
    /// 파일 입출력 오류
    #[error("failed to read wire table: {0}")]
    Io(#[from] std::io::Error),
    /// 헤더나 데이터 행이 없음
    #[error("wire table is empty")]
    Empty,
    /// 필수 열 누락
    #[error("wire table is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    /// 행 단위 형식 오류 (row는 헤더를 1행으로 센다)
    #[error("malformed wire table at row {row}: {message}")]
    Parse { row: usize, message: String },
    /// 같은 게이지가 두 번 이상 등장
    #[error("duplicate gauge in wire table: {0}")]
    DuplicateGauge(String),
    /// CSV 직렬화 오류
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// 게이지 한 개의 저항 정보. 로드 후에는 변경하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireGaugeEntry {
    #[serde(rename = "gauge")]
    pub gauge: String,
    /// 25 °C 기준 저항 [ohm/kft]
    #[serde(rename = "resistance_at_25C")]
    pub resistance_per_kft: f64,
}

impl WireGaugeEntry {
    pub fn new(gauge: impl Into<String>, resistance_per_kft: f64) -> Self {
        Self {
            gauge: gauge.into(),
            resistance_per_kft,
        }
    }
}

/// 게이지 → 저항 매핑 테이블. 파일의 행 순서를 그대로 유지한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireTable {
    entries: Vec<WireGaugeEntry>,
}

impl WireTable {
    /// 내장 저항표를 반환한다.
    pub fn builtin() -> Self {
        Self::from_reader(BUILTIN_CSV.as_bytes()).unwrap_or_else(|e| {
            tracing::error!(error = %e, "bundled wire table is invalid");
            Self::default()
        })
    }

    /// 검증을 거쳐 항목 목록으로 테이블을 만든다. 게이지 이름의 앞뒤 공백은 제거한다.
    pub fn from_entries(mut entries: Vec<WireGaugeEntry>) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for (i, entry) in entries.iter_mut().enumerate() {
            let trimmed = entry.gauge.trim();
            if trimmed.len() != entry.gauge.len() {
                entry.gauge = trimmed.to_string();
            }
            validate_entry(entry, i + 2)?;
            if !seen.insert(entry.gauge.to_ascii_lowercase()) {
                return Err(DataError::DuplicateGauge(entry.gauge.clone()));
            }
        }
        if entries.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { entries })
    }

    /// 파일 경로에서 저항표를 읽는다.
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        tracing::debug!(path = %path.display(), gauges = table.len(), "wire table loaded");
        Ok(table)
    }

    /// 헤더가 첫 줄에 있는 CSV 스트림에서 저항표를 읽는다.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DataError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| DataError::Parse {
                row: 1,
                message: e.to_string(),
            })?
            .clone();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(DataError::Empty);
        }

        let gauge_idx = find_column(&headers, GAUGE_HEADERS);
        let resistance_idx = find_column(&headers, RESISTANCE_HEADERS);
        let (gauge_idx, resistance_idx) = match (gauge_idx, resistance_idx) {
            (Some(g), Some(r)) => (g, r),
            (g, r) => {
                let mut missing = Vec::new();
                if g.is_none() {
                    missing.push(GAUGE_COLUMN.to_string());
                }
                if r.is_none() {
                    missing.push(RESISTANCE_COLUMN.to_string());
                }
                return Err(DataError::MissingColumns(missing));
            }
        };

        // csv는 빈 줄을 건너뛰므로 행 번호는 원문 바이트 위치로 다시 센다.
        let mut entries = Vec::new();
        let mut last_line = 1;
        for record in rdr.records() {
            let record = record.map_err(|e| DataError::Parse {
                row: e.position().map_or(last_line + 1, |p| line_of(&text, p)),
                message: e.to_string(),
            })?;
            let row = record.position().map_or(last_line + 1, |p| line_of(&text, p));
            last_line = row;
            let gauge = record.get(gauge_idx).unwrap_or_default();
            let raw = record.get(resistance_idx).unwrap_or_default();
            let resistance_per_kft = raw.parse::<f64>().map_err(|_| DataError::Parse {
                row,
                message: format!("resistance '{raw}' is not a number"),
            })?;
            let entry = WireGaugeEntry::new(gauge, resistance_per_kft);
            validate_entry(&entry, row)?;
            entries.push(entry);
        }
        Self::from_entries(entries)
    }

    /// 읽기에 실패하면 경고를 남기고 빈 테이블과 오류를 함께 돌려준다.
    pub fn load_or_empty(path: &Path) -> (Self, Option<DataError>) {
        match Self::from_path(path) {
            Ok(table) => (table, None),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "continuing with empty wire table");
                (Self::default(), Some(e))
            }
        }
    }

    pub fn entries(&self) -> &[WireGaugeEntry] {
        &self.entries
    }

    pub fn gauges(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.gauge.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 게이지 이름으로 항목을 찾는다. 대소문자와 앞뒤 공백은 무시한다.
    pub fn find(&self, gauge: &str) -> Option<&WireGaugeEntry> {
        let key = gauge.trim();
        self.entries
            .iter()
            .find(|e| e.gauge.eq_ignore_ascii_case(key))
    }

    /// 처음 선택할 행. 테이블이 짧으면 마지막 행으로 맞춘다.
    pub fn default_index(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(DEFAULT_ROW.min(self.entries.len() - 1))
        }
    }

    /// 업로드 양식으로 쓸 수 있도록 CSV 문자열로 내보낸다.
    pub fn to_csv(&self) -> Result<String, DataError> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.write_record([GAUGE_COLUMN, RESISTANCE_COLUMN])?;
        for entry in &self.entries {
            wtr.serialize(entry)?;
        }
        finish_csv(wtr)
    }
}

/// CSV writer를 닫고 문자열로 변환한다.
pub(crate) fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String, DataError> {
    let bytes = wtr.into_inner().map_err(|e| DataError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 레코드 위치가 가리키는 파일 줄 번호(1부터). 앞쪽 빈 줄은 건너뛴다.
fn line_of(text: &str, pos: &csv::Position) -> usize {
    let bytes = text.as_bytes();
    let start = (pos.byte() as usize).min(bytes.len());
    let before = bytes[..start].iter().filter(|b| **b == b'\n').count();
    let blank = bytes[start..]
        .iter()
        .take_while(|b| **b == b'\n' || **b == b'\r')
        .filter(|b| **b == b'\n')
        .count();
    before + blank + 1
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h))
}

fn validate_entry(entry: &WireGaugeEntry, row: usize) -> Result<(), DataError> {
    if entry.gauge.trim().is_empty() {
        return Err(DataError::Parse {
            row,
            message: "gauge is blank".into(),
        });
    }
    if !entry.resistance_per_kft.is_finite() || entry.resistance_per_kft < 0.0 {
        return Err(DataError::Parse {
            row,
            message: format!(
                "resistance {} must be a non-negative number",
                entry.resistance_per_kft
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_common_gauges() {
        let table = WireTable::builtin();
        assert!(table.len() > 20);
        let awg14 = table.find("14").expect("AWG 14");
        assert!((awg14.resistance_per_kft - 2.575).abs() < 0.01);
        assert!(table.find("4/0").is_some());
    }

    #[test]
    fn default_index_clamps_to_table_length() {
        let table = WireTable::from_entries(vec![
            WireGaugeEntry::new("10", 1.018),
            WireGaugeEntry::new("12", 1.619),
        ])
        .unwrap();
        assert_eq!(table.default_index(), Some(1));
        assert_eq!(WireTable::default().default_index(), None);
    }

    #[test]
    fn legacy_headers_are_accepted() {
        let csv = "awg,r_25c\n18,6.51\n";
        let table = WireTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.find("18").unwrap().resistance_per_kft, 6.51);
    }

    #[test]
    fn padded_gauge_names_are_trimmed() {
        let table = WireTable::from_entries(vec![
            WireGaugeEntry::new(" 14 ", 2.575),
            WireGaugeEntry::new("12\t", 1.619),
        ])
        .unwrap();
        assert_eq!(table.find(" 14 ").unwrap().gauge, "14");
        assert_eq!(table.find("12").unwrap().gauge, "12");
    }

    #[test]
    fn padded_duplicate_is_still_a_duplicate() {
        let err = WireTable::from_entries(vec![
            WireGaugeEntry::new("14", 2.575),
            WireGaugeEntry::new(" 14", 2.6),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateGauge(ref g) if g == "14"), "{err:?}");
    }

    #[test]
    fn negative_resistance_is_malformed() {
        let csv = "gauge,resistance_at_25C\n18,-1\n";
        let err = WireTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { row: 2, .. }), "{err:?}");
    }
}
