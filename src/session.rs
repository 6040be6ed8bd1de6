//! 사용자 세션 하나가 소유하는 상태와 화면 이벤트 처리기.
//!
//! GUI와 CLI 모두 `Session`을 하나씩 만들어 이벤트마다 넘긴다. 세션 사이에 공유되는
//! 상태는 없다.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::record::{RecordRow, RecordTable};
use crate::wire::{self, CalcError, CalculationInput, CalculationResult, DataError, WireTable};

/// 현재 저항표를 어디서 가져왔는지 나타낸다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Builtin,
    File(PathBuf),
    Upload(String),
}

impl std::fmt::Display for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSource::Builtin => write!(f, "built-in table"),
            TableSource::File(p) => write!(f, "{}", p.display()),
            TableSource::Upload(name) => write!(f, "uploaded {name}"),
        }
    }
}

/// 저항표 업로드 처리 결과.
#[derive(Debug)]
pub enum UploadOutcome {
    /// 새 표로 교체됨
    Replaced { gauges: usize },
    /// 검증 실패. 이전 표를 유지한다.
    Rejected(DataError),
}

impl UploadOutcome {
    pub fn is_replaced(&self) -> bool {
        matches!(self, UploadOutcome::Replaced { .. })
    }
}

/// 사용자 세션 상태.
#[derive(Debug)]
pub struct Session {
    table: WireTable,
    source: TableSource,
    records: RecordTable,
    load_error: Option<DataError>,
}

impl Session {
    pub fn new(table: WireTable) -> Self {
        Self {
            table,
            source: TableSource::Builtin,
            records: RecordTable::new(),
            load_error: None,
        }
    }

    /// 설정의 저항표 경로를 읽어 세션을 만든다. 읽기에 실패해도 빈 표로 계속한다.
    pub fn from_config(cfg: &Config) -> Self {
        match &cfg.wire_table_path {
            Some(path) => Self::from_table_file(path),
            None => Self::new(WireTable::builtin()),
        }
    }

    pub fn from_table_file(path: &Path) -> Self {
        let (table, load_error) = WireTable::load_or_empty(path);
        Self {
            table,
            source: TableSource::File(path.to_path_buf()),
            records: RecordTable::new(),
            load_error,
        }
    }

    pub fn table(&self) -> &WireTable {
        &self.table
    }

    pub fn table_source(&self) -> &TableSource {
        &self.source
    }

    pub fn records(&self) -> &RecordTable {
        &self.records
    }

    /// 세션 시작 시 저항표 로드 오류. 사용자에게 알리는 용도.
    pub fn load_error(&self) -> Option<&DataError> {
        self.load_error.as_ref()
    }

    pub fn take_load_error(&mut self) -> Option<DataError> {
        self.load_error.take()
    }

    /// 처음 선택할 게이지. 선호 게이지가 표에 없으면 표의 기본 행을 쓴다.
    pub fn default_gauge(&self, preferred: Option<&str>) -> Option<String> {
        preferred
            .and_then(|g| self.table.find(g))
            .or_else(|| {
                self.table
                    .default_index()
                    .and_then(|i| self.table.entries().get(i))
            })
            .map(|e| e.gauge.clone())
    }

    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, CalcError> {
        wire::calculate(input, &self.table)
    }

    /// 계산 후 결과를 기록표에 추가한다.
    pub fn add_record(&mut self, input: &CalculationInput) -> Result<&RecordRow, CalcError> {
        let result = self.calculate(input)?;
        self.records.append(RecordRow::new(input.clone(), result));
        tracing::debug!(rows = self.records.len(), gauge = %input.gauge, "record added");
        Ok(&self.records.rows()[self.records.len() - 1])
    }

    pub fn clear_records(&mut self) {
        tracing::debug!(rows = self.records.len(), "records cleared");
        self.records.clear();
    }

    /// 업로드된 CSV로 저항표를 교체한다. 검증에 실패하면 기존 표를 그대로 둔다.
    pub fn upload_table_csv<R: Read>(&mut self, name: &str, reader: R) -> UploadOutcome {
        self.replace_table(name, WireTable::from_reader(reader))
    }

    pub fn upload_table_file(&mut self, path: &Path) -> UploadOutcome {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.replace_table(&name, WireTable::from_path(path))
    }

    fn replace_table(&mut self, name: &str, loaded: Result<WireTable, DataError>) -> UploadOutcome {
        match loaded {
            Ok(table) => {
                let gauges = table.len();
                self.table = table;
                self.source = TableSource::Upload(name.to_string());
                self.load_error = None;
                tracing::info!(file = name, gauges, "wire table updated");
                UploadOutcome::Replaced { gauges }
            }
            Err(e) => {
                tracing::warn!(file = name, error = %e, "uploaded wire table rejected");
                UploadOutcome::Rejected(e)
            }
        }
    }

    /// 현재 저항표를 업로드 양식 CSV로 돌려준다.
    pub fn download_table_csv(&self) -> Result<String, DataError> {
        self.table.to_csv()
    }

    pub fn export_table(&self, path: &Path) -> Result<(), DataError> {
        let csv = self.download_table_csv()?;
        std::fs::write(path, csv)?;
        tracing::info!(path = %path.display(), "wire table exported");
        Ok(())
    }

    pub fn export_records(&self, path: &Path) -> Result<(), DataError> {
        let csv = self.records.to_csv()?;
        std::fs::write(path, csv)?;
        tracing::info!(path = %path.display(), rows = self.records.len(), "records exported");
        Ok(())
    }
}
