use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::units::{CurrentUnit, LengthUnit, VoltageUnit};

/// 설정 파일 이름. 작업 디렉터리에 저장한다.
pub const CONFIG_FILE: &str = "voltage_drop.toml";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// 피트 기준. 저항표(ohm/kft)와 같은 단위.
    Imperial,
    /// 미터 기준
    Metric,
}

impl UnitSystem {
    /// 프리셋에 맞는 기본 입력 단위.
    pub fn preferred_units(&self) -> (VoltageUnit, CurrentUnit, LengthUnit) {
        match self {
            UnitSystem::Imperial => (VoltageUnit::Volt, CurrentUnit::Ampere, LengthUnit::Foot),
            UnitSystem::Metric => (VoltageUnit::Volt, CurrentUnit::Ampere, LengthUnit::Meter),
        }
    }
}

/// 화면을 처음 열었을 때 채워 둘 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultInputs {
    pub source_voltage_v: f64,
    pub load_current_a: f64,
    /// 기본 길이 값. 단위는 `length_unit`을 따른다.
    pub wire_length: f64,
    pub length_unit: LengthUnit,
    pub conductor_count: u32,
    /// 저항표에 없으면 표의 기본 행을 사용한다.
    pub gauge: Option<String>,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            source_voltage_v: 24.0,
            load_current_a: 1.0,
            wire_length: 300.0,
            length_unit: LengthUnit::Foot,
            conductor_count: 1,
            gauge: None,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    /// 사용자 저항표 CSV 경로. 없으면 내장 표를 사용한다.
    pub wire_table_path: Option<PathBuf>,
    /// tracing 필터 (`RUST_LOG`가 있으면 그쪽이 우선)
    pub log_filter: String,
    pub window_alpha: f32,
    pub defaults: DefaultInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Imperial,
            wire_table_path: None,
            log_filter: "info".to_string(),
            window_alpha: 1.0,
            defaults: DefaultInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config file i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 지정한 경로의 설정을 읽고, 파일이 없으면 기본값을 저장한 뒤 돌려준다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

/// 설정을 읽지 못하면 기본 설정과 오류를 함께 돌려준다. 보고는 호출자가 한다.
pub fn load_or_fallback(path: &Path) -> (Config, Option<ConfigError>) {
    match load_or_create(path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

impl Config {
    /// 설정을 voltage_drop.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 기본 길이를 피트로 환산한다.
    pub fn default_length_ft(&self) -> f64 {
        crate::units::convert_length(
            self.defaults.wire_length,
            self.defaults.length_unit,
            LengthUnit::Foot,
        )
    }
}
