use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{self, Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::logging;
use crate::quantity::QuantityKind;
use crate::session::Session;
use crate::ui_cli::{self, MenuChoice};
use crate::wire::{CalcError, CalculationInput, DataError};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("unit conversion error: {0}")]
    Conversion(#[from] ConversionError),
    /// 저항표 오류
    #[error("wire table error: {0}")]
    Data(#[from] DataError),
    /// 전압강하 계산 오류
    #[error("calculation error: {0}")]
    Calc(#[from] CalcError),
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "voltage_drop_toolbox_cli",
    version,
    about = "DC wire run voltage drop calculator"
)]
pub struct Cli {
    /// Config file path (default: ./voltage_drop.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `voltage_drop_toolbox=trace`
    #[arg(long, global = true)]
    pub log: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one calculation and print the result
    Calc(CalcArgs),
    /// List the gauges in the wire table
    Table {
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Write the wire table as an uploadable CSV file
    ExportTable {
        path: PathBuf,
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Menu driven interactive mode (default)
    Interactive {
        #[arg(long)]
        table: Option<PathBuf>,
    },
}

/// Inputs for `calc`. Omitted values fall back to the configured defaults.
#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Source voltage, e.g. "24 V"
    #[arg(long, allow_hyphen_values = true)]
    pub voltage: Option<String>,
    /// Load current, e.g. "1.5 A" or "750 mA"
    #[arg(long, allow_hyphen_values = true)]
    pub current: Option<String>,
    /// Number of parallel conductors
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub conductors: Option<u32>,
    /// Wire gauge as listed in the table
    #[arg(long)]
    pub gauge: Option<String>,
    /// One-way wire length, e.g. "300 ft" or "90 m"
    #[arg(long)]
    pub length: Option<String>,
    /// Wire table CSV to use instead of the configured one
    #[arg(long)]
    pub table: Option<PathBuf>,
}

/// 인자를 해석해 명령을 실행한다.
pub fn execute(cli: Cli) -> Result<(), AppError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let (mut cfg, config_error) = config::load_or_fallback(&config_path);
    logging::init(cli.log.as_deref().unwrap_or(&cfg.log_filter));
    // 읽지 못한 설정 파일은 덮어쓰지 않는다.
    let save_path = match &config_error {
        Some(e) => {
            tracing::warn!(config = %config_path.display(), error = %e, "using default settings");
            eprintln!("Warning: {e}. Using default settings.");
            None
        }
        None => {
            tracing::debug!(config = %config_path.display(), "configuration loaded");
            Some(config_path.as_path())
        }
    };

    match cli.command {
        Some(Command::Calc(args)) => {
            let session = open_session(&cfg, args.table.as_deref());
            ui_cli::report_load_error(&session);
            let input = build_input(&args, &cfg, &session)?;
            let result = session.calculate(&input)?;
            ui_cli::print_result(&input, &result);
        }
        Some(Command::Table { table }) => {
            let session = open_session(&cfg, table.as_deref());
            ui_cli::report_load_error(&session);
            ui_cli::print_table(&session);
        }
        Some(Command::ExportTable { path, table }) => {
            let mut session = open_session(&cfg, table.as_deref());
            if let Some(e) = session.take_load_error() {
                return Err(e.into());
            }
            session.export_table(&path)?;
            println!("Wire table written to {}", path.display());
        }
        Some(Command::Interactive { table }) => {
            let mut session = open_session(&cfg, table.as_deref());
            run(&mut cfg, save_path, &mut session)?;
        }
        None => {
            let mut session = open_session(&cfg, None);
            run(&mut cfg, save_path, &mut session)?;
        }
    }
    Ok(())
}

/// CLI 대화형 모드의 메인 루프를 실행한다.
///
/// `config_path`가 `None`이면 설정을 저장하지 않는다.
pub fn run(
    config: &mut Config,
    config_path: Option<&Path>,
    session: &mut Session,
) -> Result<(), AppError> {
    ui_cli::report_load_error(session);
    loop {
        match ui_cli::main_menu()? {
            MenuChoice::Calculate => ui_cli::handle_calculate(config, session)?,
            MenuChoice::ShowRecords => ui_cli::handle_show_records(session),
            MenuChoice::ClearRecords => ui_cli::handle_clear_records(session)?,
            MenuChoice::ExportRecords => ui_cli::handle_export_records(session)?,
            MenuChoice::WireTable => ui_cli::print_table(session),
            MenuChoice::UploadTable => ui_cli::handle_upload_table(session)?,
            MenuChoice::DownloadTable => ui_cli::handle_download_table(session)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(config)?;
                if let Some(path) = config_path {
                    config.save_to(path)?;
                }
            }
            MenuChoice::Exit => {
                if let Some(path) = config_path {
                    config.save_to(path)?;
                }
                println!("Exiting.");
                break;
            }
        }
    }
    Ok(())
}

fn open_session(cfg: &Config, table: Option<&Path>) -> Session {
    match table {
        Some(path) => Session::from_table_file(path),
        None => Session::from_config(cfg),
    }
}

/// `calc` 인자와 설정 기본값을 합쳐 계산 입력을 만든다.
pub fn build_input(
    args: &CalcArgs,
    cfg: &Config,
    session: &Session,
) -> Result<CalculationInput, AppError> {
    let source_voltage_v = match &args.voltage {
        Some(s) => conversion::parse_quantity(QuantityKind::Voltage, s)?.value_base,
        None => cfg.defaults.source_voltage_v,
    };
    let load_current_a = match &args.current {
        Some(s) => conversion::parse_quantity(QuantityKind::Current, s)?.value_base,
        None => cfg.defaults.load_current_a,
    };
    let wire_length_ft = match &args.length {
        Some(s) => conversion::parse_quantity(QuantityKind::Length, s)?.value_base,
        None => cfg.default_length_ft(),
    };
    let gauge = match &args.gauge {
        Some(g) => g.trim().to_string(),
        None => session
            .default_gauge(cfg.defaults.gauge.as_deref())
            .ok_or(DataError::Empty)?,
    };
    Ok(CalculationInput {
        source_voltage_v,
        load_current_a,
        conductor_count: args.conductors.unwrap_or(cfg.defaults.conductor_count),
        gauge,
        wire_length_ft,
    })
}

