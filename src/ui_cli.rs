use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::{Config, UnitSystem};
use crate::conversion;
use crate::quantity::QuantityKind;
use crate::record::RECORD_HEADERS;
use crate::session::{Session, UploadOutcome};
use crate::units::{convert_length, LengthUnit};
use crate::wire::{self, CalculationInput, CalculationResult};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Calculate,
    ShowRecords,
    ClearRecords,
    ExportRecords,
    WireTable,
    UploadTable,
    DownloadTable,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu() -> Result<MenuChoice, AppError> {
    println!("\n=== Voltage Drop Toolbox ===");
    println!("1) Calculate voltage drop");
    println!("2) Show records");
    println!("3) Clear records");
    println!("4) Export records to CSV");
    println!("5) Wire table");
    println!("6) Upload wire table (CSV)");
    println!("7) Download wire table (CSV)");
    println!("8) Settings");
    println!("0) Exit");
    loop {
        let sel = read_line("Select: ")?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Calculate),
            "2" => return Ok(MenuChoice::ShowRecords),
            "3" => return Ok(MenuChoice::ClearRecords),
            "4" => return Ok(MenuChoice::ExportRecords),
            "5" => return Ok(MenuChoice::WireTable),
            "6" => return Ok(MenuChoice::UploadTable),
            "7" => return Ok(MenuChoice::DownloadTable),
            "8" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid selection, try again."),
        }
    }
}

/// 입력을 받아 전압강하를 계산하고 기록 여부를 묻는다.
pub fn handle_calculate(cfg: &Config, session: &mut Session) -> Result<(), AppError> {
    println!("\n-- Input --");
    if session.table().is_empty() {
        println!("The wire table is empty. Upload a wire table first.");
        return Ok(());
    }
    let (_, _, length_unit) = cfg.unit_system.preferred_units();
    let default_length = convert_length(cfg.default_length_ft(), LengthUnit::Foot, length_unit);

    let source_voltage_v = read_quantity(
        "Source DC",
        QuantityKind::Voltage,
        &format!("{} V", cfg.defaults.source_voltage_v),
    )?;
    let load_current_a = read_quantity(
        "Current draw",
        QuantityKind::Current,
        &format!("{} A", cfg.defaults.load_current_a),
    )?;
    let conductor_count = read_conductors(cfg.defaults.conductor_count.max(1))?;
    let gauge = read_gauge(session, cfg.defaults.gauge.as_deref())?;
    let wire_length_ft = read_quantity(
        "Length of wire",
        QuantityKind::Length,
        &format!("{default_length:.2} {}", length_unit.symbol()),
    )?;

    let input = CalculationInput {
        source_voltage_v,
        load_current_a,
        conductor_count,
        gauge,
        wire_length_ft,
    };
    let result = match session.calculate(&input) {
        Ok(r) => r,
        Err(e) => {
            println!("Calculation failed: {e}");
            return Ok(());
        }
    };
    print_result(&input, &result);

    let add = read_line("Add to record? [y/N]: ")?;
    if add.trim().eq_ignore_ascii_case("y") {
        session.add_record(&input)?;
        println!("Recorded ({} rows).", session.records().len());
    }
    Ok(())
}

/// 계산 결과를 출력한다.
pub fn print_result(input: &CalculationInput, result: &CalculationResult) {
    println!("\n-- Results --");
    println!(
        "Gauge {}: {} ohm/kft, {} conductor(s), {:.1} ft",
        input.gauge, result.resistance_per_kft, input.conductor_count, input.wire_length_ft
    );
    println!("Wire resistance = {:.4} ohm", result.total_resistance_ohm);
    println!("Voltage drop = {:.4} V", result.drop_v);
    println!("{}", wire::format_summary(result));
    println!();
    for line in wire::FORMULA_NOTES {
        println!("  {line}");
    }
}

pub fn handle_show_records(session: &Session) {
    println!("\n-- Records --");
    let records = session.records();
    if records.is_empty() {
        println!("No records yet.");
        return;
    }
    println!("{}", RECORD_HEADERS.join(" | "));
    for (i, row) in records.rows().iter().enumerate() {
        println!("{:>3}  {}", i + 1, row.cells().join(" | "));
    }
}

pub fn handle_clear_records(session: &mut Session) -> Result<(), AppError> {
    if session.records().is_empty() {
        println!("No records to clear.");
        return Ok(());
    }
    let ans = read_line(&format!("Clear {} record(s)? [y/N]: ", session.records().len()))?;
    if ans.trim().eq_ignore_ascii_case("y") {
        session.clear_records();
        println!("Records cleared.");
    }
    Ok(())
}

pub fn handle_export_records(session: &Session) -> Result<(), AppError> {
    if session.records().is_empty() {
        println!("No records to export.");
        return Ok(());
    }
    let path = read_path("Output CSV path [voltage_records.csv]: ", "voltage_records.csv")?;
    session.export_records(&path)?;
    println!("Records written to {}", path.display());
    Ok(())
}

/// 현재 저항표를 출력한다.
pub fn print_table(session: &Session) {
    println!("\n-- Wire table ({}) --", session.table_source());
    if session.table().is_empty() {
        println!("(empty)");
        return;
    }
    println!("{:>8}  {:>12}", "gauge", "ohm/kft@25C");
    for entry in session.table().entries() {
        println!("{:>8}  {:>12}", entry.gauge, entry.resistance_per_kft);
    }
}

pub fn handle_upload_table(session: &mut Session) -> Result<(), AppError> {
    let raw = read_line("CSV file to upload (empty to cancel): ")?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }
    match session.upload_table_file(&PathBuf::from(raw)) {
        UploadOutcome::Replaced { gauges } => println!("Wire table updated! ({gauges} gauges)"),
        UploadOutcome::Rejected(e) => {
            println!("Warning: {e}");
            println!(
                "The headers need to match the sample download. Keeping the previous table."
            );
        }
    }
    Ok(())
}

pub fn handle_download_table(session: &Session) -> Result<(), AppError> {
    let path = read_path(
        "Output CSV path [sample_wire_resistance.csv]: ",
        "sample_wire_resistance.csv",
    )?;
    session.export_table(&path)?;
    println!("Wire table written to {}", path.display());
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(cfg: &mut Config) -> Result<(), AppError> {
    println!("\n-- Settings --");
    println!("Current unit system: {:?}", cfg.unit_system);
    println!("1) Imperial (ft)  2) Metric (m)");
    let sel = read_line("Change to (enter to cancel): ")?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    cfg.unit_system = match sel.trim() {
        "1" => UnitSystem::Imperial,
        "2" => UnitSystem::Metric,
        _ => {
            println!("Invalid input, unit system unchanged.");
            cfg.unit_system
        }
    };
    println!("Unit system set to {:?}.", cfg.unit_system);
    Ok(())
}

/// 저항표 로드 오류를 사용자에게 알린다.
pub fn report_load_error(session: &Session) {
    if let Some(e) = session.load_error() {
        println!("Warning: {e}. Continuing with an empty wire table.");
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "standard input closed",
        )));
    }
    Ok(buf)
}

/// 단위가 붙은 값을 읽는다. 빈 입력이면 기본값을 사용한다.
fn read_quantity(label: &str, kind: QuantityKind, default: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} [{default}]: "))?;
        let text = if s.trim().is_empty() { default } else { s.trim() };
        match conversion::parse_quantity(kind, text) {
            Ok(q) => return Ok(q.value_base),
            Err(e) => println!("{e}. Enter a number with an optional unit."),
        }
    }
}

fn read_conductors(default: u32) -> Result<u32, AppError> {
    loop {
        let s = read_line(&format!("Number of conductors [{default}]: "))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<u32>() {
            Ok(n) if n >= 1 => return Ok(n),
            _ => println!("Enter a whole number of at least 1."),
        }
    }
}

fn read_gauge(session: &Session, preferred: Option<&str>) -> Result<String, AppError> {
    let default = session.default_gauge(preferred).unwrap_or_default();
    let gauges: Vec<&str> = session.table().gauges().collect();
    println!("Available sizes (AWG): {}", gauges.join(", "));
    loop {
        let s = read_line(&format!("Wire size (AWG) [{default}]: "))?;
        let pick = if s.trim().is_empty() { default.as_str() } else { s.trim() };
        match session.table().find(pick) {
            Some(entry) => return Ok(entry.gauge.clone()),
            None => println!("'{pick}' is not in the wire table."),
        }
    }
}

fn read_path(prompt: &str, default: &str) -> Result<PathBuf, AppError> {
    let s = read_line(prompt)?;
    let s = s.trim();
    Ok(PathBuf::from(if s.is_empty() { default } else { s }))
}
