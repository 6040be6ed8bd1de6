#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path};
use voltage_drop_toolbox::{
    config, logging,
    record::RECORD_HEADERS,
    session::{Session, UploadOutcome},
    units::{convert_current, convert_length, convert_voltage, CurrentUnit, LengthUnit, VoltageUnit},
    wire::{self, CalculationInput},
};

fn main() -> Result<(), eframe::Error> {
    let (app_cfg, config_error) = config::load_or_fallback(Path::new(config::CONFIG_FILE));
    logging::init(&app_cfg.log_filter);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default settings");
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Voltage Drop Toolbox")
        .with_inner_size([960.0, 760.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Voltage Drop Toolbox",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn legend_toggle(ui: &mut egui::Ui, title: &str, lines: &[&str], state: &mut bool) {
    ui.horizontal(|ui| {
        ui.checkbox(state, title);
    });
    if *state {
        for line in lines {
            ui.add(egui::Label::new(egui::RichText::new(*line).small().monospace()).wrap(true));
        }
    }
}

/// 단위 선택 콤보박스.
fn unit_combo<T: Copy + PartialEq>(
    ui: &mut egui::Ui,
    id: &str,
    value: &mut T,
    options: &[T],
    symbol: fn(&T) -> &'static str,
) {
    egui::ComboBox::from_id_source(id)
        .width(64.0)
        .selected_text(symbol(value))
        .show_ui(ui, |ui| {
            for opt in options {
                ui.selectable_value(value, *opt, symbol(opt));
            }
        });
}

const VOLTAGE_UNITS: &[VoltageUnit] = &[VoltageUnit::Volt, VoltageUnit::MilliVolt, VoltageUnit::KiloVolt];
const CURRENT_UNITS: &[CurrentUnit] = &[CurrentUnit::Ampere, CurrentUnit::MilliAmpere];
const LENGTH_UNITS: &[LengthUnit] = &[
    LengthUnit::Foot,
    LengthUnit::Kilofoot,
    LengthUnit::Yard,
    LengthUnit::Inch,
    LengthUnit::Meter,
    LengthUnit::Kilometer,
    LengthUnit::Centimeter,
    LengthUnit::Millimeter,
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum StatusKind {
    Success,
    Warning,
}

#[derive(Clone, Debug)]
struct Status {
    kind: StatusKind,
    text: String,
}

impl Status {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }
}

struct GuiApp {
    config: config::Config,
    session: Session,
    voltage: f64,
    voltage_unit: VoltageUnit,
    current: f64,
    current_unit: CurrentUnit,
    length: f64,
    length_unit: LengthUnit,
    conductors: u32,
    gauge: String,
    table_status: Option<Status>,
    record_status: Option<Status>,
    show_settings_modal: bool,
    show_legend: bool,
    window_alpha: f32,
    ui_scale: f32,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let session = Session::from_config(&config);
        let table_status = session.load_error().map(|e| {
            Status::warning(format!("{e}. Continuing with an empty wire table."))
        });
        let gauge = session
            .default_gauge(config.defaults.gauge.as_deref())
            .unwrap_or_default();
        let mut app = Self {
            voltage: config.defaults.source_voltage_v,
            voltage_unit: VoltageUnit::Volt,
            current: config.defaults.load_current_a,
            current_unit: CurrentUnit::Ampere,
            length: config.defaults.wire_length,
            length_unit: config.defaults.length_unit,
            conductors: config.defaults.conductor_count.max(1),
            gauge,
            table_status,
            record_status: None,
            show_settings_modal: false,
            show_legend: true,
            window_alpha: config.window_alpha,
            ui_scale: 1.0,
            save_status: None,
            session,
            config,
        };
        let system = app.config.unit_system;
        app.apply_unit_preset(system);
        app
    }

    /// 단위 시스템 프리셋을 입력 단위에 반영한다. 값은 같은 물리량이 되도록 환산한다.
    pub(crate) fn apply_unit_preset(&mut self, system: config::UnitSystem) {
        let (v_unit, i_unit, l_unit) = system.preferred_units();
        self.voltage = convert_voltage(self.voltage, self.voltage_unit, v_unit);
        self.voltage_unit = v_unit;
        self.current = convert_current(self.current, self.current_unit, i_unit);
        self.current_unit = i_unit;
        self.length = convert_length(self.length, self.length_unit, l_unit);
        self.length_unit = l_unit;
    }

    /// 화면 입력값을 기준 단위(V, A, ft)로 바꾼 계산 입력.
    fn current_input(&self) -> CalculationInput {
        CalculationInput {
            source_voltage_v: convert_voltage(self.voltage, self.voltage_unit, VoltageUnit::Volt),
            load_current_a: convert_current(self.current, self.current_unit, CurrentUnit::Ampere),
            conductor_count: self.conductors,
            gauge: self.gauge.clone(),
            wire_length_ft: convert_length(self.length, self.length_unit, LengthUnit::Foot),
        }
    }

    fn upload_from_path(&mut self, path: &Path) {
        self.table_status = Some(match self.session.upload_table_file(path) {
            UploadOutcome::Replaced { gauges } => {
                Status::success(format!("Wire Table updated! ({gauges} sizes)"))
            }
            UploadOutcome::Rejected(e) => Status::warning(format!(
                "{e}. The headers need to remain from the sample download. Try again."
            )),
        });
        if self.session.table().find(&self.gauge).is_none() {
            self.gauge = self
                .session
                .default_gauge(self.config.defaults.gauge.as_deref())
                .unwrap_or_default();
        }
    }

    fn download_to_path(&mut self, path: &Path) {
        self.table_status = Some(match self.session.export_table(path) {
            Ok(()) => Status::success(format!("Saved {}", path.display())),
            Err(e) => Status::warning(format!("Download failed: {e}")),
        });
    }

    fn status_label(ui: &mut egui::Ui, status: &Status) {
        let color = match status.kind {
            StatusKind::Success => egui::Color32::from_rgb(40, 160, 70),
            StatusKind::Warning => ui.visuals().warn_fg_color,
        };
        ui.colored_label(color, &status.text);
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        heading_with_tip(ui, "Input", "Values are converted to V, A and ft before calculating.");
        ui.add_space(4.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("input_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(ui, "Source DC", "Voltage at the supply end");
                    ui.horizontal(|ui| {
                        ui.add(egui::DragValue::new(&mut self.voltage).speed(0.1).max_decimals(3));
                        unit_combo(ui, "voltage_unit", &mut self.voltage_unit, VOLTAGE_UNITS, VoltageUnit::symbol);
                    });
                    ui.end_row();

                    label_with_tip(ui, "Current Draw", "Load current through the wire run");
                    ui.horizontal(|ui| {
                        ui.add(egui::DragValue::new(&mut self.current).speed(0.05).max_decimals(3));
                        unit_combo(ui, "current_unit", &mut self.current_unit, CURRENT_UNITS, CurrentUnit::symbol);
                    });
                    ui.end_row();

                    label_with_tip(ui, "Number of Conductors", "Parallel conductors per leg");
                    ui.add(egui::DragValue::new(&mut self.conductors).clamp_range(1..=100).speed(0.1));
                    ui.end_row();

                    label_with_tip(ui, "Wire Size (AWG)", "Rows of the active wire table");
                    let gauges: Vec<String> = self.session.table().gauges().map(String::from).collect();
                    let selected = if self.gauge.is_empty() {
                        "(no wire table)".to_string()
                    } else {
                        self.gauge.clone()
                    };
                    egui::ComboBox::from_id_source("gauge")
                        .selected_text(selected)
                        .show_ui(ui, |ui| {
                            for g in gauges {
                                ui.selectable_value(&mut self.gauge, g.clone(), g);
                            }
                        });
                    ui.end_row();

                    label_with_tip(ui, "Length of Wire", "One-way length of the run");
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::DragValue::new(&mut self.length)
                                .speed(1.0)
                                .clamp_range(0.0..=f64::MAX)
                                .max_decimals(2),
                        );
                        unit_combo(ui, "length_unit", &mut self.length_unit, LENGTH_UNITS, LengthUnit::symbol);
                    });
                    ui.end_row();
                });
        });
    }

    fn ui_upload(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Upload Wire Data")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(format!("Active table: {}", self.session.table_source()));
                ui.label("Upload a properly formatted csv file containing wire properties.");
                ui.horizontal(|ui| {
                    if ui.button("Upload csv...").clicked() {
                        if let Some(path) = FileDialog::new().add_filter("csv", &["csv"]).pick_file() {
                            self.upload_from_path(&path);
                        }
                    }
                    if ui.button("Download sample csv").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("csv", &["csv"])
                            .set_file_name("sample_wire_resistance.csv")
                            .save_file()
                        {
                            self.download_to_path(&path);
                        }
                    }
                });
                if let Some(status) = &self.table_status {
                    Self::status_label(ui, status);
                }
            });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let input = self.current_input();
        match self.session.calculate(&input) {
            Ok(result) => {
                ui.small(format!("Wire Resistance = {:.4} ohm", result.total_resistance_ohm));
                ui.separator();
                ui.heading("Results");
                ui.label(egui::RichText::new(wire::format_summary(&result)).size(18.0));
                ui.add_space(6.0);
                if ui.button("Add to Record").clicked() {
                    self.record_status = match self.session.add_record(&input) {
                        Ok(_) => None,
                        Err(e) => Some(Status::warning(e.to_string())),
                    };
                }
            }
            Err(e) => {
                ui.separator();
                ui.heading("Results");
                ui.colored_label(ui.visuals().warn_fg_color, format!("Cannot calculate: {e}"));
            }
        }
    }

    fn ui_records(&mut self, ui: &mut egui::Ui) {
        if let Some(status) = &self.record_status {
            Self::status_label(ui, status);
        }
        if self.session.records().is_empty() {
            return;
        }
        ui.add_space(6.0);
        egui::ScrollArea::horizontal().id_source("records_scroll").show(ui, |ui| {
            egui::Grid::new("record_grid")
                .striped(true)
                .num_columns(RECORD_HEADERS.len() + 1)
                .spacing([14.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("#");
                    for h in RECORD_HEADERS {
                        ui.strong(h);
                    }
                    ui.end_row();
                    for (i, row) in self.session.records().rows().iter().enumerate() {
                        ui.label((i + 1).to_string());
                        for cell in row.cells() {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });
        });
        ui.horizontal(|ui| {
            if ui.button("Clear Records").clicked() {
                self.session.clear_records();
                self.record_status = None;
            }
            if ui.button("Export records...").clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("csv", &["csv"])
                    .set_file_name("voltage_records.csv")
                    .save_file()
                {
                    self.record_status = match self.session.export_records(&path) {
                        Ok(()) => Some(Status::success(format!("Saved {}", path.display()))),
                        Err(e) => Some(Status::warning(format!("Export failed: {e}"))),
                    };
                }
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Voltage Drop Toolbox");
                ui.label(" | DC wire run");
                ui.separator();
                if ui.button("Settings").clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            let mut new_unit_system = self.config.unit_system;
            egui::Window::new("Program Settings")
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label("Unit system preset");
                    ui.horizontal(|ui| {
                        for (label, us) in [
                            ("Imperial (ft)", config::UnitSystem::Imperial),
                            ("Metric (m)", config::UnitSystem::Metric),
                        ] {
                            ui.selectable_value(&mut new_unit_system, us, label);
                        }
                    });
                    ui.separator();
                    ui.label("UI scale");
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.label("Window transparency");
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    if ui.button("Save settings").clicked() {
                        self.config.window_alpha = self.window_alpha;
                        self.save_status = Some(match self.config.save() {
                            Ok(()) => "Saved.".to_string(),
                            Err(e) => format!("Save error: {e}"),
                        });
                    }
                    if let Some(msg) = &self.save_status {
                        ui.label(msg);
                    }
                });
            if new_unit_system != self.config.unit_system {
                self.config.unit_system = new_unit_system;
                self.apply_unit_preset(new_unit_system);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_inputs(ui);
                    ui.add_space(8.0);
                    self.ui_upload(ui);
                    ui.add_space(8.0);
                    self.ui_results(ui);
                    self.ui_records(ui);
                    ui.separator();
                    legend_toggle(ui, "Formulas", wire::FORMULA_NOTES, &mut self.show_legend);
                });
        });
    }
}
