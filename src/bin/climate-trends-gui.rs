/*!
 * Desktop dashboard for climate-trends
 *
 * One panel per visualization with the dashboard's controls:
 * - Country, year, season and gas dropdowns
 * - "Update Chart" button for the heat-content bars
 * - Export of every panel as JSON
 *
 * Each control change goes through the session scheduler, so only the
 * panels wired to that control are recomputed.
 */

use climate_trends::charts::{Bar as ChartBar, Emphasis, Figure, Series, Tone};
use climate_trends::storage::{self, DatasetFiles};
use climate_trends::{ControlChange, Dashboard, DashError, DatasetStore, VizId};
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Visualizing Global Trends In Climate"),
        ..Default::default()
    };

    eframe::run_native(
        "Climate Trends",
        options,
        Box::new(|_cc| Ok(Box::new(ClimateApp::new()))),
    )
}

struct ClimateApp {
    data_dir: String,
    output_path: String,

    dashboard: Option<Dashboard>,

    is_loading: bool,
    status_message: String,
    error_message: String,

    load_receiver: Option<mpsc::Receiver<Result<DatasetStore, String>>>,
}

impl ClimateApp {
    fn new() -> Self {
        let output_path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();
        let mut app = Self {
            data_dir: "dataset".to_string(),
            output_path,
            dashboard: None,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            load_receiver: None,
        };
        app.start_loading();
        app
    }

    fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message.clear();
        self.status_message = format!("Loading datasets from {}...", self.data_dir);

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);
        let dir = PathBuf::from(&self.data_dir);

        thread::spawn(move || {
            let result = storage::load_store(&dir, &DatasetFiles::default())
                .map_err(|e| format!("{e:#}"));
            let _ = sender.send(result);
        });
    }

    fn check_loading(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;
            match result {
                Ok(store) => {
                    self.dashboard = Some(Dashboard::new(Arc::new(store)));
                    self.status_message = "Datasets loaded".to_string();
                }
                Err(err) => {
                    self.dashboard = None;
                    self.status_message.clear();
                    self.error_message = err;
                }
            }
        }
    }

    fn apply(&mut self, change: ControlChange) {
        let Some(dash) = self.dashboard.as_mut() else {
            return;
        };
        match dash.apply(change) {
            Ok(ids) => {
                let names: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                self.status_message = format!("Updated: {}", names.join(", "));
                self.error_message.clear();
            }
            Err(err) => self.error_message = err.to_string(),
        }
    }

    fn export_all(&mut self) {
        let Some(dash) = self.dashboard.as_ref() else {
            return;
        };
        let dir = PathBuf::from(&self.output_path);
        let mut written = Vec::new();
        for (id, lane) in dash.lanes() {
            if let Ok(fig) = lane {
                let path = dir.join(format!("{id}.json"));
                if let Err(err) = storage::save_figure_json(fig, &path) {
                    self.error_message = format!("Failed to save {}: {}", path.display(), err);
                    return;
                }
                written.push(path.to_string_lossy().to_string());
            }
        }
        self.status_message = format!("Files created:\n{}", written.join("\n"));
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        let Some(dash) = self.dashboard.as_ref() else {
            return;
        };
        let opts = dash.options().clone();
        let state = dash.controls().clone();
        let mut pending: Option<ControlChange> = None;
        let mut reset = false;

        ui.horizontal_wrapped(|ui| {
            let mut country = state.country().to_string();
            combo(ui, "Country", "country", &mut country, &opts.countries);
            if country != state.country() {
                pending = Some(ControlChange::SelectedCountry(country));
            }

            let mut year = state.year();
            egui::ComboBox::from_id_salt("year")
                .selected_text(year.to_string())
                .show_ui(ui, |ui| {
                    for y in &opts.years {
                        ui.selectable_value(&mut year, *y, y.to_string());
                    }
                });
            if year != state.year() {
                pending = Some(ControlChange::SelectedYear(year));
            }

            let mut season = state.season().to_string();
            combo(ui, "Season", "season", &mut season, &opts.seasons);
            if season != state.season() {
                pending = Some(ControlChange::SelectedSeason(season));
            }

            let mut gas = state.gas().to_string();
            combo(ui, "Gas", "gas", &mut gas, &opts.gases);
            if gas != state.gas() {
                pending = Some(ControlChange::SelectedGas(gas));
            }

            if ui.button("Update Chart").clicked() {
                pending = Some(state.next_click());
            }
            if ui.button("Reset").clicked() {
                reset = true;
            }
        });

        if reset {
            self.dashboard = self.dashboard.as_ref().map(Dashboard::new_session);
            self.status_message = "Controls reset".to_string();
            return;
        }
        if let Some(change) = pending {
            self.apply(change);
        }
    }
}

fn combo(ui: &mut egui::Ui, label: &str, id: &str, value: &mut String, options: &[String]) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(value.clone())
        .show_ui(ui, |ui| {
            for opt in options {
                ui.selectable_value(value, opt.clone(), opt.as_str());
            }
        });
}

fn lane_ui(ui: &mut egui::Ui, id: VizId, lane: &Result<Arc<Figure>, DashError>) {
    ui.group(|ui| {
        ui.heading(id.title());
        match lane {
            Ok(fig) => figure_ui(ui, id, fig),
            Err(err) => {
                ui.colored_label(egui::Color32::RED, err.to_string());
            }
        }
    });
    ui.add_space(10.0);
}

fn figure_ui(ui: &mut egui::Ui, id: VizId, fig: &Figure) {
    match fig {
        Figure::Lines { series } => {
            Plot::new(id.as_str())
                .height(260.0)
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    for s in series {
                        for line in series_lines(s, false) {
                            plot_ui.line(line);
                        }
                    }
                });
        }
        Figure::Area { series } => {
            Plot::new(id.as_str()).height(260.0).show(ui, |plot_ui| {
                for line in series_lines(series, true) {
                    plot_ui.line(line);
                }
            });
        }
        Figure::Bars { bars } => {
            Plot::new(id.as_str()).height(260.0).show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(plot_bars(bars)));
            });
        }
        Figure::Choropleth(map) => {
            ui.label(format!("{} regions for {}", map.regions.len(), map.year));
            egui::ScrollArea::vertical()
                .id_salt(id.as_str())
                .max_height(180.0)
                .show(ui, |ui| {
                    egui::Grid::new(id.as_str()).striped(true).show(ui, |ui| {
                        for r in &map.regions {
                            ui.label(r.code.as_deref().unwrap_or("-"));
                            ui.label(r.label.as_str());
                            ui.label(r.value.map(|v| format!("{v:.3}")).unwrap_or_default());
                            ui.end_row();
                        }
                    });
                });
        }
        Figure::Pie { slices } => {
            egui::Grid::new(id.as_str()).striped(true).show(ui, |ui| {
                for s in slices {
                    ui.label(s.category.as_str());
                    ui.label(format!("{:.1} %", s.percentage));
                    ui.end_row();
                }
            });
        }
        Figure::Outline { text } => {
            ui.label(egui::RichText::new(text).monospace());
        }
    }
}

/// One plot line per run of present values, all sharing the series name.
fn series_lines(s: &Series, filled: bool) -> Vec<Line> {
    let width = match s.emphasis {
        Emphasis::Emphasized => 2.0,
        Emphasis::Normal => 1.5,
        Emphasis::Muted => 0.5,
    };
    let mut runs: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut cur = Vec::new();
    for p in &s.points {
        match p.y {
            Some(y) => cur.push([p.x as f64, y]),
            None => runs.push(std::mem::take(&mut cur)),
        }
    }
    runs.push(cur);
    runs.into_iter()
        .filter(|r| !r.is_empty())
        .map(|r| {
            let line = Line::new(r).name(&s.name).width(width);
            if filled { line.fill(0.0) } else { line }
        })
        .collect()
}

fn plot_bars(bars: &[ChartBar]) -> Vec<Bar> {
    bars.iter()
        .enumerate()
        .map(|(i, b)| {
            let color = match b.tone {
                Tone::BelowBaseline => egui::Color32::from_rgb(214, 39, 40),
                Tone::AtOrAboveBaseline => egui::Color32::from_rgb(44, 160, 44),
            };
            Bar::new(i as f64, b.value).name(&b.label).fill(color).width(0.8)
        })
        .collect()
}

impl eframe::App for ClimateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Visualizing Global Trends In Climate");
            ui.horizontal(|ui| {
                ui.label("Data directory:");
                ui.text_edit_singleline(&mut self.data_dir);
                if ui.button("Browse").clicked()
                    && let Some(path) = rfd::FileDialog::new().pick_folder()
                {
                    self.data_dir = path.to_string_lossy().to_string();
                }
                if ui
                    .add_enabled(!self.is_loading, egui::Button::new("Load"))
                    .clicked()
                {
                    self.start_loading();
                }
                if self.is_loading {
                    ui.spinner();
                }
            });
            ui.horizontal(|ui| {
                ui.label("Export to:");
                ui.text_edit_singleline(&mut self.output_path);
                if ui
                    .add_enabled(self.dashboard.is_some(), egui::Button::new("Export JSON"))
                    .clicked()
                {
                    self.export_all();
                }
            });
            self.controls_ui(ui);

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, self.status_message.as_str());
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, self.error_message.as_str());
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if let Some(dash) = self.dashboard.as_ref() {
                    for (id, lane) in dash.lanes() {
                        lane_ui(ui, id, lane);
                    }
                }
            });
        });
    }
}
