use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use eframe::egui;

use crate::config::{DashboardConfig, EXPORT_FILE_NAME};
use crate::event::{DashboardEvent, DispatchOutcome};
use crate::state::{AppState, Tab};
use crate::ui::{map, panels, popup, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SunmapApp {
    pub state: AppState,
}

impl SunmapApp {
    /// Build the app and read the configured data file.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load(&path);
        Self { state }
    }

    /// Route UI events through the state and act on exports.
    fn handle(&mut self, events: Vec<DashboardEvent>) {
        for event in events {
            match self.state.dispatch(event, Instant::now()) {
                Ok(DispatchOutcome::Exported(csv)) => self.save_export(&csv),
                Ok(_) => {}
                Err(e) => {
                    log::error!("Event failed: {e}");
                    self.state.status_message = Some(format!("Error: {e}"));
                }
            }
        }
    }

    fn save_export(&mut self, csv: &str) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Export CSV")
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };

        match write_export(&path, csv) {
            Ok(()) => {
                log::info!("CSV export completed: {}", path.display());
                self.state.status_message = Some(format!(
                    "Exported {} rows to {}",
                    self.state.visible_indices.len(),
                    path.display()
                ));
            }
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_export(path: &Path, csv: &str) -> Result<()> {
    std::fs::write(path, csv).with_context(|| format!("writing {}", path.display()))
}

impl eframe::App for SunmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.state.poll(now);
        if let Some(remaining) = self.state.pending_search_delay(now) {
            ctx.request_repaint_after(remaining);
        }

        let mut events = Vec::new();

        // ---- Top panel: menu bar + tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut events);
        });

        // ---- Left side panel: filters + statistics ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &mut events);
            });

        // ---- Central panel: map or table ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Map => map::solar_map(ui, &mut self.state),
            Tab::Table => table::data_table(ui, &mut self.state, &mut events),
        });

        popup::detail_window(ctx, &mut self.state);
        popup::failure_notice(ctx, &mut self.state);

        self.handle(events);
    }
}
