use eframe::egui::{self, Align2, RichText, Ui};

use crate::color::solar_class_color;
use crate::data::model::SolarRecord;
use crate::state::{AppState, Tab, ViewRequest};

/// Per-record detail: irradiance figures and site attributes.
pub fn record_summary(ui: &mut Ui, rec: &SolarRecord) {
    ui.label(RichText::new(&rec.city).heading().strong());

    egui::Grid::new(("metrics", &rec.city))
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            for (label, value) in [
                ("PVOUT", rec.pvout_daily),
                ("GHI", rec.ghi_daily),
                ("DNI", rec.dni_daily),
                ("DHI", rec.dhi_daily),
            ] {
                ui.label(RichText::new(label).small());
                ui.label(format!("{value} kWh/m²/day"));
                ui.end_row();
            }
        });
    ui.separator();

    ui.label(format!("Region: {}", rec.region));
    ui.label(
        RichText::new(format!("Solar class: {}", rec.solar_class))
            .color(solar_class_color(rec.solar_class)),
    );
    ui.label(format!("Data quality: {}", rec.data_quality));
    ui.label(format!("Elevation: {}m", rec.elevation));
    ui.label(format!("Temperature: {}°C", rec.air_temperature));
    ui.label(format!("Sunshine hours: {}/day", rec.sunshine_hours));
    ui.label(format!(
        "Coordinates: {:.4}, {:.4}",
        rec.latitude, rec.longitude
    ));
}

/// Floating window for the selected record, with a "Zoom here" action.
pub fn detail_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(rec) = state.selected_record().cloned() else {
        return;
    };

    let mut open = true;
    let mut zoom = false;
    egui::Window::new("Location")
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .default_width(280.0)
        .show(ctx, |ui: &mut Ui| {
            record_summary(ui, &rec);
            ui.add_space(6.0);
            zoom = ui.button("Zoom here").clicked();
        });

    if zoom {
        state.active_tab = Tab::Map;
        state.view_request = Some(ViewRequest::Focus {
            latitude: rec.latitude,
            longitude: rec.longitude,
        });
    }
    if !open {
        state.selected = None;
    }
}

/// Modal-style notice for a failed startup load; dismissed with OK.
pub fn failure_notice(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.failure_notice.clone() else {
        return;
    };

    egui::Window::new("Data unavailable")
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                state.failure_notice = None;
            }
        });
}
