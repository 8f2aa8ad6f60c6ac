use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::solar_class_color;
use crate::data::model::RecordField;
use crate::event::DashboardEvent;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Sortable data table (central panel)
// ---------------------------------------------------------------------------

/// Table columns: header text and the field the header sorts by.
const COLUMNS: [(&str, RecordField); 8] = [
    ("City", RecordField::City),
    ("Region", RecordField::Region),
    ("PVOUT", RecordField::Pvout),
    ("GHI", RecordField::Ghi),
    ("DNI", RecordField::Dni),
    ("Solar Class", RecordField::SolarClass),
    ("Data Quality", RecordField::DataQuality),
    ("Coordinates", RecordField::Latitude),
];

const ROW_HEIGHT: f32 = 20.0;

/// Render the visible records. Header clicks become sort events; a row
/// click selects the record.
pub fn data_table(ui: &mut Ui, state: &mut AppState, events: &mut Vec<DashboardEvent>) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view locations  (File → Open…)");
        });
        return;
    };

    let sort = state.sort;
    let mut clicked_row = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(eframe::egui::Sense::click())
        .column(Column::auto().at_least(120.0))
        .columns(Column::auto().at_least(60.0), COLUMNS.len() - 2)
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for (title, field) in COLUMNS {
                header.col(|ui: &mut Ui| {
                    let arrow = sort
                        .filter(|s| s.field == field)
                        .map(|s| s.direction.arrow())
                        .unwrap_or("");
                    if ui
                        .button(RichText::new(format!("{title} {arrow}")).strong())
                        .clicked()
                    {
                        events.push(DashboardEvent::SortRequested(field));
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let index = state.visible_indices[row.index()];
                let Some(rec) = dataset.get(index) else {
                    return;
                };
                row.set_selected(state.selected == Some(index));

                row.col(|ui: &mut Ui| {
                    ui.label(&rec.city);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.region);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.pvout_daily.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.ghi_daily.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.dni_daily.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(rec.solar_class.as_str())
                            .color(solar_class_color(rec.solar_class)),
                    );
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.data_quality);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.4}, {:.4}", rec.latitude, rec.longitude));
                });

                if row.response().clicked() {
                    clicked_row = Some(index);
                }
            });
        });

    if let Some(index) = clicked_row {
        state.selected = Some(index);
    }
}
