use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::{ColorBy, solar_class_color};
use crate::config::PVOUT_SLIDER_MAX;
use crate::data::model::SolarClass;
use crate::event::{DashboardEvent, FilterChange};
use crate::state::{AppState, Tab, ViewRequest};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Filter edits are pushed onto `events`.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, events: &mut Vec<DashboardEvent>) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let regions: Vec<String> = dataset.regions.iter().cloned().collect();
    let qualities: Vec<String> = dataset.qualities.iter().cloned().collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Solar class checkboxes ----
            ui.strong("Solar class");
            for class in SolarClass::ALL {
                let mut checked = state.criteria.solar_classes.contains(&class);
                let text = RichText::new(class.as_str()).color(solar_class_color(class));
                if ui.checkbox(&mut checked, text).changed() {
                    events.push(DashboardEvent::FilterChanged(FilterChange::SolarClass {
                        class,
                        enabled: checked,
                    }));
                }
            }
            ui.separator();

            // ---- Region / quality dropdowns ----
            if let Some(region) = choice_combo(ui, "Region", &state.criteria.region, &regions) {
                events.push(DashboardEvent::FilterChanged(FilterChange::Region(region)));
            }
            if let Some(quality) =
                choice_combo(ui, "Data quality", &state.criteria.data_quality, &qualities)
            {
                events.push(DashboardEvent::FilterChanged(FilterChange::DataQuality(
                    quality,
                )));
            }
            ui.separator();

            // ---- PVOUT ceiling ----
            ui.strong("Max PVOUT (kWh/m²/day)");
            let mut pvout_max = state.criteria.pvout_max;
            let slider = ui.add(
                egui::Slider::new(&mut pvout_max, 0.0..=PVOUT_SLIDER_MAX)
                    .step_by(0.1)
                    .fixed_decimals(1),
            );
            if slider.changed() {
                events.push(DashboardEvent::FilterChanged(FilterChange::PvoutMax(
                    pvout_max,
                )));
            }
            ui.separator();

            // ---- City search ----
            ui.strong("Search city");
            let mut search = state.search_input.clone();
            if ui.text_edit_singleline(&mut search).changed() {
                events.push(DashboardEvent::SearchChanged(search));
            }
            ui.separator();

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply filters").clicked() {
                    let pvout_max = state.criteria.pvout_max;
                    events.push(DashboardEvent::FilterChanged(FilterChange::PvoutMax(
                        pvout_max,
                    )));
                }
                if ui.button("Clear filters").clicked() {
                    events.push(DashboardEvent::FilterChanged(FilterChange::Clear));
                }
            });
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.color_map.color_by;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for color_by in ColorBy::ALL {
                        if ui
                            .selectable_label(current == color_by, color_by.label())
                            .clicked()
                        {
                            state.set_color_by(color_by);
                        }
                    }
                });
            for (label, color) in state.color_map.legend_entries() {
                ui.label(RichText::new(format!("● {label}")).color(color));
            }
            ui.separator();

            statistics(ui, state);
        });
}

/// An "All" + values dropdown. Returns the new choice when it changed.
fn choice_combo(
    ui: &mut Ui,
    label: &str,
    current: &Option<String>,
    values: &[String],
) -> Option<Option<String>> {
    let mut changed = None;
    ui.strong(label);
    egui::ComboBox::from_id_salt(label)
        .selected_text(current.as_deref().unwrap_or("All"))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                changed = Some(None);
            }
            for value in values {
                let selected = current.as_deref() == Some(value.as_str());
                if ui.selectable_label(selected, value).clicked() {
                    changed = Some(Some(value.clone()));
                }
            }
        });
    changed.filter(|choice| choice != current)
}

fn statistics(ui: &mut Ui, state: &AppState) {
    let stats = &state.statistics;
    ui.strong("Statistics");
    egui::Grid::new("statistics")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Visible locations");
            ui.label(stats.count.to_string());
            ui.end_row();
            ui.label("Average PVOUT");
            ui.label(format!("{:.2} kWh/m²/day", stats.mean_pvout));
            ui.end_row();
            ui.label("Highest PVOUT");
            ui.label(format!("{:.2}", stats.max_pvout));
            ui.end_row();
            ui.label("Lowest PVOUT");
            ui.label(format!("{:.2}", stats.min_pvout));
            ui.end_row();
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, events: &mut Vec<DashboardEvent>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export CSV…").clicked() {
                events.push(DashboardEvent::ExportRequested);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.active_tab, Tab::Map, "Map");
        ui.selectable_value(&mut state.active_tab, Tab::Table, "Table");
        if state.active_tab == Tab::Map && ui.button("Reset view").clicked() {
            state.view_request = Some(ViewRequest::Reset);
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} locations loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open solar data")
        .add_filter("Supported files", &["json", "csv"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
