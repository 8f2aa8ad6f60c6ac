use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotBounds, PlotPoints, PlotResponse, Points};

use crate::state::AppState;
use crate::ui::popup;

// ---------------------------------------------------------------------------
// Map view (central panel)
// ---------------------------------------------------------------------------

/// Marker radius in points.
const MARKER_RADIUS: f32 = 6.0;
/// Hover pick distance as a fraction of the visible longitude span.
const PICK_FRACTION: f64 = 0.015;

/// Render visible records as markers on a longitude/latitude plane.
pub fn solar_map(ui: &mut Ui, state: &mut AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view locations  (File → Open…)");
            });
            return;
        }
    };

    let view_request = state.view_request.take();
    let selected = state.selected;

    let PlotResponse {
        response,
        inner: hovered,
        ..
    } = Plot::new("solar_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(request) = view_request {
                let (min, max) = request.bounds();
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(min, max));
            }

            // One series per legend entry so the legend doubles as a key.
            for (label, color) in state.color_map.legend_entries() {
                let points: PlotPoints = state
                    .visible_indices
                    .iter()
                    .filter_map(|&i| dataset.get(i))
                    .filter(|rec| state.color_map.color_for(rec) == color)
                    .map(|rec| [rec.longitude, rec.latitude])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&label)
                        .color(color)
                        .radius(MARKER_RADIUS)
                        .filled(true),
                );
            }

            if let Some(rec) = selected.and_then(|i| dataset.get(i)) {
                plot_ui.points(
                    Points::new(vec![[rec.longitude, rec.latitude]])
                        .color(Color32::WHITE)
                        .radius(MARKER_RADIUS + 3.0)
                        .filled(false),
                );
            }

            // Nearest visible record under the pointer.
            let pointer = plot_ui.pointer_coordinate()?;
            let pick = plot_ui.plot_bounds().width() * PICK_FRACTION;
            state
                .visible_indices
                .iter()
                .filter_map(|&i| dataset.get(i).map(|rec| (i, rec)))
                .map(|(i, rec)| {
                    let dx = rec.longitude - pointer.x;
                    let dy = rec.latitude - pointer.y;
                    (i, (dx * dx + dy * dy).sqrt())
                })
                .filter(|&(_, dist)| dist <= pick)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(i, _)| i)
        });

    let Some(index) = hovered else {
        return;
    };
    if response.clicked() {
        state.selected = Some(index);
    }
    if let Some(rec) = dataset.get(index) {
        response.on_hover_ui_at_pointer(|ui: &mut Ui| popup::record_summary(ui, rec));
    }
}
