use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the visible points, one series per cluster of the active label vector.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let benchmark = match &state.benchmark {
        Some(b) => b,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Load a benchmark to view it  (battery / dataset → Load)");
            });
            return;
        }
    };

    let data = benchmark.data();
    if data.ncols() == 0 {
        ui.label("The data matrix has no columns left to plot.");
        return;
    }
    let x_col = state.x_col.min(data.ncols() - 1);
    let y_col = state.y_col.min(data.ncols() - 1);
    let labels = state.label_index.and_then(|k| benchmark.labels().get(k));

    // Group visible rows by cluster so each cluster gets one legend entry.
    let mut groups: BTreeMap<Option<i64>, Vec<[f64; 2]>> = BTreeMap::new();
    for &i in &state.visible_indices {
        let cluster = labels.map(|l| l[i]);
        groups
            .entry(cluster)
            .or_default()
            .push([data[[i, x_col]], data[[i, y_col]]]);
    }

    Plot::new("scatter_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label(format!("column {x_col}"))
        .y_axis_label(format!("column {y_col}"))
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (cluster, points) in groups {
                let (name, color) = match cluster {
                    Some(c) => {
                        let color = state
                            .color_map
                            .as_ref()
                            .map(|cm| cm.color_for(c))
                            .unwrap_or(Color32::LIGHT_BLUE);
                        (format!("cluster {c}"), color)
                    }
                    None => ("points".to_string(), Color32::LIGHT_BLUE),
                };

                let series = Points::new(PlotPoints::from(points))
                    .name(name)
                    .color(color)
                    .radius(2.0);

                plot_ui.points(series);
            }
        });
}
