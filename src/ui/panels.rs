use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use clustbench::data::export;
use clustbench::ClusteringBenchmark;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – label vector, axes and cluster filter
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Benchmark");
    ui.separator();

    let (name, n_cols, n_labels, description) = match &state.benchmark {
        Some(b) => (b.name(), b.n_cols(), b.labels().len(), b.description().to_string()),
        None => {
            ui.label("No benchmark loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(name);
            egui::CollapsingHeader::new("Description")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(description);
                });
            ui.separator();

            // ---- Axes ----
            ui.strong("Axes");
            axis_combo(ui, "x_axis", "x", &mut state.x_col, n_cols);
            axis_combo(ui, "y_axis", "y", &mut state.y_col, n_cols);
            ui.separator();

            // ---- Colour-by selector ----
            ui.strong("Color by");
            let current = state.label_index;
            let current_text = current.map_or("none".to_string(), |k| format!("labels{k}"));
            let mut chosen = current;
            egui::ComboBox::from_id_salt("color_by")
                .selected_text(current_text)
                .show_ui(ui, |ui: &mut Ui| {
                    ui.selectable_value(&mut chosen, None, "none");
                    for k in 0..n_labels {
                        ui.selectable_value(&mut chosen, Some(k), format!("labels{k}"));
                    }
                });
            if chosen != current {
                state.set_label_index(chosen);
            }
            ui.separator();

            // ---- Per-cluster visibility ----
            let Some(k) = state.label_index else {
                return;
            };
            let all_clusters = state
                .benchmark
                .as_ref()
                .and_then(|b| b.label_values(k))
                .unwrap_or_default();

            let header_text = format!(
                "Clusters  ({}/{})",
                state.selection.len(),
                all_clusters.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("clusters")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_none();
                        }
                    });

                    for cluster in &all_clusters {
                        let mut text = RichText::new(cluster.to_string());
                        if let Some(cm) = &state.color_map {
                            text = text.color(cm.color_for(*cluster));
                        }
                        let mut checked = state.selection.contains(cluster);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_cluster(*cluster);
                        }
                    }
                });
        });
}

fn axis_combo(ui: &mut Ui, id: &str, label: &str, value: &mut usize, n_cols: usize) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(format!("column {value}"))
            .show_ui(ui, |ui: &mut Ui| {
                for j in 0..n_cols {
                    ui.selectable_value(value, j, format!("column {j}"));
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, load form and status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Choose directory…").clicked() {
                pick_directory(state);
                ui.close_menu();
            }
            let loaded = state.benchmark.is_some();
            if ui.add_enabled(loaded, egui::Button::new("Export JSON…")).clicked() {
                export_dialog(state, ExportFormat::Json);
                ui.close_menu();
            }
            if ui.add_enabled(loaded, egui::Button::new("Export CSV…")).clicked() {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
        });

        ui.separator();

        let form = &mut state.form;
        ui.selectable_value(&mut form.use_url, false, "Directory");
        ui.selectable_value(&mut form.use_url, true, "URL");
        ui.add(egui::TextEdit::singleline(&mut form.location).desired_width(260.0));
        ui.label("battery");
        ui.add(egui::TextEdit::singleline(&mut form.battery).desired_width(80.0));
        ui.label("dataset");
        ui.add(egui::TextEdit::singleline(&mut form.dataset).desired_width(80.0));
        ui.checkbox(&mut form.preprocess, "Preprocess");
        ui.label("seed");
        ui.add(egui::TextEdit::singleline(&mut form.seed).desired_width(60.0));

        if ui.button("Load").clicked() {
            load(state);
        }

        ui.separator();

        if let Some(b) = &state.benchmark {
            ui.label(format!(
                "{} points, {} visible",
                b.n_rows(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

fn load(state: &mut AppState) {
    match state.load_from_form() {
        Ok(()) => {
            if let Some(b) = &state.benchmark {
                log::info!(
                    "Showing {} with {} label vector(s)",
                    b.name(),
                    b.labels().len()
                );
            }
        }
        Err(e) => {
            log::error!("Failed to load benchmark: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn pick_directory(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Choose the benchmark suite directory")
        .pick_folder();

    if let Some(path) = dir {
        state.form.use_url = false;
        state.form.location = path.display().to_string();
    }
}

#[derive(Clone, Copy)]
enum ExportFormat {
    Json,
    Csv,
}

fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let Some(benchmark) = &state.benchmark else {
        return;
    };
    let (ext, filter) = match format {
        ExportFormat::Json => ("json", "JSON"),
        ExportFormat::Csv => ("csv", "CSV"),
    };
    let file = rfd::FileDialog::new()
        .set_title("Export benchmark")
        .set_file_name(format!("{}_{}.{ext}", benchmark.battery(), benchmark.dataset()))
        .add_filter(filter, &[ext])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_to(benchmark, &path, format) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        } else {
            log::info!("Exported {} to {}", benchmark.name(), path.display());
        }
    }
}

fn export_to(benchmark: &ClusteringBenchmark, path: &Path, format: ExportFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Json => export::write_json(benchmark, writer)?,
        ExportFormat::Csv => export::write_csv(benchmark, writer)?,
    }
    Ok(())
}
