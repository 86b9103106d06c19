use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => Arc::clone(ds),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Genre multi-select ----
            let n_selected = state.predicate.genres.len();
            let n_total = dataset.genres.len();
            let mut toggled: Option<String> = None;

            egui::CollapsingHeader::new(
                RichText::new(format!("Genre  ({n_selected}/{n_total})")).strong(),
            )
            .id_salt("genre_filter")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                if ui.small_button("Clear").clicked() {
                    state.clear_genres();
                }
                for genre in &dataset.genres {
                    let mut checked = state.predicate.genres.contains(genre);
                    if ui.checkbox(&mut checked, genre.as_str()).changed() {
                        toggled = Some(genre.clone());
                    }
                }
            });
            if let Some(genre) = toggled {
                state.toggle_genre(&genre);
            }
            ui.separator();

            // ---- Release year range ----
            ui.strong("Release year");
            let (min_year, max_year) = dataset.year_bounds;
            let (mut from, mut to) = state.predicate.years;
            let changed_from = ui
                .add(Slider::new(&mut from, min_year..=max_year).text("from"))
                .changed();
            let changed_to = ui
                .add(Slider::new(&mut to, min_year..=max_year).text("to"))
                .changed();
            if changed_from || changed_to {
                state.set_year_range(from, to);
            }
            ui.separator();

            // ---- Rating range ----
            ui.strong("Rating");
            let (min_rating, max_rating) = dataset.rating_bounds;
            let (mut from, mut to) = state.predicate.ratings;
            let changed_from = ui
                .add(
                    Slider::new(&mut from, min_rating..=max_rating)
                        .step_by(0.1)
                        .fixed_decimals(1)
                        .text("from"),
                )
                .changed();
            let changed_to = ui
                .add(
                    Slider::new(&mut to, min_rating..=max_rating)
                        .step_by(0.1)
                        .fixed_decimals(1)
                        .text("to"),
                )
                .changed();
            if changed_from || changed_to {
                state.set_rating_range(from, to);
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
            ui.checkbox(&mut state.show_raw, "Show raw data");
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} films loaded, {} shown",
                ds.len(),
                state.view.len()
            ));
            ui.separator();
            ui.label(RichText::new(state.data_path.display().to_string()).weak());
        }

        if let Some(msg) = &state.load_error {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open film table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
