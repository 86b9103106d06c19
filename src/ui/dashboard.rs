use eframe::egui::{Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::charts::{self, WordCloud};
use crate::ui::tables;

// ---------------------------------------------------------------------------
// Central panel: metrics, results, charts
// ---------------------------------------------------------------------------

/// Render the main dashboard area.
pub fn central_panel(ui: &mut Ui, state: &AppState, word_cloud: &mut WordCloud) {
    // A missing or unreadable file stops here: no partial dashboard.
    if let Some(err) = &state.load_error {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(err).color(Color32::RED));
        });
        return;
    }
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a film table to begin  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("IMDb Top 250 Films Dashboard");
            ui.label("Use the filters on the left to explore the films.");
            ui.add_space(8.0);

            metrics_row(ui, state);
            ui.separator();

            ui.heading(format!("Showing {} films", state.view.len()));
            let Some(agg) = &state.aggregates else {
                ui.label(
                    RichText::new("No films match the selected filters.")
                        .color(Color32::from_rgb(200, 140, 0))
                        .strong(),
                );
                raw_data(ui, state);
                return;
            };
            tables::results_table(ui, &state.view.films, dataset.rating_bounds);
            ui.add_space(12.0);

            ui.heading("Visualisations");

            section(ui, "Films per decade");
            charts::decade_chart(ui, &agg.decade_counts);

            section(ui, &format!("Top {} directors by film count", state.top_n));
            charts::count_chart(ui, "top_directors", &agg.top_directors);

            section(ui, "Mean rating per genre");
            charts::genre_rating_chart(ui, &agg.genre_mean_rating);

            if let Some(cast) = &agg.top_cast {
                section(ui, &format!("Top {} most frequent cast members", state.top_n));
                charts::count_chart(ui, "top_cast", cast);
            }

            section(ui, "Mean rating by genre and decade");
            charts::genre_decade_heatmap(ui, &agg.genre_decade_pivot);

            section(ui, "Genres by film count and mean rating");
            charts::genre_treemap(ui, &agg.genre_rollup);

            section(ui, "Duration vs rating");
            charts::duration_rating_scatter(
                ui,
                &agg.primary_genres,
                state.genre_colors.as_ref(),
            );

            section(ui, "Directors word cloud");
            word_cloud.show(ui, &agg.director_words);

            raw_data(ui, state);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.strong(title);
}

fn metrics_row(ui: &mut Ui, state: &AppState) {
    let m = &state.metrics;
    let rating = m
        .mean_rating
        .map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}"));
    let duration = m
        .mean_duration
        .map_or_else(|| "N/A".to_string(), |d| format!("{d} min"));

    ui.columns(3, |cols| {
        metric(&mut cols[0], "Films found", &m.count.to_string());
        metric(&mut cols[1], "Mean rating", &rating);
        metric(&mut cols[2], "Mean duration", &duration);
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(26.0).strong());
}

fn raw_data(ui: &mut Ui, state: &AppState) {
    if !state.show_raw {
        return;
    }
    if let Some(ds) = &state.dataset {
        ui.separator();
        ui.heading("Raw data");
        tables::raw_table(ui, &ds.films, ds.has_cast);
    }
}
