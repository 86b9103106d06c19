use eframe::egui::{self, Layout, ProgressBar, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::Film;

const ROW_HEIGHT: f32 = 20.0;

/// Filtered results: rank, title, year, rating, director, genre.
/// Ratings are drawn as bars scaled to the dataset's rating bounds.
pub fn results_table(ui: &mut Ui, films: &[Film], rating_bounds: (f64, f64)) {
    let (lo, hi) = rating_bounds;
    let span = hi - lo;

    ui.push_id("results_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(40.0))
            .column(Column::initial(260.0).at_least(120.0).clip(true))
            .column(Column::auto().at_least(48.0))
            .column(Column::initial(110.0).at_least(80.0))
            .column(Column::initial(180.0).clip(true))
            .column(Column::remainder().clip(true))
            .max_scroll_height(360.0)
            .header(ROW_HEIGHT, |mut header| {
                for title in ["Rank", "Title", "Year", "Rating", "Director", "Genre"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, films.len(), |mut row| {
                    let film = &films[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(film.rank.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(film.title.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(film.year.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        let fraction = if span > 0.0 {
                            ((film.rating - lo) / span) as f32
                        } else {
                            1.0
                        };
                        ui.add(
                            ProgressBar::new(fraction.clamp(0.0, 1.0))
                                .text(format!("{:.1}", film.rating)),
                        );
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(film.director.as_str());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(film.genres.join(", "));
                    });
                });
            });
    });
}

/// The unfiltered dataset, every column.
pub fn raw_table(ui: &mut Ui, films: &[Film], has_cast: bool) {
    let mut headers = vec![
        "Rank", "Title", "Year", "Rating", "Minutes", "Director", "Genre",
    ];
    if has_cast {
        headers.push("Cast");
    }
    headers.push("User reviews");

    ui.push_id("raw_table", |ui: &mut Ui| {
        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(420.0);
        for _ in 0..headers.len() - 1 {
            builder = builder.column(Column::auto().at_least(40.0).clip(true));
        }
        builder
            .column(Column::remainder())
            .header(ROW_HEIGHT, |mut header| {
                for title in &headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, films.len(), |mut row| {
                    let film = &films[row.index()];
                    let mut cells = vec![
                        film.rank.to_string(),
                        film.title.clone(),
                        film.year.to_string(),
                        format!("{:.1}", film.rating),
                        film.duration_minutes.to_string(),
                        film.director.clone(),
                        film.genres.join(", "),
                    ];
                    if has_cast {
                        cells.push(film.cast.as_deref().unwrap_or_default().join(", "));
                    }
                    cells.push(film.user_reviews.to_string());

                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
