use std::ops::RangeInclusive;
use std::sync::Arc;

use eframe::egui::{
    self, Align2, Color32, FontId, Galley, Grid, RichText, ScrollArea, Sense, Ui, Vec2,
};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};

use crate::color::{generate_palette, text_color_on, ColorMap, RD_BU, YL_GN_BU};
use crate::data::aggregate::{
    GenreDecadePivot, GenreRating, GenreStats, LabelCount, ScatterPoint,
};
use crate::ui::layout::{place_words, squarify};

const CHART_HEIGHT: f32 = 260.0;
const BAR_COLOR: Color32 = Color32::from_rgb(99, 140, 210);

// ---------------------------------------------------------------------------
// Categorical bar charts
// ---------------------------------------------------------------------------

/// Bars at x = 0, 1, 2, … with the category names as axis labels.
fn category_bars(
    ui: &mut Ui,
    id: &str,
    labels: Vec<String>,
    values: Vec<f64>,
    horizontal: bool,
) {
    let bars: Vec<Bar> = values
        .iter()
        .zip(&labels)
        .enumerate()
        .map(|(i, (&v, label))| Bar::new(i as f64, v).name(label).width(0.7))
        .collect();

    let mut chart = BarChart::new(bars).color(BAR_COLOR);
    if horizontal {
        chart = chart.horizontal();
    }

    let formatter = move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    };

    let plot = Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false);
    let plot = if horizontal {
        plot.y_axis_formatter(formatter)
    } else {
        plot.x_axis_formatter(formatter)
    };

    plot.show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

/// Films per decade.
pub fn decade_chart(ui: &mut Ui, counts: &[(i32, usize)]) {
    let labels = counts.iter().map(|(d, _)| format!("{d}s")).collect();
    let values = counts.iter().map(|&(_, n)| n as f64).collect();
    category_bars(ui, "decade_chart", labels, values, false);
}

/// A "top N" count chart (directors, cast).
pub fn count_chart(ui: &mut Ui, id: &str, counts: &[LabelCount]) {
    let labels = counts.iter().map(|c| c.label.clone()).collect();
    let values = counts.iter().map(|c| c.count as f64).collect();
    category_bars(ui, id, labels, values, false);
}

/// Mean rating per genre, best genre on top.
pub fn genre_rating_chart(ui: &mut Ui, ratings: &[GenreRating]) {
    // Horizontal bars grow upwards from index 0, so reverse to keep the best on top.
    let labels = ratings.iter().rev().map(|r| r.genre.clone()).collect();
    let values = ratings.iter().rev().map(|r| r.mean_rating).collect();
    category_bars(ui, "genre_rating_chart", labels, values, true);
}

// ---------------------------------------------------------------------------
// Heatmap: genre × decade
// ---------------------------------------------------------------------------

pub fn genre_decade_heatmap(ui: &mut Ui, pivot: &GenreDecadePivot) {
    let Some(range) = pivot.value_range() else {
        return;
    };

    ScrollArea::horizontal()
        .id_salt("heatmap_scroll")
        .show(ui, |ui: &mut Ui| {
            Grid::new("genre_decade_heatmap")
                .spacing([2.0, 2.0])
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Genre");
                    for decade in &pivot.decades {
                        ui.strong(format!("{decade}s"));
                    }
                    ui.end_row();

                    for (genre, row) in pivot.genres.iter().zip(&pivot.cells) {
                        ui.label(genre.as_str());
                        for cell in row {
                            match cell {
                                Some(v) => {
                                    let fill = YL_GN_BU.scaled(*v, range);
                                    ui.label(
                                        RichText::new(format!(" {v:.2} "))
                                            .monospace()
                                            .background_color(fill)
                                            .color(text_color_on(fill)),
                                    );
                                }
                                None => {
                                    ui.label("");
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Treemap: area = film count, colour = mean rating
// ---------------------------------------------------------------------------

pub fn genre_treemap(ui: &mut Ui, rollup: &[GenreStats]) {
    let Some(range) = rollup
        .iter()
        .map(|g| g.mean_rating)
        .fold(None::<(f64, f64)>, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
    else {
        return;
    };

    let size = Vec2::new(ui.available_width(), 360.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let values: Vec<f64> = rollup.iter().map(|g| g.count as f64).collect();
    let rects = squarify(&values, response.rect);

    let mut hovered = None;
    for (i, (stats, rect)) in rollup.iter().zip(&rects).enumerate() {
        let fill = RD_BU.scaled(stats.mean_rating, range);
        painter.rect_filled(rect.shrink(1.0), 2.0, fill);

        if rect.width() > 48.0 && rect.height() > 30.0 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{}\n{}", stats.genre, stats.count),
                FontId::proportional(13.0),
                text_color_on(fill),
            );
        }
        if response.hover_pos().is_some_and(|p| rect.contains(p)) {
            hovered = Some(i);
        }
    }

    if let Some(stats) = hovered.and_then(|i| rollup.get(i)) {
        response.on_hover_text(format!(
            "{}\nFilms: {}\nMean rating: {:.2}",
            stats.genre, stats.count, stats.mean_rating
        ));
    }

    ui.label(
        RichText::new(format!(
            "Colour: mean rating from {:.2} (red) to {:.2} (blue)",
            range.0, range.1
        ))
        .small(),
    );
}

// ---------------------------------------------------------------------------
// Scatter: duration vs rating, coloured by primary genre
// ---------------------------------------------------------------------------

pub fn duration_rating_scatter(
    ui: &mut Ui,
    groups: &std::collections::BTreeMap<String, Vec<ScatterPoint>>,
    colors: Option<&ColorMap>,
) {
    Plot::new("duration_rating_scatter")
        .legend(Legend::default())
        .height(360.0)
        .x_axis_label("Duration (minutes)")
        .y_axis_label("IMDb rating")
        .label_formatter(|name, value| {
            format!("{name}\n{:.0} min, rating {:.1}", value.x, value.y)
        })
        .show(ui, |plot_ui| {
            for (genre, points) in groups {
                let series: PlotPoints = points
                    .iter()
                    .map(|p| [p.duration_minutes as f64, p.rating])
                    .collect();
                let color = colors.map_or(BAR_COLOR, |c| c.color_for(genre));
                plot_ui.points(
                    Points::new(series)
                        .name(genre)
                        .color(color)
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Word cloud of director names
// ---------------------------------------------------------------------------

const CLOUD_HEIGHT: f32 = 320.0;
const MIN_FONT: f32 = 12.0;
const MAX_FONT: f32 = 56.0;

/// Laid-out word cloud, rebuilt only when the words or the width change.
#[derive(Default)]
pub struct WordCloud {
    words: Vec<LabelCount>,
    width: f32,
    placed: Vec<(Arc<Galley>, Vec2)>,
}

impl WordCloud {
    pub fn show(&mut self, ui: &mut Ui, words: &[LabelCount]) {
        let size = Vec2::new(ui.available_width(), CLOUD_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        painter.rect_filled(response.rect, 4.0, Color32::WHITE);

        if self.words != words || (self.width - size.x).abs() > 0.5 {
            self.rebuild(ui, words, size);
        }

        for (galley, offset) in &self.placed {
            painter.galley(response.rect.min + *offset, Arc::clone(galley), Color32::BLACK);
        }
    }

    fn rebuild(&mut self, ui: &Ui, words: &[LabelCount], size: Vec2) {
        let max = words.iter().map(|w| w.count).max().unwrap_or(1) as f32;
        let colors = generate_palette(8);

        let galleys: Vec<Arc<Galley>> = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let font = MIN_FONT + (MAX_FONT - MIN_FONT) * (w.count as f32 / max);
                ui.painter().layout_no_wrap(
                    w.label.clone(),
                    FontId::proportional(font),
                    colors[i % colors.len()],
                )
            })
            .collect();

        let area = egui::Rect::from_min_size(egui::Pos2::ZERO, size);
        let sizes: Vec<Vec2> = galleys.iter().map(|g| g.size()).collect();
        let spots = place_words(&sizes, area);

        self.placed = galleys
            .into_iter()
            .zip(spots)
            .filter_map(|(g, spot)| spot.map(|r| (g, r.min.to_vec2())))
            .collect();
        self.words = words.to_vec();
        self.width = size.x;

        log::debug!("word cloud: placed {} of {} words", self.placed.len(), words.len());
    }
}
