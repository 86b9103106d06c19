use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (genres) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let labels: Vec<&String> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous gradients
// ---------------------------------------------------------------------------

/// A piecewise-linear colour scale over `[0, 1]`, mixed in linear RGB.
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    stops: &'static [(u8, u8, u8)],
}

/// Yellow → green → blue, for the heatmap.
pub const YL_GN_BU: Gradient = Gradient {
    stops: &[
        (255, 255, 217),
        (237, 248, 177),
        (199, 233, 180),
        (127, 205, 187),
        (65, 182, 196),
        (29, 145, 192),
        (34, 94, 168),
        (37, 52, 148),
        (8, 29, 88),
    ],
};

/// Red → white → blue, for the treemap.
pub const RD_BU: Gradient = Gradient {
    stops: &[
        (103, 0, 31),
        (178, 24, 43),
        (214, 96, 77),
        (244, 165, 130),
        (253, 219, 199),
        (247, 247, 247),
        (209, 229, 240),
        (146, 197, 222),
        (67, 147, 195),
        (33, 102, 172),
        (5, 48, 97),
    ],
};

impl Gradient {
    /// Colour at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Color32 {
        let last = self.stops.len() - 1;
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let pos = t as f32 * last as f32;
        let i = (pos.floor() as usize).min(last.saturating_sub(1));
        let frac = pos - i as f32;

        let a = linear(self.stops[i]);
        let b = linear(self.stops[(i + 1).min(last)]);
        let rgb: Srgb = a.mix(b, frac).into_color();
        to_color32(rgb)
    }

    /// Colour for `value` placed within `(lo, hi)`.  A degenerate range maps to the middle.
    pub fn scaled(&self, value: f64, (lo, hi): (f64, f64)) -> Color32 {
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            self.at(0.5)
        } else {
            self.at((value - lo) / span)
        }
    }
}

fn linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Black or white, whichever reads better on `fill`.
pub fn text_color_on(fill: Color32) -> Color32 {
    let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn unknown_labels_get_default_color() {
        let genres = vec!["Crime".to_string(), "Drama".to_string()];
        let map = ColorMap::new(&genres);
        assert_ne!(map.color_for("Crime"), map.color_for("Drama"));
        assert_eq!(map.color_for("Western"), Color32::GRAY);
    }

    #[test]
    fn gradient_hits_its_end_stops() {
        assert_eq!(YL_GN_BU.at(0.0), Color32::from_rgb(255, 255, 217));
        assert_eq!(YL_GN_BU.at(1.0), Color32::from_rgb(8, 29, 88));
        assert_eq!(RD_BU.at(-3.0), RD_BU.at(0.0));
        assert_eq!(RD_BU.scaled(8.0, (8.0, 8.0)), RD_BU.at(0.5));
    }

    #[test]
    fn text_contrasts_with_fill() {
        assert_eq!(text_color_on(Color32::WHITE), Color32::BLACK);
        assert_eq!(text_color_on(Color32::from_rgb(8, 29, 88)), Color32::WHITE);
    }
}
