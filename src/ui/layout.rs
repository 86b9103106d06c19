use eframe::egui::{Pos2, Rect, Vec2};

// ---------------------------------------------------------------------------
// Squarified treemap
// ---------------------------------------------------------------------------

/// Lay `values` out as rectangles filling `area`, each with an area
/// proportional to its value (squarified treemap, Bruls et al.).
///
/// The result is in input order.  Non-positive values get an empty rect.
pub fn squarify(values: &[f64], area: Rect) -> Vec<Rect> {
    let empty = Rect::from_min_size(area.min, Vec2::ZERO);
    let mut rects = vec![empty; values.len()];

    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 || area.area() <= 0.0 {
        return rects;
    }

    let mut order: Vec<usize> = (0..values.len()).filter(|&i| values[i] > 0.0).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let scale = area.area() as f64 / total;
    let scaled = |i: usize| values[i] * scale;

    let mut free = area;
    let mut row: Vec<usize> = Vec::new();

    for idx in order {
        let side = free.width().min(free.height()) as f64;
        let mut candidate = row.clone();
        candidate.push(idx);

        let areas = |r: &[usize]| r.iter().map(|&i| scaled(i)).collect::<Vec<_>>();
        let improves = worst_ratio(&areas(&candidate), side) <= worst_ratio(&areas(&row), side);
        if row.is_empty() || improves {
            row = candidate;
        } else {
            free = lay_row(&row, &areas(&row), free, &mut rects);
            row = vec![idx];
        }
    }
    if !row.is_empty() {
        let areas: Vec<f64> = row.iter().map(|&i| scaled(i)).collect();
        lay_row(&row, &areas, free, &mut rects);
    }

    rects
}

/// Worst aspect ratio of a row of `areas` laid along a side of length `side`.
fn worst_ratio(areas: &[f64], side: f64) -> f64 {
    let sum: f64 = areas.iter().sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = areas.iter().cloned().fold(f64::MIN, f64::max);
    let min = areas.iter().cloned().fold(f64::MAX, f64::min);
    let s2 = sum * sum;
    let w2 = side * side;
    f64::max(w2 * max / s2, s2 / (w2 * min))
}

/// Place one row along the shorter side of `free`; returns the space left over.
fn lay_row(row: &[usize], areas: &[f64], free: Rect, rects: &mut [Rect]) -> Rect {
    let sum: f64 = areas.iter().sum();
    if free.width() >= free.height() {
        // Column on the left edge.
        let width = (sum / free.height() as f64) as f32;
        let mut y = free.min.y;
        for (&i, &a) in row.iter().zip(areas) {
            let h = (a / width as f64) as f32;
            rects[i] = Rect::from_min_size(Pos2::new(free.min.x, y), Vec2::new(width, h));
            y += h;
        }
        Rect::from_min_max(Pos2::new(free.min.x + width, free.min.y), free.max)
    } else {
        // Row on the top edge.
        let height = (sum / free.width() as f64) as f32;
        let mut x = free.min.x;
        for (&i, &a) in row.iter().zip(areas) {
            let w = (a / height as f64) as f32;
            rects[i] = Rect::from_min_size(Pos2::new(x, free.min.y), Vec2::new(w, height));
            x += w;
        }
        Rect::from_min_max(Pos2::new(free.min.x, free.min.y + height), free.max)
    }
}

// ---------------------------------------------------------------------------
// Word cloud placement
// ---------------------------------------------------------------------------

/// Spiral spacing between turns, in points.
const SPIRAL_PITCH: f32 = 6.0;
/// Horizontal stretch of the spiral, since words are wider than tall.
const SPIRAL_STRETCH: f32 = 1.6;
/// Side of one occupancy-grid cell, in points.
const GRID_CELL: f32 = 32.0;
/// Candidate positions tried per cloud before the remaining words are dropped.
const MAX_PROBES: usize = 200_000;

/// Place boxes of the given `sizes` inside `area`, in order, walking an
/// Archimedean spiral out from the centre until a free spot is found.
/// Words that fit nowhere are `None`.
pub fn place_words(sizes: &[Vec2], area: Rect) -> Vec<Option<Rect>> {
    let mut placer = WordPlacer::new(area);
    sizes.iter().map(|&size| placer.place(size)).collect()
}

struct WordPlacer {
    area: Rect,
    spiral: Vec<Pos2>,
    placed: Vec<Rect>,
    grid: OccupancyGrid,
    /// Sizes that found no spot: anything at least as large cannot fit either.
    failed: Vec<Vec2>,
    probes: usize,
}

impl WordPlacer {
    fn new(area: Rect) -> Self {
        // Past this radius every spiral point lies outside `area`.
        let reach = Vec2::new(area.width() / 2.0 / SPIRAL_STRETCH, area.height() / 2.0).length();
        Self {
            area,
            spiral: spiral(area.center(), reach).collect(),
            placed: Vec::new(),
            grid: OccupancyGrid::new(area),
            failed: Vec::new(),
            probes: 0,
        }
    }

    fn place(&mut self, size: Vec2) -> Option<Rect> {
        if size.x > self.area.width() || size.y > self.area.height() {
            return None;
        }
        if self.failed.iter().any(|f| size.x >= f.x && size.y >= f.y) {
            return None;
        }
        for &p in &self.spiral {
            if self.probes >= MAX_PROBES {
                return None;
            }
            self.probes += 1;
            let r = Rect::from_center_size(p, size);
            if self.area.contains_rect(r) && !self.grid.overlaps(&self.placed, r) {
                self.grid.insert(self.placed.len(), r);
                self.placed.push(r);
                return Some(r);
            }
        }
        self.failed.push(size);
        None
    }
}

/// Placed-rect indices bucketed by the grid cells they cover.
struct OccupancyGrid {
    origin: Pos2,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl OccupancyGrid {
    fn new(area: Rect) -> Self {
        let cols = (area.width() / GRID_CELL).ceil().max(1.0) as usize;
        let rows = (area.height() / GRID_CELL).ceil().max(1.0) as usize;
        Self {
            origin: area.min,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    /// Indices of the cells touched by `r`.
    fn cells_of(&self, r: Rect) -> impl Iterator<Item = usize> {
        let cell = |v: f32, n: usize| ((v / GRID_CELL).floor().max(0.0) as usize).min(n - 1);
        let (c0, c1) = (
            cell(r.min.x - self.origin.x, self.cols),
            cell(r.max.x - self.origin.x, self.cols),
        );
        let (r0, r1) = (
            cell(r.min.y - self.origin.y, self.rows),
            cell(r.max.y - self.origin.y, self.rows),
        );
        let cols = self.cols;
        (r0..=r1).flat_map(move |row| (c0..=c1).map(move |col| row * cols + col))
    }

    fn overlaps(&self, placed: &[Rect], r: Rect) -> bool {
        self.cells_of(r)
            .any(|i| self.cells[i].iter().any(|&j| placed[j].intersects(r)))
    }

    fn insert(&mut self, idx: usize, r: Rect) {
        let touched: Vec<usize> = self.cells_of(r).collect();
        for i in touched {
            self.cells[i].push(idx);
        }
    }
}

/// Points on `r = pitch·θ / 2π`, roughly evenly spaced along the curve.
fn spiral(center: Pos2, max_radius: f32) -> impl Iterator<Item = Pos2> {
    let a = SPIRAL_PITCH / std::f32::consts::TAU;
    let mut theta = 0.0_f32;
    std::iter::from_fn(move || {
        let r = a * theta;
        if r > max_radius {
            return None;
        }
        let p = Pos2::new(center.x + r * theta.cos() * SPIRAL_STRETCH, center.y + r * theta.sin());
        theta += if r < 1.0 { 0.5 } else { (4.0 / r).min(0.5) };
        Some(p)
    })
}
