use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// matplotlib's default colour cycle, which the published charts used.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

pub const HISTORY_COLOR: RGBColor = PALETTE[0];
pub const FORECAST_COLOR: RGBColor = PALETTE[1];
pub const BAND_OPACITY: f64 = 0.2;

pub const FONT: &str = "sans-serif";

/// Converts figure inches and font points to pixels at a fixed DPI.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    pub dpi: u32,
}

impl Canvas {
    pub fn new(dpi: u32) -> Self {
        Self { dpi: dpi.max(1) }
    }

    pub fn size(&self, width_in: f64, height_in: f64) -> (u32, u32) {
        (self.px(width_in), self.px(height_in))
    }

    pub fn px(&self, inches: f64) -> u32 {
        ((inches * self.dpi as f64).round() as u32).max(1)
    }

    pub fn pt(&self, points: f64) -> u32 {
        ((points * self.dpi as f64 / 72.0).round() as u32).max(1)
    }

    pub fn color(index: usize) -> RGBColor {
        PALETTE[index % PALETTE.len()]
    }
}

/// Year axis covering every point, padded when there is a single year.
pub fn year_range<I: IntoIterator<Item = i32>>(years: I) -> Option<Range<i32>> {
    let (lo, hi) = years
        .into_iter()
        .fold(None, |acc: Option<(i32, i32)>, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })?;

    if lo == hi {
        Some((lo - 1)..(hi + 1))
    } else {
        Some(lo..hi)
    }
}

/// Value axis with 5% headroom on both sides.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<Range<f64>> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if (hi - lo).abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        return Some((lo - pad)..(hi + pad));
    }

    let pad = (hi - lo) * 0.05;
    Some((lo - pad)..(hi + pad))
}

/// Same as `value_range`, but always including zero (bar baselines).
pub fn value_range_from_zero<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    let lo = values.iter().copied().fold(0.0, f64::min);
    let hi = values.iter().copied().fold(0.0, f64::max);

    if hi - lo < f64::EPSILON {
        return 0.0..1.0;
    }
    let pad = (hi - lo) * 0.05;
    (if lo < 0.0 { lo - pad } else { 0.0 })..(if hi > 0.0 { hi + pad } else { 0.0 })
}

/// File stem for a technology name: spaces and slashes become underscores.
pub fn sanitize_file_stem(name: &str) -> String {
    name.replace(' ', "_").replace('/', "_")
}

pub fn print_saved(path: &Path) {
    println!("Saved {}", path.display());
}
