//! Backend independent description of a runtime plot.
//!
//! A [`Scene`] holds every coordinate, color and label that ends up in the
//! image. Building it does all the arithmetic (axis ranges, clamping, color
//! assignment); drawing it is a straight walk over its fields.

use log::debug;
use plotters::style::RGBColor;
use typed_builder::TypedBuilder;

use mlprof_core::batch::BatchSizes;
use mlprof_core::customize::Customization;
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesMap;
use mlprof_core::stats::SeriesStats;

use crate::error::RenderError;
use crate::style::PlotStyle;

/// Factor applied on both sides of the batch size range of the log x-axis.
const X_PADDING: f64 = 1.25;
const Y_HEADROOM_LINEAR: f64 = 1.1;
const Y_HEADROOM_LOG: f64 = 1.5;
const Y_FLOOR_LOG: f64 = 0.8;

pub const X_AXIS_TITLE: &str = "Batch size";

/// One vertical error bar: a marker at the median with capped whiskers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Whisker {
    pub x: f64,
    pub low: f64,
    pub median: f64,
    pub high: f64,
    /// Width of the cap drawn at each end, in pixels.
    pub cap_width: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Glyph {
    /// Median line with a filled polygon spanning the error band.
    Band {
        line: Vec<(f64, f64)>,
        outline: Vec<(f64, f64)>,
        opacity: f64,
    },
    ErrorBars(Vec<Whisker>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendKind {
    LineWithBand,
    ErrorBar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    pub kind: LegendKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSeries {
    pub color: RGBColor,
    pub glyph: Glyph,
}

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Scene {
    pub x_range: (f64, f64),
    pub x_ticks: Vec<f64>,
    pub y_range: (f64, f64),
    pub y_log: bool,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<SceneSeries>,
    pub legend: Vec<LegendEntry>,
    pub watermark: String,
    pub top_right_label: String,
}

impl Scene {
    /// Lays out one glyph and one legend entry per label, in label order.
    ///
    /// Each label is looked up in `series` by its file stem.
    pub fn build(
        batch_sizes: &BatchSizes,
        series: &SeriesMap,
        labels: &[SeriesLabel],
        customization: &Customization,
        style: &PlotStyle,
    ) -> Result<Self, RenderError> {
        let colors = style.colors()?;
        let xs = batch_sizes.as_f64();

        let mut selected: Vec<(&SeriesLabel, &SeriesStats)> = Vec::with_capacity(labels.len());
        for label in labels {
            let key = label.file_stem();
            let stats = series
                .get(&key)
                .ok_or_else(|| RenderError::MissingSeries(key.clone()))?;
            if stats.len() != xs.len() {
                return Err(RenderError::LengthMismatch {
                    label: key,
                    expected: xs.len(),
                    found: stats.len(),
                });
            }
            selected.push((label, stats));
        }

        let y_range = y_range(selected.iter().map(|(_, stats)| *stats), customization.log_y);
        debug!("Plot y range {:?}, log scale {}", y_range, customization.log_y);

        let mut scene_series = Vec::with_capacity(selected.len());
        let mut legend = Vec::with_capacity(selected.len());
        for (idx, (label, stats)) in selected.into_iter().enumerate() {
            let color = colors[idx % colors.len()];
            let (glyph, kind) = if customization.filling {
                (
                    band_glyph(&xs, stats, y_range.0, style.band_opacity),
                    LegendKind::LineWithBand,
                )
            } else {
                (
                    error_bar_glyph(&xs, stats, y_range.0, style.cap_width),
                    LegendKind::ErrorBar,
                )
            };
            scene_series.push(SceneSeries { color, glyph });
            legend.push(LegendEntry {
                label: label.display_name(),
                color,
                kind,
            });
        }

        let x_range = (
            batch_sizes.min().as_f64() / X_PADDING,
            batch_sizes.max().as_f64() * X_PADDING,
        );
        Ok(Scene::builder()
            .x_range(x_range)
            .x_ticks(xs)
            .y_range(y_range)
            .y_log(customization.log_y)
            .x_title(X_AXIS_TITLE.to_string())
            .y_title(customization.y_axis_title().to_string())
            .series(scene_series)
            .legend(legend)
            .watermark(style.watermark.clone())
            .top_right_label(customization.top_right_label.clone())
            .build())
    }
}

/// The linear axis starts at zero. The log axis starts a little below the
/// smallest positive value, since zero cannot be shown on it.
fn y_range<'a>(series: impl Iterator<Item = &'a SeriesStats> + Clone, log_y: bool) -> (f64, f64) {
    let top = series
        .clone()
        .flat_map(|stats| stats.spreads())
        .map(|spread| spread.upper())
        .fold(0.0_f64, f64::max);

    if !log_y {
        let top = if top > 0.0 { top * Y_HEADROOM_LINEAR } else { 1.0 };
        return (0.0, top);
    }

    let smallest_positive = series
        .flat_map(|stats| stats.spreads())
        .flat_map(|spread| [spread.lower(), spread.median])
        .filter(|value| *value > 0.0)
        .fold(f64::INFINITY, f64::min);
    let bottom = if smallest_positive.is_finite() {
        smallest_positive * Y_FLOOR_LOG
    } else {
        1e-3
    };
    let top = if top > bottom {
        top * Y_HEADROOM_LOG
    } else {
        bottom * 10.0
    };
    (bottom, top)
}

fn band_glyph(xs: &[f64], stats: &SeriesStats, floor: f64, opacity: f64) -> Glyph {
    let line: Vec<(f64, f64)> = xs.iter().copied().zip(stats.medians.iter().copied()).collect();
    let upper = xs.iter().zip(stats.spreads()).map(|(x, s)| (*x, s.upper()));
    let lower: Vec<(f64, f64)> = xs
        .iter()
        .zip(stats.spreads())
        .map(|(x, s)| (*x, s.lower().max(floor)))
        .collect();
    let outline = upper.chain(lower.into_iter().rev()).collect();
    Glyph::Band {
        line,
        outline,
        opacity,
    }
}

fn error_bar_glyph(xs: &[f64], stats: &SeriesStats, floor: f64, cap_width: u32) -> Glyph {
    let whiskers = xs
        .iter()
        .zip(stats.spreads())
        .map(|(x, spread)| Whisker {
            x: *x,
            low: spread.lower().max(floor),
            median: spread.median,
            high: spread.upper(),
            cap_width,
        })
        .collect();
    Glyph::ErrorBars(whiskers)
}
