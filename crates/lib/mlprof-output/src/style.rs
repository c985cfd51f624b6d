use plotters::style::RGBColor;
use serde::Deserialize;

use crate::error::RenderError;

/// Colors assigned to series by position, wrapping around when there are more
/// series than entries.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Everything the renderer needs to know about the look of a plot.
///
/// A style is a plain value handed to each render call; nothing about it is
/// stored between plots. Every field has a default so a configuration file only
/// needs to list what it overrides.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub watermark: String,
    pub watermark_font_size: u32,
    pub label_font_size: u32,
    pub axis_font_size: u32,
    pub tick_font_size: u32,
    pub legend_font_size: u32,
    pub header_height: u32,
    pub margin: u32,
    pub line_width: u32,
    pub cap_width: u32,
    pub band_opacity: f64,
    pub palette: Vec<String>,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            font_family: "sans-serif".to_string(),
            watermark: "MLProf".to_string(),
            watermark_font_size: 40,
            label_font_size: 26,
            axis_font_size: 30,
            tick_font_size: 24,
            legend_font_size: 24,
            header_height: 60,
            margin: 20,
            line_width: 3,
            cap_width: 16,
            band_opacity: 0.5,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl PlotStyle {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn colors(&self) -> Result<Vec<RGBColor>, RenderError> {
        if self.palette.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        self.palette.iter().map(|hex| parse_hex_color(hex)).collect()
    }
}

pub fn parse_hex_color(hex: &str) -> Result<RGBColor, RenderError> {
    let invalid = || RenderError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |idx: usize| u8::from_str_radix(&digits[idx..idx + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}
