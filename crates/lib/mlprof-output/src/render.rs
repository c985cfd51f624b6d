use std::fs;
use std::path::Path;

use log::info;
use plotters::coord::ranged1d::ValueFormatter;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use mlprof_core::batch::BatchSizes;
use mlprof_core::customize::Customization;
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesMap;

use crate::error::RenderError;
use crate::scene::{Glyph, LegendKind, Scene};
use crate::style::PlotStyle;

const LEGEND_SWATCH: i32 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Bitmap,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png") | Some("bmp") | Some("jpg") | Some("jpeg") => Ok(ImageFormat::Bitmap),
            _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Plots every labelled series against the batch sizes and saves the image to
/// `output_path`, replacing any existing file.
pub fn plot_runtimes(
    batch_sizes: &BatchSizes,
    series: &SeriesMap,
    labels: &[SeriesLabel],
    customization: &Customization,
    style: &PlotStyle,
    output_path: &Path,
) -> Result<(), RenderError> {
    let scene = Scene::build(batch_sizes, series, labels, customization, style)?;
    render(&scene, style, output_path)
}

pub fn render(scene: &Scene, style: &PlotStyle, output_path: &Path) -> Result<(), RenderError> {
    let format = ImageFormat::from_path(output_path)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RenderError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, style.size()).into_drawing_area();
            draw_scene(&root, scene, style)?;
        }
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(output_path, style.size()).into_drawing_area();
            draw_scene(&root, scene, style)?;
        }
    }
    info!("Plot written to {}", output_path.display());
    Ok(())
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn draw_scene<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    scene: &Scene,
    style: &PlotStyle,
) -> Result<(), RenderError> {
    root.fill(&WHITE).map_err(draw_error)?;
    let (header, body) = root.split_vertically(style.header_height);
    draw_branding(&header, scene, style)?;

    let (x_min, x_max) = scene.x_range;
    let (y_min, y_max) = scene.y_range;
    let x_axis = (x_min..x_max)
        .log_scale()
        .with_key_points(scene.x_ticks.clone());
    let mut builder = ChartBuilder::on(&body);
    builder
        .margin(style.margin)
        .x_label_area_size(style.tick_font_size * 3)
        .y_label_area_size(style.tick_font_size * 4);

    if scene.y_log {
        let mut chart = builder
            .build_cartesian_2d(x_axis, (y_min..y_max).log_scale())
            .map_err(draw_error)?;
        draw_chart(&mut chart, scene, style)?;
    } else {
        let mut chart = builder
            .build_cartesian_2d(x_axis, y_min..y_max)
            .map_err(draw_error)?;
        draw_chart(&mut chart, scene, style)?;
    }
    root.present().map_err(draw_error)
}

/// Watermark in the top left corner and the free text label in the top right.
fn draw_branding<DB: DrawingBackend>(
    header: &DrawingArea<DB, Shift>,
    scene: &Scene,
    style: &PlotStyle,
) -> Result<(), RenderError> {
    let (width, height) = header.dim_in_pixel();
    let baseline = height as i32 - 8;
    let margin = style.margin as i32;

    let watermark_style = TextStyle::from(
        (
            style.font_family.as_str(),
            style.watermark_font_size as f64,
            FontStyle::Bold,
        )
            .into_font(),
    )
    .pos(Pos::new(HPos::Left, VPos::Bottom));
    header
        .draw(&Text::new(
            scene.watermark.as_str(),
            (margin, baseline),
            watermark_style,
        ))
        .map_err(draw_error)?;

    if !scene.top_right_label.is_empty() {
        let label_font = (style.font_family.as_str(), style.label_font_size as f64).into_font();
        let label_style = TextStyle::from(label_font).pos(Pos::new(HPos::Right, VPos::Bottom));
        header
            .draw(&Text::new(
                scene.top_right_label.as_str(),
                (width as i32 - margin, baseline),
                label_style,
            ))
            .map_err(draw_error)?;
    }
    Ok(())
}

fn draw_chart<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    scene: &Scene,
    style: &PlotStyle,
) -> Result<(), RenderError>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64> + ValueFormatter<f64>,
    Y: Ranged<ValueType = f64> + ValueFormatter<f64>,
{
    let font = style.font_family.as_str();
    let x_formatter = |x: &f64| format!("{}", x.round() as u64);
    chart
        .configure_mesh()
        .x_labels(scene.x_ticks.len())
        .x_label_formatter(&x_formatter)
        .x_desc(scene.x_title.as_str())
        .y_desc(scene.y_title.as_str())
        .axis_desc_style((font, style.axis_font_size))
        .label_style((font, style.tick_font_size))
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.1))
        .draw()
        .map_err(draw_error)?;

    let line_width = style.line_width;
    for (series, entry) in scene.series.iter().zip(scene.legend.iter()) {
        let color = series.color;
        let annotation = match &series.glyph {
            Glyph::Band {
                line,
                outline,
                opacity,
            } => {
                let band_style = color.mix(*opacity).filled();
                chart
                    .draw_series(std::iter::once(Polygon::new(outline.clone(), band_style)))
                    .map_err(draw_error)?;
                chart
                    .draw_series(LineSeries::new(line.clone(), color.stroke_width(line_width)))
                    .map_err(draw_error)?
            }
            Glyph::ErrorBars(whiskers) => chart
                .draw_series(whiskers.iter().map(|w| {
                    ErrorBar::new_vertical(
                        w.x,
                        w.low,
                        w.median,
                        w.high,
                        color.filled().stroke_width(line_width),
                        w.cap_width,
                    )
                }))
                .map_err(draw_error)?,
        };

        let band_opacity = style.band_opacity;
        let cap_width = style.cap_width;
        annotation.label(entry.label.as_str());
        match entry.kind {
            LegendKind::LineWithBand => {
                annotation.legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + Rectangle::new(
                            [(0, -LEGEND_SWATCH / 3), (LEGEND_SWATCH, LEGEND_SWATCH / 3)],
                            color.mix(band_opacity).filled(),
                        )
                        + PathElement::new(
                            vec![(0, 0), (LEGEND_SWATCH, 0)],
                            color.stroke_width(line_width),
                        )
                });
            }
            LegendKind::ErrorBar => {
                annotation.legend(move |(x, y)| {
                    EmptyElement::at((x, y))
                        + ErrorBar::new_vertical(
                            LEGEND_SWATCH / 2,
                            -LEGEND_SWATCH / 2,
                            0,
                            LEGEND_SWATCH / 2,
                            color.filled().stroke_width(line_width),
                            cap_width / 2,
                        )
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((font, style.legend_font_size))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_error)
}
