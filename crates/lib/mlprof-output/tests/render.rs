use std::fs;
use std::path::Path;

use mlprof_core::batch::BatchSizes;
use mlprof_core::customize::Customization;
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesMap;
use mlprof_core::stats::aggregate;
use mlprof_output::error::RenderError;
use mlprof_output::render::{plot_runtimes, ImageFormat};
use mlprof_output::style::PlotStyle;
use mlprof_testutils::files::TempFile;
use mlprof_testutils::tables::{batch_sizes, scenario_table, table_from_rows};

#[test]
fn test_image_format_follows_extension() {
    assert_eq!(
        ImageFormat::from_path(Path::new("plots/runtime.svg")).unwrap(),
        ImageFormat::Svg
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("runtime.PNG")).unwrap(),
        ImageFormat::Bitmap
    );
    assert_eq!(
        ImageFormat::from_path(Path::new("runtime.jpeg")).unwrap(),
        ImageFormat::Bitmap
    );
    assert!(matches!(
        ImageFormat::from_path(Path::new("runtime.pdf")),
        Err(RenderError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        ImageFormat::from_path(Path::new("runtime")),
        Err(RenderError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_unsupported_output_is_not_created() {
    let sizes = batch_sizes(&[16, 32]);
    let mut series = SeriesMap::new();
    series.insert("tf".to_string(), aggregate(&scenario_table(), &sizes).unwrap());
    let output = TempFile::new("pdf");
    let result = plot_runtimes(
        &sizes,
        &series,
        &[SeriesLabel::from("tf")],
        &Customization::default(),
        &PlotStyle::default(),
        output.path(),
    );
    assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
    assert!(!output.path().exists());
}

#[test]
fn test_missing_series_is_reported_before_drawing() {
    let sizes = batch_sizes(&[16, 32]);
    let output = TempFile::new("svg");
    let result = plot_runtimes(
        &sizes,
        &SeriesMap::new(),
        &[SeriesLabel::from("tf")],
        &Customization::default(),
        &PlotStyle::default(),
        output.path(),
    );
    assert!(matches!(result, Err(RenderError::MissingSeries(_))));
    assert!(!output.path().exists());
}

const PLOT_SIZES: [u64; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];
const PREVIOUS_PLOT: &str = "previous plot";

fn two_series() -> (BatchSizes, SeriesMap, Vec<SeriesLabel>) {
    let sizes = batch_sizes(&PLOT_SIZES);
    let rows_for = |scale: f64| -> Vec<(u64, f64)> {
        PLOT_SIZES
            .iter()
            .flat_map(|size| {
                let base = scale * (*size as f64).sqrt();
                [(*size, base * 0.9), (*size, base), (*size, base * 1.2)]
            })
            .collect()
    };
    let mut series = SeriesMap::new();
    series.insert(
        "tf_cpu".to_string(),
        aggregate(&table_from_rows(&rows_for(2.0)), &sizes).unwrap(),
    );
    series.insert(
        "onnx_cpu".to_string(),
        aggregate(&table_from_rows(&rows_for(1.0)), &sizes).unwrap(),
    );
    let labels = vec![
        SeriesLabel::from(vec!["tf", "cpu"]),
        SeriesLabel::from(vec!["onnx", "cpu"]),
    ];
    (sizes, series, labels)
}

fn render_over_existing(customization: &Customization, extension: &str) -> Vec<u8> {
    let (sizes, series, labels) = two_series();
    let output = TempFile::with_contents(extension, PREVIOUS_PLOT);
    plot_runtimes(
        &sizes,
        &series,
        &labels,
        customization,
        &PlotStyle::default(),
        output.path(),
    )
    .unwrap();
    fs::read(output.path()).unwrap()
}

fn assert_svg_plot(contents: &[u8]) {
    let svg = String::from_utf8(contents.to_vec()).unwrap();
    assert!(svg.contains("<svg"));
    assert!(!svg.contains(PREVIOUS_PLOT));
    for size in PLOT_SIZES {
        assert!(svg.contains(&format!(">{}</text>", size)), "missing tick {}", size);
    }
    assert!(svg.contains(">tf, cpu</text>"));
    assert!(svg.contains(">onnx, cpu</text>"));
    assert!(svg.contains(">Batch size</text>"));
}

#[test]
fn test_error_bar_plot_replaces_existing_svg() {
    let contents = render_over_existing(&Customization::default(), "svg");
    assert_svg_plot(&contents);
}

#[test]
fn test_band_plot_replaces_existing_svg() {
    let customization = Customization {
        filling: true,
        top_right_label: "Intel Xeon".to_string(),
        ..Customization::default()
    };
    let contents = render_over_existing(&customization, "svg");
    assert_svg_plot(&contents);
    let svg = String::from_utf8(contents).unwrap();
    assert!(svg.contains(">Intel Xeon</text>"));
    assert!(svg.contains("<polygon"));
}

#[test]
fn test_log_y_plot_replaces_existing_svg() {
    let customization = Customization {
        log_y: true,
        bs_normalized: true,
        ..Customization::default()
    };
    let contents = render_over_existing(&customization, "svg");
    assert_svg_plot(&contents);
    let svg = String::from_utf8(contents).unwrap();
    assert!(svg.contains(">Runtime / batch size [ms]</text>"));
}

#[test]
fn test_bitmap_plot_replaces_existing_png() {
    let contents = render_over_existing(&Customization::default(), "png");
    assert!(contents.starts_with(&[0x89, b'P', b'N', b'G']));
}
