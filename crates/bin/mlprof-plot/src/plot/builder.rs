use std::error::Error;
use std::path::{Path, PathBuf};

use log::{info, warn};

use mlprof_core::batch::BatchSizes;
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::{SeriesBuilder, SeriesMap};
use mlprof_input::runtimes::MeasurementReader;
use mlprof_output::logger::{initiate_logger, initiate_stderr_logger};
use mlprof_output::render::{render, ImageFormat};
use mlprof_output::scene::Scene;
use mlprof_output::tables::StatsTable;
use mlprof_output::writer::DataOutput;

use crate::plot::config::{BaseConfig, BaseConfigReader};

pub(crate) struct PlotBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
    output_override: Option<PathBuf>,
}

impl PlotBuilder {
    pub(crate) fn new(base_config_file: &str) -> Result<Self, Box<dyn Error>> {
        if !Path::new(base_config_file).exists() {
            return Err(format!("Configuration file {} is not found.", base_config_file).into());
        }
        let config_path = Path::new(base_config_file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let base_config = BaseConfigReader::new(base_config_file).parse()?;
        Ok(Self::from_config(base_config, config_path))
    }

    pub(crate) fn from_config(base_config: BaseConfig, config_path: PathBuf) -> Self {
        Self {
            base_config,
            config_path,
            output_override: None,
        }
    }

    /// The override comes from the command line, so it is used as given and
    /// not resolved against the configuration directory.
    pub(crate) fn override_output(&mut self, output_path: PathBuf) {
        self.output_override = Some(output_path);
    }

    pub(crate) fn output_path(&self) -> PathBuf {
        match &self.output_override {
            Some(output_path) => output_path.clone(),
            None => self.resolve(&self.base_config.plot_settings.output_path),
        }
    }

    pub(crate) fn initiate_logging(&self) -> Result<(), Box<dyn Error>> {
        match &self.base_config.log_settings {
            Some(log_settings) => initiate_logger(&self.config_path, log_settings)?,
            None => initiate_stderr_logger(),
        }
        Ok(())
    }

    /// Paths in the configuration are relative to the configuration file.
    fn resolve(&self, path: &str) -> PathBuf {
        self.config_path.join(path)
    }

    pub(crate) fn batch_sizes(&self) -> Result<BatchSizes, Box<dyn Error>> {
        Ok(BatchSizes::try_from(
            self.base_config.plot_settings.batch_sizes.clone(),
        )?)
    }

    pub(crate) fn labels(&self) -> Vec<SeriesLabel> {
        self.base_config
            .measurements
            .iter()
            .map(|measurement| measurement.label.clone())
            .collect()
    }

    pub(crate) fn inputs(&self) -> Vec<PathBuf> {
        self.base_config
            .measurements
            .iter()
            .map(|measurement| self.resolve(&measurement.input))
            .collect()
    }

    fn reader(&self) -> MeasurementReader {
        match &self.base_config.plot_settings.columns {
            Some(columns) => MeasurementReader::builder()
                .columns(columns.clone())
                .build(),
            None => MeasurementReader::default(),
        }
    }

    pub(crate) fn build_series(
        &self,
        batch_sizes: &BatchSizes,
    ) -> Result<SeriesMap, Box<dyn Error>> {
        let series_builder = SeriesBuilder::builder()
            .batch_sizes(batch_sizes)
            .customization(&self.base_config.customization)
            .reader(self.reader())
            .build();
        Ok(series_builder.build(&self.inputs(), &self.labels())?)
    }

    /// Writes the plot and then the optional statistics table. Every check that
    /// can fail without touching the disk runs first, so a rejected run leaves
    /// no output behind.
    pub(crate) fn run(&self) -> Result<(), Box<dyn Error>> {
        if self.base_config.measurements.is_empty() {
            warn!("No measurements are configured, the plot will be empty.");
        }
        let output_path = self.output_path();
        ImageFormat::from_path(&output_path)?;
        let stats_path = self
            .base_config
            .plot_settings
            .stats_output
            .as_deref()
            .map(|stats_output| self.resolve(stats_output));
        if let Some(stats_path) = &stats_path {
            DataOutput::check_path(stats_path)?;
        }

        let batch_sizes = self.batch_sizes()?;
        info!(
            "Aggregating {} measurement series...",
            self.base_config.measurements.len()
        );
        let series = self.build_series(&batch_sizes)?;
        let labels = self.labels();
        let scene = Scene::build(
            &batch_sizes,
            &series,
            &labels,
            &self.base_config.customization,
            &self.base_config.style,
        )?;

        info!("Rendering plot to {}", output_path.display());
        render(&scene, &self.base_config.style, &output_path)?;

        if let Some(stats_path) = stats_path {
            StatsTable::from_series(&batch_sizes, &series, &labels).write_to_file(&stats_path)?;
        }
        Ok(())
    }
}
