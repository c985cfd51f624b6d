use std::path::PathBuf;

use serde::Deserialize;

use mlprof_core::customize::Customization;
use mlprof_core::label::SeriesLabel;
use mlprof_output::logger::LogSettings;
use mlprof_output::style::PlotStyle;

#[derive(Deserialize, Debug, Clone)]
pub struct PlotSettings {
    pub batch_sizes: Vec<u64>,
    pub output_path: String,
    pub stats_output: Option<String>,
    pub columns: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MeasurementSettings {
    pub input: String,
    pub label: SeriesLabel,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BaseConfig {
    pub plot_settings: PlotSettings,
    pub measurements: Vec<MeasurementSettings>,
    #[serde(default)]
    pub customization: Customization,
    #[serde(default)]
    pub style: PlotStyle,
    pub log_settings: Option<LogSettings>,
}

impl BaseConfig {
    pub fn from_toml(input_toml: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input_toml)
    }
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config = BaseConfig::from_toml(&parsing_result)?;
        Ok(config)
    }
}
