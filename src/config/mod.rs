pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::controls::Controls;
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
use crate::render::export::SUPPORTED_FORMATS;
use crate::utils::error::{DashError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_dataset_source, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "co2-dashboard")]
#[command(about = "CO2 per-capita emissions dashboard: top emitters and animated world map")]
pub struct CliConfig {
    #[arg(long, default_value = "CO2_per_capita_cleaned.csv", help = "CSV path or http(s) URL")]
    pub dataset: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "2008")]
    pub start_year: i32,

    #[arg(long, default_value = "2011")]
    pub end_year: i32,

    #[arg(long, default_value = "10", help = "Number of countries in the ranking")]
    pub countries: usize,

    #[arg(long, help = "Render the top emitters bar chart")]
    pub bar: bool,

    #[arg(long, help = "Render the animated emissions map")]
    pub map: bool,

    #[arg(long, help = "Print a dataset overview")]
    pub summary: bool,

    #[arg(long, help = "Read commands from stdin")]
    pub interactive: bool,

    #[arg(long, value_delimiter = ',', default_value = "html")]
    pub formats: Vec<String>,

    #[arg(long, help = "Pack the chart files into one zip")]
    pub bundle: bool,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn controls(&self) -> Result<Controls> {
        Controls::new(self.start_year, self.end_year, self.countries)
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn dataset_source(&self) -> &str {
        &self.dataset
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn bundle_enabled(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_dataset_source("dataset", &self.dataset)?;
        validate_path("output_path", &self.output_path)?;
        validate_formats("formats", &self.formats)?;
        self.controls()?;
        Ok(())
    }
}

pub fn validate_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(DashError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    for format in formats {
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(DashError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}
