use crate::config::validate_formats;
use crate::core::controls::{
    Controls, DEFAULT_COUNTRY_COUNT, DEFAULT_END_YEAR, DEFAULT_START_YEAR,
};
use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{
    validate_dataset_source, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardConfig,
    pub dataset: DatasetConfig,
    pub controls: Option<ControlsConfig>,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub description: Option<String>,
    /// 依序觸發的圖表：bar, map, summary
    pub actions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub source: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub country_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

const VALID_ACTIONS: [&str; 3] = ["bar", "map", "summary"];

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CO2_DATASET})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("dashboard.name", &self.dashboard.name)?;
        validate_dataset_source("dataset.source", &self.dataset.source)?;
        validate_path("output.output_path", &self.output.output_path)?;
        validate_formats("output.formats", &self.output.formats)?;

        if let Some(timeout) = self.dataset.timeout_seconds {
            validate_range("dataset.timeout_seconds", timeout, 1, 600)?;
        }

        for action in self.actions() {
            if !VALID_ACTIONS.contains(&action.as_str()) {
                return Err(DashError::InvalidConfigValueError {
                    field: "dashboard.actions".to_string(),
                    value: action.clone(),
                    reason: format!("Unknown action. Valid actions: {}", VALID_ACTIONS.join(", ")),
                });
            }
        }

        self.initial_controls()?;
        Ok(())
    }

    pub fn initial_controls(&self) -> Result<Controls> {
        let controls = self.controls.as_ref();
        Controls::new(
            controls
                .and_then(|c| c.start_year)
                .unwrap_or(DEFAULT_START_YEAR),
            controls.and_then(|c| c.end_year).unwrap_or(DEFAULT_END_YEAR),
            controls
                .and_then(|c| c.country_count)
                .unwrap_or(DEFAULT_COUNTRY_COUNT),
        )
    }

    pub fn actions(&self) -> Vec<String> {
        self.dashboard
            .actions
            .clone()
            .unwrap_or_else(|| vec!["bar".to_string(), "map".to_string()])
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.dataset.timeout_seconds.unwrap_or(30))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    pub fn log_level(&self) -> &str {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_level.as_deref())
            .unwrap_or("info")
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_source(&self) -> &str {
        &self.dataset.source
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn bundle_enabled(&self) -> bool {
        self.output.bundle.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
