pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::aggregate::{top_n_emitters, total_emissions};
pub use crate::core::controls::Controls;
pub use crate::core::dashboard::{Dashboard, Event, Outcome};
pub use crate::core::dataset::{Dataset, DatasetCache};
pub use crate::domain::model::{CountryMean, CountryYearTotal, EmissionRecord};
pub use crate::utils::error::{DashError, Result};
