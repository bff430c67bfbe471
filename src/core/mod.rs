pub mod aggregate;
pub mod controls;
pub mod dashboard;
pub mod dataset;
pub mod session;

pub use crate::domain::model::{CountryMean, CountryYearTotal, EmissionRecord};
pub use crate::domain::ports::{ConfigProvider, DatasetSource, Storage};
pub use crate::utils::error::Result;
