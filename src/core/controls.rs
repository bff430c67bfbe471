use crate::utils::error::{DashError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};

pub const YEAR_MIN: i32 = 1960;
pub const YEAR_MAX: i32 = 2011;
pub const COUNTRY_COUNT_MIN: usize = 5;
pub const COUNTRY_COUNT_MAX: usize = 20;

pub const DEFAULT_START_YEAR: i32 = 2008;
pub const DEFAULT_END_YEAR: i32 = 2011;
pub const DEFAULT_COUNTRY_COUNT: usize = 10;

/// Current slider values. Each value stays inside its slider bounds; the
/// start year may still be after the end year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    start_year: i32,
    end_year: i32,
    country_count: usize,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            country_count: DEFAULT_COUNTRY_COUNT,
        }
    }
}

impl Controls {
    pub fn new(start_year: i32, end_year: i32, country_count: usize) -> Result<Self> {
        let controls = Self {
            start_year,
            end_year,
            country_count,
        };
        controls.validate()?;
        Ok(controls)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn country_count(&self) -> usize {
        self.country_count
    }

    pub fn set_start_year(&mut self, year: i32) -> Result<()> {
        check_year("start_year", year)?;
        self.start_year = year;
        Ok(())
    }

    pub fn set_end_year(&mut self, year: i32) -> Result<()> {
        check_year("end_year", year)?;
        self.end_year = year;
        Ok(())
    }

    pub fn set_country_count(&mut self, count: usize) -> Result<()> {
        check_country_count(count)?;
        self.country_count = count;
        Ok(())
    }
}

impl Validate for Controls {
    fn validate(&self) -> Result<()> {
        check_year("start_year", self.start_year)?;
        check_year("end_year", self.end_year)?;
        check_country_count(self.country_count)
    }
}

fn check_year(control: &str, year: i32) -> Result<()> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(DashError::ControlOutOfRange {
            control: control.to_string(),
            value: year as i64,
            min: YEAR_MIN as i64,
            max: YEAR_MAX as i64,
        });
    }
    Ok(())
}

fn check_country_count(count: usize) -> Result<()> {
    if !(COUNTRY_COUNT_MIN..=COUNTRY_COUNT_MAX).contains(&count) {
        return Err(DashError::ControlOutOfRange {
            control: "country_count".to_string(),
            value: count as i64,
            min: COUNTRY_COUNT_MIN as i64,
            max: COUNTRY_COUNT_MAX as i64,
        });
    }
    Ok(())
}
