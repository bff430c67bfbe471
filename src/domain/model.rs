use serde::{Deserialize, Serialize};

pub const COL_COUNTRY_NAME: &str = "Country Name";
pub const COL_COUNTRY_CODE: &str = "Country Code";
pub const COL_YEAR: &str = "Year";
pub const COL_CO2_PER_CAPITA: &str = "CO2 Per Capita (metric tons)";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_COUNTRY_NAME,
    COL_COUNTRY_CODE,
    COL_YEAR,
    COL_CO2_PER_CAPITA,
];

/// One row of the cleaned CO2 dataset. A blank CO2 cell is stored as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    #[serde(rename = "Country Name")]
    pub country_name: String,
    #[serde(rename = "Country Code")]
    pub country_code: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(
        rename = "CO2 Per Capita (metric tons)",
        deserialize_with = "deserialize_optional_f64"
    )]
    pub co2_per_capita: f64,
}

impl EmissionRecord {
    pub fn new(country_name: &str, country_code: &str, year: i32, co2_per_capita: f64) -> Self {
        Self {
            country_name: country_name.to_string(),
            country_code: country_code.to_string(),
            year,
            co2_per_capita,
        }
    }

    pub fn has_value(&self) -> bool {
        !self.co2_per_capita.is_nan()
    }
}

fn deserialize_optional_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMean {
    #[serde(rename = "Country Name")]
    pub country_name: String,
    #[serde(rename = "CO2 Per Capita (metric tons)")]
    pub mean_co2_per_capita: f64,
}

/// 地圖用：每個國家每年的排放總量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearTotal {
    #[serde(rename = "Country Code")]
    pub country_code: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Country Name")]
    pub country_name: String,
    #[serde(rename = "Total CO2 Emissions")]
    pub total_co2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub countries: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub preview: Vec<EmissionRecord>,
}

/// Which chart a trigger produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    TopEmittersBar,
    AnimatedMap,
}

impl ChartKind {
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::TopEmittersBar => "top_emitters",
            ChartKind::AnimatedMap => "emissions_map",
        }
    }
}
