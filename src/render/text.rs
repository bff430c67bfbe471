use crate::domain::model::{CountryMean, DatasetSummary};
use std::fmt::Write;

pub fn ranking_table(ranked: &[CountryMean]) -> String {
    if ranked.is_empty() {
        return "No countries in the selected range\n".to_string();
    }

    let width = ranked
        .iter()
        .map(|m| m.country_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Country".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<width$}  {:>10}", "#", "Country", "t/capita");
    for (rank, mean) in ranked.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>10.3}",
            rank + 1,
            mean.country_name,
            mean.mean_co2_per_capita
        );
    }
    out
}

pub fn summary_table(summary: &DatasetSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Dataset loaded: {} rows, {} columns, {} countries",
        summary.rows, summary.columns, summary.countries
    );
    if let (Some(first), Some(last)) = (summary.first_year, summary.last_year) {
        let _ = writeln!(out, "Years: {}-{}", first, last);
    }
    for record in &summary.preview {
        let _ = writeln!(
            out,
            "  {:<24} {:<4} {:>5} {:>10.3}",
            record.country_name, record.country_code, record.year, record.co2_per_capita
        );
    }
    out
}
