use crate::domain::model::{CountryMean, CountryYearTotal, EmissionRecord};
use std::collections::{BTreeMap, HashMap};

/// Mean CO2 per capita per country over `start_year..=end_year`, largest first,
/// truncated to `n` countries.
///
/// Missing values are skipped; a country with no value in the range is not
/// ranked. Equal means keep the order in which the countries first appear in
/// `records`. `start_year > end_year` selects nothing and yields an empty list.
pub fn top_n_emitters(
    records: &[EmissionRecord],
    start_year: i32,
    end_year: i32,
    n: usize,
) -> Vec<CountryMean> {
    // (國家, 總和, 筆數)，依首次出現順序
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records
        .iter()
        .filter(|r| r.year >= start_year && r.year <= end_year)
    {
        let name = record.country_name.as_str();
        let slot = match index.get(name) {
            Some(&slot) => slot,
            None => {
                groups.push((name, 0.0, 0));
                index.insert(name, groups.len() - 1);
                groups.len() - 1
            }
        };

        if record.has_value() {
            let group = &mut groups[slot];
            group.1 += record.co2_per_capita;
            group.2 += 1;
        }
    }

    let mut means: Vec<CountryMean> = groups
        .into_iter()
        .filter(|(_, _, count)| *count > 0)
        .map(|(name, sum, count)| CountryMean {
            country_name: name.to_string(),
            mean_co2_per_capita: sum / count as f64,
        })
        .collect();

    // sort_by 是穩定排序，同值保留原順序
    means.sort_by(|a, b| b.mean_co2_per_capita.total_cmp(&a.mean_co2_per_capita));
    means.truncate(n);

    tracing::debug!(
        "Ranked {} countries for {}-{} (top {})",
        means.len(),
        start_year,
        end_year,
        n
    );

    means
}

/// Sum of CO2 per capita per (country code, year, country name), ordered by
/// that key. Missing values count as zero.
pub fn total_emissions(records: &[EmissionRecord]) -> Vec<CountryYearTotal> {
    let mut totals: BTreeMap<(&str, i32, &str), f64> = BTreeMap::new();

    for record in records {
        let key = (
            record.country_code.as_str(),
            record.year,
            record.country_name.as_str(),
        );
        let value = if record.has_value() {
            record.co2_per_capita
        } else {
            0.0
        };
        *totals.entry(key).or_insert(0.0) += value;
    }

    totals
        .into_iter()
        .map(|((code, year, name), total)| CountryYearTotal {
            country_code: code.to_string(),
            year,
            country_name: name.to_string(),
            total_co2: total,
        })
        .collect()
}
