use super::figure::Figure;
use crate::domain::model::CountryYearTotal;
use serde_json::{json, Value};
use std::collections::BTreeMap;

const SIZE_MAX_PX: f64 = 40.0;
const TOTAL_LABEL: &str = "Total CO2 emissions (metric tons)";

/// Animated geo bubble chart, one frame per year, bubbles placed by ISO-3 code.
pub fn animated_map(totals: &[CountryYearTotal]) -> Figure {
    let mut by_year: BTreeMap<i32, Vec<&CountryYearTotal>> = BTreeMap::new();
    for total in totals {
        by_year.entry(total.year).or_default().push(total);
    }

    // 與 plotly express size_max 相同的面積換算
    let max_total = totals.iter().map(|t| t.total_co2).fold(0.0_f64, f64::max);
    let sizeref = if max_total > 0.0 {
        2.0 * max_total / (SIZE_MAX_PX * SIZE_MAX_PX)
    } else {
        1.0
    };

    let frames: Vec<Value> = by_year
        .iter()
        .map(|(year, rows)| {
            json!({
                "name": year.to_string(),
                "data": [year_trace(rows, sizeref)],
            })
        })
        .collect();

    let first_trace = frames
        .first()
        .map(|frame| frame["data"][0].clone())
        .unwrap_or_else(|| year_trace(&[], sizeref));

    let years: Vec<String> = by_year.keys().map(|y| y.to_string()).collect();

    let layout = json!({
        "title": { "text": "CO2 emissions by country (animated by year)" },
        "geo": {
            "projection": { "type": "natural earth" },
            "showcountries": true,
            "showframe": false,
        },
        "legend": { "itemsizing": "constant" },
        "updatemenus": [play_buttons()],
        "sliders": [year_slider(&years)],
    });

    Figure {
        data: vec![first_trace],
        layout,
        frames,
    }
}

fn year_trace(rows: &[&CountryYearTotal], sizeref: f64) -> Value {
    let locations: Vec<&str> = rows.iter().map(|t| t.country_code.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|t| t.country_name.as_str()).collect();
    let sizes: Vec<f64> = rows.iter().map(|t| t.total_co2.max(0.0)).collect();

    json!({
        "type": "scattergeo",
        "locationmode": "ISO-3",
        "locations": locations,
        "hovertext": names,
        "marker": {
            "size": sizes,
            "sizemode": "area",
            "sizeref": sizeref,
            "color": "#636efa",
        },
        "name": "",
        "hovertemplate": format!(
            "<b>%{{hovertext}}</b><br><br>Country Code=%{{location}}<br>{}=%{{marker.size}}<extra></extra>",
            TOTAL_LABEL
        ),
    })
}

fn play_buttons() -> Value {
    json!({
        "type": "buttons",
        "direction": "left",
        "showactive": false,
        "x": 0.1,
        "y": 0,
        "xanchor": "right",
        "yanchor": "top",
        "pad": { "r": 10, "t": 70 },
        "buttons": [
            {
                "label": "&#9654;",
                "method": "animate",
                "args": [null, {
                    "frame": { "duration": 500, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 500, "easing": "linear" }
                }]
            },
            {
                "label": "&#9724;",
                "method": "animate",
                "args": [[null], {
                    "frame": { "duration": 0, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 0, "easing": "linear" }
                }]
            }
        ]
    })
}

fn year_slider(years: &[String]) -> Value {
    let steps: Vec<Value> = years
        .iter()
        .map(|year| {
            json!({
                "label": year,
                "method": "animate",
                "args": [[year], {
                    "frame": { "duration": 0, "redraw": true },
                    "mode": "immediate",
                    "fromcurrent": true,
                    "transition": { "duration": 0, "easing": "linear" }
                }]
            })
        })
        .collect();

    json!({
        "active": 0,
        "x": 0.1,
        "y": 0,
        "len": 0.9,
        "xanchor": "left",
        "yanchor": "top",
        "pad": { "b": 10, "t": 60 },
        "currentvalue": { "prefix": "Year=" },
        "steps": steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(code: &str, year: i32, value: f64) -> CountryYearTotal {
        CountryYearTotal {
            country_code: code.to_string(),
            year,
            country_name: format!("{} name", code),
            total_co2: value,
        }
    }

    #[test]
    fn test_one_frame_per_year() {
        let totals = vec![
            total("FRA", 2008, 6.0),
            total("FRA", 2009, 5.5),
            total("USA", 2008, 18.0),
            total("USA", 2010, 17.0),
        ];
        let figure = animated_map(&totals);

        let names: Vec<&str> = figure
            .frames
            .iter()
            .filter_map(|f| f["name"].as_str())
            .collect();
        assert_eq!(names, vec!["2008", "2009", "2010"]);
        assert_eq!(figure.layout["sliders"][0]["steps"].as_array().map(|s| s.len()), Some(3));

        // 初始畫面是第一年
        assert_eq!(figure.data[0]["locations"], json!(["FRA", "USA"]));
        assert_eq!(figure.data[0]["marker"]["sizeref"], json!(2.0 * 18.0 / 1600.0));
        assert_eq!(figure.layout["geo"]["projection"]["type"], "natural earth");
    }

    #[test]
    fn test_empty_table_has_no_frames() {
        let figure = animated_map(&[]);
        assert!(figure.frames.is_empty());
        assert_eq!(figure.data.len(), 1);
        assert_eq!(figure.data[0]["marker"]["sizeref"], json!(1.0));
    }
}
