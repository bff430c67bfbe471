use super::figure::Figure;
use crate::domain::model::CountryMean;
use serde_json::json;

pub const VALUE_LABEL: &str = "CO2 per capita (metric tons)";

/// Horizontal bar chart of a top-N ranking, largest bar on top.
pub fn bar_chart(ranked: &[CountryMean], start_year: i32, end_year: i32, n: usize) -> Figure {
    let x: Vec<f64> = ranked.iter().map(|m| m.mean_co2_per_capita).collect();
    let y: Vec<&str> = ranked.iter().map(|m| m.country_name.as_str()).collect();

    let trace = json!({
        "type": "bar",
        "orientation": "h",
        "x": x,
        "y": y,
        "name": "",
        "marker": { "color": "#636efa" },
        "hovertemplate": format!("{}=%{{x}}<br>Country Name=%{{y}}<extra></extra>", VALUE_LABEL),
    });

    let layout = json!({
        "title": {
            "text": format!("Top {} CO2 per-capita emitters ({}-{})", n, start_year, end_year)
        },
        "xaxis": { "title": { "text": VALUE_LABEL } },
        // Plotly 由下往上畫類別，total ascending 讓最大值在最上方
        "yaxis": {
            "title": { "text": "Country Name" },
            "categoryorder": "total ascending"
        },
        "barmode": "relative",
        "showlegend": false,
    });

    Figure {
        data: vec![trace],
        layout,
        frames: Vec::new(),
    }
}
