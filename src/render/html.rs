use super::figure::Figure;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Wraps a figure in a standalone page that renders it with plotly.js.
pub fn html_page(figure: &Figure, generated_at: DateTime<Utc>) -> Result<String> {
    // 避免 JSON 裡的 "</script>" 提前結束 script 區塊
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let title = escape_html(figure.title());

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="chart" style="width:100%;height:90vh;"></div>
<script>
var figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout).then(function () {{
  if (figure.frames) {{
    Plotly.addFrames("chart", figure.frames);
  }}
}});
</script>
<footer><small>Generated at {generated}</small></footer>
</body>
</html>
"#,
        title = title,
        cdn = PLOTLY_CDN,
        figure_json = figure_json,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    ))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
