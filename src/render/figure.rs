use serde::Serialize;
use serde_json::Value;

/// Plotly figure: traces, layout and optional animation frames.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Value>,
}

impl Figure {
    pub fn title(&self) -> &str {
        self.layout
            .pointer("/title/text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
