use super::figure::Figure;
use super::html::html_page;
use crate::domain::model::ChartKind;
use crate::domain::ports::Storage;
use crate::utils::error::{DashError, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUPPORTED_FORMATS: [&str; 3] = ["html", "json", "csv"];

/// A rendered chart plus the table it was drawn from.
#[derive(Debug, Clone)]
pub struct Chart {
    pub kind: ChartKind,
    pub file_stem: String,
    pub figure: Figure,
    pub table_csv: String,
    pub rows: usize,
}

impl Chart {
    pub fn new<T: Serialize>(
        kind: ChartKind,
        file_stem: String,
        figure: Figure,
        rows: &[T],
    ) -> Result<Self> {
        Ok(Self {
            kind,
            file_stem,
            figure,
            table_csv: to_csv(rows)?,
            rows: rows.len(),
        })
    }
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let data = writer.into_inner().map_err(|e| DashError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Writes charts to storage in the configured formats, optionally zipped.
pub struct Exporter<S: Storage> {
    storage: S,
    formats: Vec<String>,
    bundle: bool,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, formats: Vec<String>, bundle: bool) -> Self {
        Self {
            storage,
            formats,
            bundle,
        }
    }

    /// Returns the location of every file written.
    pub async fn export(&self, chart: &Chart) -> Result<Vec<String>> {
        let files = self.render_files(chart)?;

        if self.bundle {
            let name = format!("{}.zip", chart.file_stem);
            let data = bundle(&files)?;
            tracing::debug!("Writing ZIP bundle ({} bytes) to storage", data.len());
            self.storage.write_file(&name, &data).await?;
            return Ok(vec![self.storage.location(&name)]);
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
            written.push(self.storage.location(name));
        }
        Ok(written)
    }

    fn render_files(&self, chart: &Chart) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();
        for format in &self.formats {
            let name = format!("{}.{}", chart.file_stem, format);
            let data = match format.as_str() {
                "html" => html_page(&chart.figure, Utc::now())?.into_bytes(),
                "json" => chart.figure.to_json()?.into_bytes(),
                "csv" => chart.table_csv.clone().into_bytes(),
                other => {
                    return Err(DashError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: format!(
                            "Unsupported format. Valid formats: {}",
                            SUPPORTED_FORMATS.join(", ")
                        ),
                    })
                }
            };
            files.push((name, data));
        }
        Ok(files)
    }
}

fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CountryMean;
    use crate::render::bar::bar_chart;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                DashError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn location(&self, path: &str) -> String {
            format!("mem://{}", path)
        }
    }

    fn sample_chart() -> Chart {
        let ranked = vec![CountryMean {
            country_name: "Qatar".to_string(),
            mean_co2_per_capita: 40.0,
        }];
        let figure = bar_chart(&ranked, 2008, 2011, 5);
        Chart::new(
            ChartKind::TopEmittersBar,
            "top_emitters_2008_2011_top5".to_string(),
            figure,
            &ranked,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_export_each_format() {
        let storage = MockStorage::new();
        let exporter = Exporter::new(
            storage.clone(),
            vec!["html".to_string(), "json".to_string(), "csv".to_string()],
            false,
        );

        let written = exporter.export(&sample_chart()).await.unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(written[0], "mem://top_emitters_2008_2011_top5.html");

        let csv = storage.read_file("top_emitters_2008_2011_top5.csv").await.unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.starts_with("Country Name,CO2 Per Capita (metric tons)"));
        assert!(csv.contains("Qatar,40.0"));

        let json = storage.get_file("top_emitters_2008_2011_top5.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["data"][0]["type"], "bar");
    }

    #[tokio::test]
    async fn test_export_bundle() {
        let storage = MockStorage::new();
        let exporter = Exporter::new(
            storage.clone(),
            vec!["html".to_string(), "csv".to_string()],
            true,
        );

        let written = exporter.export(&sample_chart()).await.unwrap();
        assert_eq!(written, vec!["mem://top_emitters_2008_2011_top5.zip"]);

        let zip_data = storage.get_file("top_emitters_2008_2011_top5.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"top_emitters_2008_2011_top5.html"));
    }

    #[tokio::test]
    async fn test_unknown_format_is_rejected() {
        let exporter = Exporter::new(MockStorage::new(), vec!["png".to_string()], false);
        assert!(exporter.export(&sample_chart()).await.is_err());
    }
}
