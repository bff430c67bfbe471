use crate::domain::model::{DatasetSummary, EmissionRecord, REQUIRED_COLUMNS};
use crate::domain::ports::DatasetSource;
use crate::utils::error::{DashError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::OnceCell;

const PREVIEW_ROWS: usize = 5;

/// Read-only handle on the loaded records. Cloning shares the same rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[EmissionRecord]>,
    columns: usize,
}

impl Dataset {
    pub fn from_records(records: Vec<EmissionRecord>) -> Self {
        Self {
            records: records.into(),
            columns: REQUIRED_COLUMNS.len(),
        }
    }

    /// Parse CSV bytes. Extra columns are ignored; every required column must
    /// be present in the header.
    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        let present: HashSet<&str> = headers.iter().collect();
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !present.contains(*c)) {
            return Err(DashError::MissingColumn {
                column: missing.to_string(),
            });
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<EmissionRecord>() {
            records.push(row?);
        }

        tracing::debug!(
            "Parsed {} records with {} columns",
            records.len(),
            headers.len()
        );

        Ok(Self {
            records: records.into(),
            columns: headers.len(),
        })
    }

    pub fn records(&self) -> &[EmissionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn summary(&self) -> DatasetSummary {
        let countries: HashSet<&str> = self
            .records
            .iter()
            .map(|r| r.country_name.as_str())
            .collect();

        DatasetSummary {
            rows: self.records.len(),
            columns: self.columns,
            countries: countries.len(),
            first_year: self.records.iter().map(|r| r.year).min(),
            last_year: self.records.iter().map(|r| r.year).max(),
            preview: self.records.iter().take(PREVIEW_ROWS).cloned().collect(),
        }
    }
}

/// Loads the dataset from its source at most once; later calls get the same
/// handle. The cache lives as long as its owner.
pub struct DatasetCache<S: DatasetSource> {
    source: S,
    cell: OnceCell<Dataset>,
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceCell::new(),
        }
    }

    pub async fn get_or_load(&self) -> Result<Dataset> {
        let dataset = self
            .cell
            .get_or_try_init(|| async {
                tracing::info!("📥 Loading dataset from {}", self.source.describe());
                let bytes = self.source.fetch().await?;
                let dataset = Dataset::from_csv_bytes(&bytes)?;
                tracing::info!(
                    "✅ Dataset loaded: {} rows, {} columns",
                    dataset.len(),
                    dataset.columns()
                );
                Ok::<Dataset, DashError>(dataset)
            })
            .await?;

        Ok(dataset.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}
