use crate::domain::ports::DatasetSource;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::is_remote_source;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Making HTTP request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        tracing::debug!("HTTP response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::SourceStatusError {
                status: response.status().as_u16(),
                source_url: self.url.clone(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks a file or HTTP source from a single location string.
#[derive(Debug, Clone)]
pub enum AnySource {
    File(FileSource),
    Http(HttpSource),
}

impl AnySource {
    pub fn from_location(location: &str, timeout: Duration) -> Result<Self> {
        if is_remote_source(location) {
            Ok(AnySource::Http(HttpSource::new(location, timeout)?))
        } else {
            Ok(AnySource::File(FileSource::new(location)))
        }
    }
}

#[async_trait]
impl DatasetSource for AnySource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            AnySource::File(source) => source.fetch().await,
            AnySource::Http(source) => source.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            AnySource::File(source) => source.describe(),
            AnySource::Http(source) => source.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "Country Name,Country Code,Year,CO2 Per Capita (metric tons)\nQatar,QAT,2010,41.1\n";

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(CSV.as_bytes()).unwrap();

        let source = FileSource::new(temp_file.path());
        assert_eq!(source.fetch().await.unwrap(), CSV.as_bytes());
    }

    #[tokio::test]
    async fn test_http_source_fetches_csv() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/co2.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body(CSV);
        });

        let source = AnySource::from_location(&server.url("/co2.csv"), Duration::from_secs(5)).unwrap();
        assert!(matches!(source, AnySource::Http(_)));
        assert_eq!(source.fetch().await.unwrap(), CSV.as_bytes());
        mock.assert();
    }

    #[tokio::test]
    async fn test_http_source_reports_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        });

        let source = HttpSource::new(&server.url("/missing.csv"), Duration::from_secs(5)).unwrap();
        match source.fetch().await {
            Err(DashError::SourceStatusError { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected SourceStatusError, got {:?}", other.map(|b| b.len())),
        }
    }

    #[test]
    fn test_local_location_is_file_source() {
        let source = AnySource::from_location("data/co2.csv", Duration::from_secs(5)).unwrap();
        assert!(matches!(source, AnySource::File(_)));
        assert_eq!(source.describe(), "data/co2.csv");
    }
}
