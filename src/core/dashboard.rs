use crate::core::aggregate::{top_n_emitters, total_emissions};
use crate::core::controls::Controls;
use crate::core::dataset::Dataset;
use crate::domain::model::{ChartKind, CountryMean, DatasetSummary};
use crate::domain::ports::Storage;
use crate::render::{animated_map, bar_chart, Chart, Exporter};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Something the user did: move a slider, press a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetStartYear(i32),
    SetEndYear(i32),
    SetCountryCount(usize),
    ShowSummary,
    ShowTopEmitters,
    ShowEmissionsMap,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    ControlsChanged(Controls),
    Summary(DatasetSummary),
    TopEmitters {
        ranking: Vec<CountryMean>,
        written: Vec<String>,
    },
    EmissionsMap {
        rows: usize,
        frames: usize,
        written: Vec<String>,
    },
}

pub struct Dashboard<S: Storage> {
    dataset: Dataset,
    controls: Controls,
    exporter: Exporter<S>,
    monitor: SystemMonitor,
}

impl<S: Storage> Dashboard<S> {
    pub fn new(dataset: Dataset, controls: Controls, exporter: Exporter<S>) -> Self {
        Self {
            dataset,
            controls,
            exporter,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(
        dataset: Dataset,
        controls: Controls,
        exporter: Exporter<S>,
        enable_monitoring: bool,
    ) -> Self {
        Self {
            dataset,
            controls,
            exporter,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub async fn handle(&mut self, event: Event) -> Result<Outcome> {
        tracing::debug!("Handling event: {:?}", event);

        match event {
            Event::SetStartYear(year) => {
                self.controls.set_start_year(year)?;
                Ok(Outcome::ControlsChanged(self.controls))
            }
            Event::SetEndYear(year) => {
                self.controls.set_end_year(year)?;
                Ok(Outcome::ControlsChanged(self.controls))
            }
            Event::SetCountryCount(count) => {
                self.controls.set_country_count(count)?;
                Ok(Outcome::ControlsChanged(self.controls))
            }
            Event::ShowSummary => Ok(Outcome::Summary(self.dataset.summary())),
            Event::ShowTopEmitters => self.show_top_emitters().await,
            Event::ShowEmissionsMap => self.show_emissions_map().await,
        }
    }

    async fn show_top_emitters(&self) -> Result<Outcome> {
        let (start, end, n) = (
            self.controls.start_year(),
            self.controls.end_year(),
            self.controls.country_count(),
        );

        let ranking = top_n_emitters(self.dataset.records(), start, end, n);
        self.monitor.log_stats("Aggregation");
        tracing::info!("🏭 Top {} emitters for {}-{}: {} countries", n, start, end, ranking.len());

        let chart = Chart::new(
            ChartKind::TopEmittersBar,
            format!("{}_{}_{}_top{}", ChartKind::TopEmittersBar.file_stem(), start, end, n),
            bar_chart(&ranking, start, end, n),
            &ranking,
        )?;
        let written = self.exporter.export(&chart).await?;
        self.monitor.log_stats("Render");

        Ok(Outcome::TopEmitters { ranking, written })
    }

    async fn show_emissions_map(&self) -> Result<Outcome> {
        // 只在按下按鈕時才彙總
        let totals = total_emissions(self.dataset.records());
        self.monitor.log_stats("Aggregation");

        let figure = animated_map(&totals);
        let frames = figure.frames.len();
        tracing::info!("🗺️ Emissions map: {} rows across {} years", totals.len(), frames);

        let chart = Chart::new(
            ChartKind::AnimatedMap,
            ChartKind::AnimatedMap.file_stem().to_string(),
            figure,
            &totals,
        )?;
        let written = self.exporter.export(&chart).await?;
        self.monitor.log_stats("Render");

        Ok(Outcome::EmissionsMap {
            rows: chart.rows,
            frames,
            written,
        })
    }

    pub fn finish(&self) {
        self.monitor.log_final_stats();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::EmissionRecord;
    use crate::utils::error::DashError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
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
            path.to_string()
        }
    }

    fn dashboard(storage: MockStorage) -> Dashboard<MockStorage> {
        let dataset = Dataset::from_records(vec![
            EmissionRecord::new("A", "AAA", 2008, 10.0),
            EmissionRecord::new("A", "AAA", 2009, 20.0),
            EmissionRecord::new("B", "BBB", 2008, 5.0),
        ]);
        let exporter = Exporter::new(storage, vec!["json".to_string()], false);
        Dashboard::new(dataset, Controls::default(), exporter)
    }

    #[tokio::test]
    async fn test_slider_events_update_controls() {
        let mut dashboard = dashboard(MockStorage::default());
        dashboard.handle(Event::SetStartYear(2009)).await.unwrap();
        dashboard.handle(Event::SetCountryCount(5)).await.unwrap();

        let controls = dashboard.controls();
        assert_eq!(controls.start_year(), 2009);
        assert_eq!(controls.end_year(), 2011);
        assert_eq!(controls.country_count(), 5);
    }

    #[tokio::test]
    async fn test_out_of_range_event_is_rejected() {
        let mut dashboard = dashboard(MockStorage::default());
        let err = dashboard.handle(Event::SetEndYear(2020)).await.unwrap_err();
        assert!(matches!(err, DashError::ControlOutOfRange { .. }));
        assert_eq!(dashboard.controls().end_year(), 2011);
    }

    #[tokio::test]
    async fn test_top_emitters_uses_current_controls() {
        let storage = MockStorage::default();
        let mut dashboard = dashboard(storage.clone());

        match dashboard.handle(Event::ShowTopEmitters).await.unwrap() {
            Outcome::TopEmitters { ranking, written } => {
                assert_eq!(ranking.len(), 2);
                assert_eq!(ranking[0].mean_co2_per_capita, 15.0);
                assert_eq!(written, vec!["top_emitters_2008_2011_top10.json"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(storage
            .files
            .lock()
            .await
            .contains_key("top_emitters_2008_2011_top10.json"));
    }

    #[tokio::test]
    async fn test_inverted_range_gives_empty_ranking() {
        let mut dashboard = dashboard(MockStorage::default());
        dashboard.handle(Event::SetStartYear(2011)).await.unwrap();
        dashboard.handle(Event::SetEndYear(2008)).await.unwrap();

        match dashboard.handle(Event::ShowTopEmitters).await.unwrap() {
            Outcome::TopEmitters { ranking, .. } => assert!(ranking.is_empty()),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_emissions_map() {
        let mut dashboard = dashboard(MockStorage::default());
        match dashboard.handle(Event::ShowEmissionsMap).await.unwrap() {
            Outcome::EmissionsMap { rows, frames, written } => {
                assert_eq!(rows, 3);
                assert_eq!(frames, 2);
                assert_eq!(written, vec!["emissions_map.json"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
