// Application layer: wires config, dataset source and storage into a dashboard.

use crate::adapters::AnySource;
use crate::config::cli::LocalStorage;
use crate::core::controls::Controls;
use crate::core::dashboard::{Dashboard, Event};
use crate::core::dataset::DatasetCache;
use crate::core::session::describe_outcome;
use crate::core::ConfigProvider;
use crate::render::Exporter;
use crate::utils::error::Result;
use std::time::Duration;

/// Loads the dataset once and builds a dashboard that writes to the
/// configured output directory.
pub async fn build_dashboard<C: ConfigProvider>(
    config: &C,
    controls: Controls,
    timeout: Duration,
    monitor: bool,
) -> Result<Dashboard<LocalStorage>> {
    let source = AnySource::from_location(config.dataset_source(), timeout)?;
    let cache = DatasetCache::new(source);
    let dataset = cache.get_or_load().await?;

    let storage = LocalStorage::new(config.output_path().to_string());
    let exporter = Exporter::new(
        storage,
        config.output_formats().to_vec(),
        config.bundle_enabled(),
    );

    Ok(Dashboard::new_with_monitoring(
        dataset, controls, exporter, monitor,
    ))
}

/// Maps action names (`bar`, `map`, `summary`) to trigger events.
pub fn action_event(action: &str) -> Option<Event> {
    match action {
        "bar" => Some(Event::ShowTopEmitters),
        "map" => Some(Event::ShowEmissionsMap),
        "summary" => Some(Event::ShowSummary),
        _ => None,
    }
}

/// Fires each event in order and prints what it produced. Stops at the
/// first failure.
pub async fn run_events(
    dashboard: &mut Dashboard<LocalStorage>,
    events: Vec<Event>,
) -> Result<()> {
    for event in events {
        let outcome = dashboard.handle(event).await?;
        print!("{}", describe_outcome(&outcome));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_event() {
        assert_eq!(action_event("bar"), Some(Event::ShowTopEmitters));
        assert_eq!(action_event("map"), Some(Event::ShowEmissionsMap));
        assert_eq!(action_event("summary"), Some(Event::ShowSummary));
        assert_eq!(action_event("pie"), None);
    }
}
