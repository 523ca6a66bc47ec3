// Fetcher - polls the provider and publishes whole snapshots
use crate::application::cadence;
use crate::application::forecast_provider::{FetchError, ForecastProvider};
use crate::application::location_store::LocationStore;
use crate::application::snapshot_store::SnapshotStore;
use crate::domain::forecast::WeatherSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSchedule {
    /// Fetch, then sleep, forever
    Interval(Duration),
    /// Fetch a single time and stop
    Once,
}

pub struct Fetcher {
    provider: Arc<dyn ForecastProvider>,
    location: Arc<LocationStore>,
    snapshot: Arc<SnapshotStore>,
    schedule: FetchSchedule,
}

impl Fetcher {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        location: Arc<LocationStore>,
        snapshot: Arc<SnapshotStore>,
        schedule: FetchSchedule,
    ) -> Self {
        Self {
            provider,
            location,
            snapshot,
            schedule,
        }
    }

    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!("Fetcher started ({:?})", self.schedule);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = self.fetch_once() => {
                    if let Err(e) = outcome {
                        tracing::warn!("Forecast fetch failed, keeping previous snapshot: {}", e);
                    }
                }
            }

            match self.schedule {
                FetchSchedule::Once => break,
                FetchSchedule::Interval(cadence) => {
                    if !cadence::wait(&cancel, cadence).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("Fetcher stopped");
    }

    /// One cycle. The snapshot is only touched on success.
    pub async fn fetch_once(&self) -> Result<(), FetchError> {
        let location = self.location.read();
        let series = self.provider.fetch_forecast(location).await?;
        if series.is_empty() {
            tracing::warn!("Provider returned an empty forecast for {}", location);
        }

        tracing::info!("Fetched {} forecast points for {}", series.len(), location);
        self.snapshot.replace(WeatherSnapshot::fetched(series, location));
        Ok(())
    }
}
