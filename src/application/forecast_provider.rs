// Provider trait for remote forecast access
use crate::domain::forecast::{ForecastSeries, SeriesLengthMismatch};
use crate::domain::location::Coordinate;
use async_trait::async_trait;

/// Every variant is recoverable: the fetcher logs it and keeps the previous snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Resolution, connect, write or read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Malformed or unsuccessful HTTP response
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Unparseable body or inconsistent forecast arrays
    #[error("data error: {0}")]
    Data(String),
}

impl From<SeriesLengthMismatch> for FetchError {
    fn from(err: SeriesLengthMismatch) -> Self {
        FetchError::Data(err.to_string())
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the hourly temperature and rain series for a location
    async fn fetch_forecast(&self, location: Coordinate) -> Result<ForecastSeries, FetchError>;
}
