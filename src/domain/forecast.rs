// Forecast domain models
use chrono::{DateTime, Utc};

use super::location::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: String,
    pub temperature_celsius: f64,
    pub rainfall_mm: f64,
}

impl ForecastPoint {
    pub fn new(timestamp: impl Into<String>, temperature_celsius: f64, rainfall_mm: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature_celsius,
            rainfall_mm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("forecast arrays differ in length: time={time}, temperature_2m={temperature}, rain={rain}")]
pub struct SeriesLengthMismatch {
    pub time: usize,
    pub temperature: usize,
    pub rain: usize,
}

/// Hourly points in provider order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    /// Zip the provider's parallel arrays. Unequal lengths are rejected, never truncated.
    pub fn from_parallel(
        time: Vec<String>,
        temperature: Vec<f64>,
        rain: Vec<f64>,
    ) -> Result<Self, SeriesLengthMismatch> {
        if time.len() != temperature.len() || time.len() != rain.len() {
            return Err(SeriesLengthMismatch {
                time: time.len(),
                temperature: temperature.len(),
                rain: rain.len(),
            });
        }

        let points = time
            .into_iter()
            .zip(temperature)
            .zip(rain)
            .map(|((timestamp, temperature), rain)| {
                ForecastPoint::new(timestamp, temperature, rain)
            })
            .collect();

        Ok(Self::new(points))
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Latest fetched forecast. `series == None` until the first successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub series: Option<ForecastSeries>,
    pub location: Option<Coordinate>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn absent() -> Self {
        Self {
            series: None,
            location: None,
            fetched_at: Utc::now(),
        }
    }

    pub fn fetched(series: ForecastSeries, location: Coordinate) -> Self {
        Self {
            series: Some(series),
            location: Some(location),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_absent(&self) -> bool {
        self.series.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(n: usize) -> Vec<String> {
        (0..n).map(|h| format!("2024-01-01T{:02}:00", h)).collect()
    }

    #[test]
    fn test_from_parallel_keeps_order() {
        let series =
            ForecastSeries::from_parallel(hours(3), vec![5.0, 6.0, 7.0], vec![0.0, 0.1, 0.0])
                .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[1], ForecastPoint::new("2024-01-01T01:00", 6.0, 0.1));
        assert_eq!(series.points()[2].timestamp, "2024-01-01T02:00");
    }

    #[test]
    fn test_from_parallel_rejects_short_rain() {
        let err =
            ForecastSeries::from_parallel(hours(24), vec![1.0; 24], vec![0.0; 23]).unwrap_err();
        assert_eq!(
            err,
            SeriesLengthMismatch {
                time: 24,
                temperature: 24,
                rain: 23
            }
        );
    }

    #[test]
    fn test_from_parallel_rejects_short_time() {
        assert!(ForecastSeries::from_parallel(hours(2), vec![1.0; 3], vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = ForecastSeries::from_parallel(vec![], vec![], vec![]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_absent_snapshot() {
        let snapshot = WeatherSnapshot::absent();
        assert!(snapshot.is_absent());
        assert!(snapshot.location.is_none());
    }
}
