// Alert evaluation over a forecast snapshot
use serde::Deserialize;

use super::forecast::{ForecastPoint, WeatherSnapshot};

pub const DEFAULT_MIN_TEMPERATURE_CELSIUS: f64 = 10.0;
pub const DEFAULT_MAX_RAINFALL_MM: f64 = 0.0;

/// A point breaches when `temperature < min_temperature_celsius`
/// or `rainfall > max_rainfall_mm`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPolicy {
    pub min_temperature_celsius: f64,
    pub max_rainfall_mm: f64,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            min_temperature_celsius: DEFAULT_MIN_TEMPERATURE_CELSIUS,
            max_rainfall_mm: DEFAULT_MAX_RAINFALL_MM,
        }
    }
}

impl ThresholdPolicy {
    pub fn breaches(&self, point: &ForecastPoint) -> Vec<Breach> {
        let mut breaches = Vec::new();
        if point.temperature_celsius < self.min_temperature_celsius {
            breaches.push(Breach::LowTemperature {
                celsius: point.temperature_celsius,
                threshold: self.min_temperature_celsius,
            });
        }
        if point.rainfall_mm > self.max_rainfall_mm {
            breaches.push(Breach::Rainfall {
                mm: point.rainfall_mm,
                threshold: self.max_rainfall_mm,
            });
        }
        breaches
    }
}

/// Which points the evaluator emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationProfile {
    /// Only points that breach the policy
    #[default]
    Alert,
    /// Every point, breaching or not
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Breach {
    LowTemperature { celsius: f64, threshold: f64 },
    Rainfall { mm: f64, threshold: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub point: ForecastPoint,
    pub breaches: Vec<Breach>,
}

impl Finding {
    pub fn is_alert(&self) -> bool {
        !self.breaches.is_empty()
    }
}

/// Pure over its inputs, so an unchanged snapshot always yields the same findings.
pub fn evaluate(
    snapshot: &WeatherSnapshot,
    policy: &ThresholdPolicy,
    profile: EvaluationProfile,
) -> Vec<Finding> {
    let Some(series) = &snapshot.series else {
        return Vec::new();
    };

    series
        .points()
        .iter()
        .filter_map(|point| {
            let breaches = policy.breaches(point);
            if breaches.is_empty() && profile == EvaluationProfile::Alert {
                return None;
            }
            Some(Finding {
                point: point.clone(),
                breaches,
            })
        })
        .collect()
}
