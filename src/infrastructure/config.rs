use crate::application::fetcher::FetchSchedule;
use crate::domain::alert::{
    EvaluationProfile, ThresholdPolicy, DEFAULT_MAX_RAINFALL_MM, DEFAULT_MIN_TEMPERATURE_CELSIUS,
};
use crate::domain::location::{Coordinate, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::infrastructure::open_meteo_client::DEFAULT_BASE_URL;
use anyhow::{ensure, Context};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

const CONFIG_FILE: &str = "config/poller";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    pub location: LocationSettings,
    pub fetcher: FetcherSettings,
    pub evaluator: EvaluatorSettings,
    pub editor: EditorSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationSettings {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    Interval,
    Once,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetcherSettings {
    pub schedule: FetchMode,
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorSettings {
    pub profile: EvaluationProfile,
    pub interval_secs: u64,
    pub min_temperature_celsius: f64,
    pub max_rainfall_mm: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSettings {
    pub enabled: bool,
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

impl AppConfig {
    pub fn default_location(&self) -> anyhow::Result<Coordinate> {
        Coordinate::new(self.location.latitude, self.location.longitude)
            .context("Invalid default location in configuration")
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    pub fn fetch_schedule(&self) -> FetchSchedule {
        match self.fetcher.schedule {
            FetchMode::Interval => {
                FetchSchedule::Interval(Duration::from_secs(self.fetcher.interval_secs))
            }
            FetchMode::Once => FetchSchedule::Once,
        }
    }

    pub fn threshold_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy {
            min_temperature_celsius: self.evaluator.min_temperature_celsius,
            max_rainfall_mm: self.evaluator.max_rainfall_mm,
        }
    }

    pub fn evaluator_cadence(&self) -> Duration {
        Duration::from_secs(self.evaluator.interval_secs)
    }

    pub fn editor_cadence(&self) -> Duration {
        Duration::from_secs(self.editor.interval_secs)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.default_location()?;
        ensure!(self.provider.timeout_secs > 0, "provider.timeout_secs must be positive");
        ensure!(self.fetcher.interval_secs > 0, "fetcher.interval_secs must be positive");
        ensure!(self.evaluator.interval_secs > 0, "evaluator.interval_secs must be positive");
        ensure!(self.editor.interval_secs > 0, "editor.interval_secs must be positive");
        // a slower evaluator would skip whole snapshots
        if self.fetcher.schedule == FetchMode::Interval {
            ensure!(
                self.evaluator.interval_secs <= self.fetcher.interval_secs,
                "evaluator.interval_secs ({}) must not exceed fetcher.interval_secs ({})",
                self.evaluator.interval_secs,
                self.fetcher.interval_secs
            );
        }
        ensure!(
            self.evaluator.min_temperature_celsius.is_finite()
                && self.evaluator.max_rainfall_mm.is_finite(),
            "evaluator thresholds must be finite numbers"
        );
        Ok(())
    }
}

fn builder_with_defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
    Ok(config::Config::builder()
        .set_default("provider.base_url", DEFAULT_BASE_URL)?
        .set_default("provider.timeout_secs", 10)?
        .set_default("location.latitude", DEFAULT_LATITUDE)?
        .set_default("location.longitude", DEFAULT_LONGITUDE)?
        .set_default("fetcher.schedule", "interval")?
        .set_default("fetcher.interval_secs", 20)?
        .set_default("evaluator.profile", "alert")?
        .set_default("evaluator.interval_secs", 20)?
        .set_default("evaluator.min_temperature_celsius", DEFAULT_MIN_TEMPERATURE_CELSIUS)?
        .set_default("evaluator.max_rainfall_mm", DEFAULT_MAX_RAINFALL_MM)?
        .set_default("editor.enabled", true)?
        .set_default("editor.interval_secs", 60)?
        .set_default("logging.level", "info")?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Built-in defaults, overridden by `config/poller.{toml,...}` when present
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = builder_with_defaults()?
        .add_source(config::File::with_name(CONFIG_FILE).required(false));
    finish(builder).with_context(|| format!("Failed to load configuration from {}", CONFIG_FILE))
}
