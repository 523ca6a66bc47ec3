// Evaluator - inspects the latest snapshot on its own cadence
use crate::application::cadence;
use crate::application::snapshot_store::SnapshotStore;
use crate::domain::alert::{evaluate, EvaluationProfile, Finding, ThresholdPolicy};
use crate::domain::forecast::WeatherSnapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Where evaluated findings go
pub trait FindingSink: Send + Sync {
    fn emit(&self, snapshot: &WeatherSnapshot, findings: &[Finding]);
}

pub struct Evaluator {
    snapshot: Arc<SnapshotStore>,
    policy: ThresholdPolicy,
    profile: EvaluationProfile,
    cadence: Duration,
    sink: Arc<dyn FindingSink>,
}

impl Evaluator {
    pub fn new(
        snapshot: Arc<SnapshotStore>,
        policy: ThresholdPolicy,
        profile: EvaluationProfile,
        cadence: Duration,
        sink: Arc<dyn FindingSink>,
    ) -> Self {
        Self {
            snapshot,
            policy,
            profile,
            cadence,
            sink,
        }
    }

    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            "Evaluator started ({:?}, every {:?}, {:?})",
            self.profile,
            self.cadence,
            self.policy
        );

        loop {
            self.evaluate_once();
            if !cadence::wait(&cancel, self.cadence).await {
                break;
            }
        }

        tracing::info!("Evaluator stopped");
    }

    /// Returns the number of findings emitted. An absent snapshot is skipped silently.
    pub fn evaluate_once(&self) -> usize {
        let snapshot = self.snapshot.read();
        if snapshot.is_absent() {
            tracing::debug!("No forecast yet, skipping evaluation");
            return 0;
        }

        let findings = evaluate(&snapshot, &self.policy, self.profile);
        tracing::debug!(
            "Evaluated snapshot from {}: {} findings",
            snapshot.fetched_at,
            findings.len()
        );
        if !findings.is_empty() {
            self.sink.emit(&snapshot, &findings);
        }
        findings.len()
    }
}
