// Location editor - lets the operator move the observed location at runtime
use crate::application::cadence;
use crate::application::location_store::LocationStore;
use crate::domain::location::{Axis, Coordinate};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Line-based operator I/O
#[async_trait]
pub trait OperatorConsole: Send {
    /// Show a prompt and read one line. `None` means input is closed.
    async fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn tell(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    Declined,
    Unchanged,
    Updated(Coordinate),
    InputClosed,
}

pub struct LocationEditor {
    console: Box<dyn OperatorConsole>,
    location: Arc<LocationStore>,
    cadence: Duration,
}

impl LocationEditor {
    pub fn new(
        console: Box<dyn OperatorConsole>,
        location: Arc<LocationStore>,
        cadence: Duration,
    ) -> Self {
        Self {
            console,
            location,
            cadence,
        }
    }

    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("Location editor started (every {:?})", self.cadence);

        while cadence::wait(&cancel, self.cadence).await {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = self.edit_once() => outcome,
            };

            match outcome {
                Ok(EditOutcome::Updated(coordinate)) => {
                    tracing::info!("Observed location changed to {}", coordinate);
                }
                Ok(EditOutcome::InputClosed) => {
                    tracing::info!("Operator input closed, location editor stopping");
                    break;
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Operator console error: {}", e),
            }
        }

        tracing::info!("Location editor stopped");
    }

    /// One prompt cycle. Each axis is accepted or rejected on its own.
    pub async fn edit_once(&mut self) -> io::Result<EditOutcome> {
        let Some(answer) = self.console.ask("Change location? [y/N] ").await? else {
            return Ok(EditOutcome::InputClosed);
        };
        if !is_confirmation(&answer) {
            return Ok(EditOutcome::Declined);
        }

        let current = self.location.read();
        let mut next = current;
        let mut changed = false;

        for axis in [Axis::Latitude, Axis::Longitude] {
            let shown = match axis {
                Axis::Latitude => current.latitude(),
                Axis::Longitude => current.longitude(),
            };
            let prompt = format!("New {} [{}]: ", axis, shown);
            let Some(input) = self.console.ask(&prompt).await? else {
                return Ok(EditOutcome::InputClosed);
            };
            if input.trim().is_empty() {
                continue;
            }

            match axis.parse(&input).and_then(|value| next.with_axis(axis, value)) {
                Ok(updated) => {
                    next = updated;
                    changed = true;
                }
                Err(e) => {
                    tracing::debug!("Rejected operator input: {}", e);
                    self.console.tell(&format!("Rejected: {}; keeping {} {}", e, axis, shown));
                }
            }
        }

        if !changed {
            return Ok(EditOutcome::Unchanged);
        }

        self.location.write(next);
        self.console.tell(&format!("Location set to {}", next));
        Ok(EditOutcome::Updated(next))
    }
}

fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
