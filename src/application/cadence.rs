// Cancellable sleep between actor cycles
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Sleep for one cadence. Returns `false` if shutdown was requested first.
pub async fn wait(cancel: &CancellationToken, cadence: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(cadence) => true,
    }
}
