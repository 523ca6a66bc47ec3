// Main entry point - Dependency injection and actor supervision
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::evaluator::Evaluator;
use crate::application::fetcher::{FetchSchedule, Fetcher};
use crate::application::location_editor::LocationEditor;
use crate::application::location_store::LocationStore;
use crate::application::snapshot_store::SnapshotStore;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::logging;
use crate::infrastructure::open_meteo_client::OpenMeteoClient;
use crate::presentation::console::{ConsoleAlerts, StdioConsole};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing
    logging::init(&config.logging.level)?;

    // Create provider (infrastructure layer)
    let provider = Arc::new(OpenMeteoClient::new(
        &config.provider.base_url,
        config.provider_timeout(),
    )?);

    // Shared state
    let location = Arc::new(LocationStore::new(config.default_location()?));
    let snapshot = Arc::new(SnapshotStore::default());

    // Actors (application layer)
    let schedule = config.fetch_schedule();
    let fetcher = Fetcher::new(provider, location.clone(), snapshot.clone(), schedule);
    let evaluator = Evaluator::new(
        snapshot.clone(),
        config.threshold_policy(),
        config.evaluator.profile,
        config.evaluator_cadence(),
        Arc::new(ConsoleAlerts),
    );

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_ctrl_c(cancel.clone()));

    if schedule == FetchSchedule::Once {
        // Single-shot: one fetch, one evaluation, exit
        fetcher.run(cancel).await;
        evaluator.evaluate_once();
        return Ok(());
    }

    tracing::info!("Watching weather at {}", location.read());

    let mut actors = vec![
        tokio::spawn(fetcher.run(cancel.clone())),
        tokio::spawn(evaluator.run(cancel.clone())),
    ];
    if config.editor.enabled {
        let editor = LocationEditor::new(
            Box::new(StdioConsole::spawn()),
            location.clone(),
            config.editor_cadence(),
        );
        actors.push(tokio::spawn(editor.run(cancel.clone())));
    }

    for outcome in futures::future::join_all(actors).await {
        if let Err(e) = outcome {
            tracing::error!("Actor task failed: {}", e);
        }
    }

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown requested"),
        Err(e) => {
            // Without a signal handler the process runs until killed
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
    }
    cancel.cancel();
}
