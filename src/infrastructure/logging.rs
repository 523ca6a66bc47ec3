// Tracing subscriber setup
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` takes precedence over the configured level. Diagnostics go to
/// stderr so they don't interleave with operator prompts on stdout.
pub fn init(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
