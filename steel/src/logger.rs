//! Log output for the simulation driver.

use anyhow::Context;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `default_level`. Records emitted through `log` by the
/// library crates are forwarded to tracing.
pub fn init(default_level: &str) -> anyhow::Result<()> {
    LogTracer::init().context("a logger is already installed")?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level `{default_level}`"))?,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install the tracing subscriber")?;
    Ok(())
}
