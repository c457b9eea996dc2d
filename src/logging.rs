//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global tracing subscriber writing to stderr.
///
/// Stdout is reserved for command output (JSON results, cleaned text), so the
/// formatter is pointed at stderr. Calling this more than once is harmless.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let timer = fmt::time::UtcTime::rfc_3339();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_timer(timer)
        .with_level(true)
        .with_line_number(true)
        .with_file(true)
        .with_thread_ids(false)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(fmt_layer).try_init()?;

    tracing::debug!(level = ?Level::INFO, "tracing initialised");
    Ok(())
}
