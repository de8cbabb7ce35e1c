//! Logging initialization: colored stdout plus a flat log file.
//!
//! The file sink is the run's durable record — it is truncated at startup,
//! then appended to for the rest of the run. Workers on multiple threads
//! write through a `Mutex<File>` writer, so each record lands atomically.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging(log_path: &Path) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // File::create truncates: each run starts with a fresh log.
    let log_file = File::create(log_path)
        .with_context(|| format!("create log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stdout),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}
