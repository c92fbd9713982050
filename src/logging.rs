//! File logging.
//!
//! The terminal belongs to the UI, so events only go to a log file when one
//! is requested. Without a subscriber, `tracing` events are discarded.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::QuizError;

/// Install a subscriber appending to `log_file`. Verbosity follows `RUST_LOG`,
/// defaulting to `info` for this crate.
pub fn init(log_file: Option<&Path>) -> Result<(), QuizError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| QuizError::Logging(e.to_string()))?;

    info!(path = %path.display(), "logging initialized");
    Ok(())
}
