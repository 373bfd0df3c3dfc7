//! File logging bootstrap.
//!
//! Stdout carries the conversation with the user, so diagnostics go to a log
//! file instead. The logger is installed at most once per process; later calls
//! report the path already in use.

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Appends log records at `level` and above to `log_path`.
///
/// Returns the file actually in use, which differs from `log_path` if an
/// earlier call already installed the logger.
pub fn init_logging(level: LevelFilter, log_path: &Path) -> Result<PathBuf> {
    if let Some(active) = LOG_PATH.get() {
        return Ok(active.clone());
    }

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(level, config, file).context("A logger is already installed")?;

    let active = LOG_PATH.get_or_init(|| log_path.to_path_buf()).clone();
    log::info!(
        "taskline v{} logging at {} to {}",
        env!("CARGO_PKG_VERSION"),
        level,
        active.display()
    );
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use serial_test::serial;

    #[test]
    #[serial]
    fn second_init_keeps_the_first_file() {
        let ctx = TestContext::new();
        let first = ctx.root.join("logs").join("first.log");
        let second = ctx.root.join("logs").join("second.log");

        let active = init_logging(LevelFilter::Debug, &first).unwrap();
        let again = init_logging(LevelFilter::Debug, &second).unwrap();
        assert_eq!(active, again);
        assert_eq!(active, first);
        assert!(!second.exists());
    }
}
