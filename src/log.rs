//! Tracing setup: stderr for the operator, a log file for later inspection.

// -- std imports
use std::{fs, io, path::PathBuf, sync::OnceLock};

// -- crate imports
use anyhow::{Context, Result};
use tracing::warn;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*, registry::Registry};

/// Keeps the non-blocking file writer's worker thread alive until exit.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "live-scout.log";

/// Debug builds log more and annotate records with their source location.
const DEV_BUILD: bool = cfg!(debug_assertions);

fn default_level() -> LevelFilter {
    if DEV_BUILD {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Returns the path to the log file.
///
/// `./live-scout.log` (truncated on start) in debug builds,
/// `<local data dir>/live-scout/live-scout.log` in release builds.
///
/// # Errors
/// - [`anyhow::Error`] if the local data directory is unknown or cannot be created.
pub fn log_filepath() -> Result<PathBuf> {
    if DEV_BUILD {
        let path = PathBuf::from(LOG_FILE_NAME);
        let _ = fs::remove_file(&path);
        return Ok(path);
    }

    let dir = dirs::data_local_dir()
        .context("Could not determine local data directory")?
        .join("live-scout");
    fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;
    Ok(dir.join(LOG_FILE_NAME))
}

fn build_file_writer() -> Result<NonBlocking> {
    let path = log_filepath()?;
    let dir = path
        .parent()
        .context("Could not determine log file directory")?;
    let file_name = path
        .file_name()
        .context("Could not determine log file name")?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let _ = LOG_GUARD.set(guard);
    Ok(writer)
}

/// Installs the global subscriber. Stdout carries results only, so console logs go to stderr.
///
/// # Errors
/// - [`anyhow::Error`] if the global tracing subscriber cannot be installed.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level().into())
        .from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_file(DEV_BUILD)
        .with_line_number(DEV_BUILD)
        .with_target(false)
        .with_filter(env_filter.clone());

    let file_writer = build_file_writer();
    let file_layer = file_writer.as_ref().ok().map(|writer| {
        fmt::layer()
            .with_writer(writer.clone())
            .with_ansi(false)
            .with_file(DEV_BUILD)
            .with_line_number(DEV_BUILD)
            .with_target(false)
            .with_filter(env_filter)
    });

    let subscriber = Registry::default().with(stderr_layer).with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = file_writer {
        warn!("File logging could not be initialized. Falling back to stderr only: {e:#}");
    }

    Ok(())
}
