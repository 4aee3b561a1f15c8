use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, Logger, Naming};

use crate::{Result, SearchError};

/// Starts file logging for applications embedding the engine.
///
/// The log level comes from the environment (`RUST_LOG`) and falls back to
/// "info". Files rotate at 10 MB and only the most recent rotation is kept.
pub fn setup_logging(directory: &str) -> Result<()> {
    Logger::try_with_env_or_str("info")
        .map_err(|e| SearchError::Logging(e.to_string()))?
        .log_to_file(FileSpec::default().directory(directory))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(1),
        )
        .start()
        .map_err(|e| SearchError::Logging(e.to_string()))?;

    Ok(())
}
