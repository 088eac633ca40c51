//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with decoded output on stdout.
//! Token, payload and secret contents are never logged.

use thiserror::Error;
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("init logging error: `{0}`")]
    TryInitError(String),
}

pub struct Logging;

impl Logging {
    /// Install the global subscriber.
    ///
    /// The default level is `warn`, raised to `debug` by `verbose`.
    /// `RUST_LOG` overrides both.
    pub fn try_init(verbose: bool) -> Result<(), LoggingError> {
        let default_level = if verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(default_level.into())
                    .from_env_lossy(),
            )
            .try_init()
            .map_err(|_| {
                LoggingError::TryInitError("unable to set global logging subscriber".to_string())
            })
    }
}
