use std::path::PathBuf;

use tracing::Level;

use super::error::AppError;
use crate::aggregate::default_workers;

pub const WORKERS_ENV: &str = "WALLET_WORKERS";
pub const LOG_ENV: &str = "WALLET_LOG";

const USAGE: &str = "Usage: wallet <dump-dir>";

/// Runtime settings for the `wallet` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub dump_dir: PathBuf,
    pub workers: usize,
    pub log_level: Level,
}

impl WalletConfig {
    /// Build from the process arguments and environment
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_parts(std::env::args().collect(), |key| std::env::var(key).ok())
    }

    /// Build from explicit arguments (program name first) and an env lookup
    pub fn from_parts<E>(args: Vec<String>, env: E) -> Result<Self, AppError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let [_, dump_dir] = args.as_slice() else {
            return Err(AppError::InvalidArguments(USAGE.to_string()));
        };

        let workers = match env(WORKERS_ENV) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(workers) if workers > 0 => workers,
                _ => {
                    return Err(AppError::InvalidArguments(format!(
                        "{WORKERS_ENV} must be a positive integer, got {raw:?}"
                    )));
                }
            },
            None => default_workers(),
        };

        let log_level = match env(LOG_ENV) {
            Some(raw) => raw.trim().parse::<Level>().map_err(|_| {
                AppError::InvalidArguments(format!("{LOG_ENV} is not a log level: {raw:?}"))
            })?,
            None => Level::INFO,
        };

        Ok(Self {
            dump_dir: PathBuf::from(dump_dir),
            workers,
            log_level,
        })
    }
}
