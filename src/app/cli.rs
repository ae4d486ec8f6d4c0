use std::future::Future;
use std::io;

use tokio::io::{BufWriter, Stdout};
use tracing::{error, warn};

use super::error::AppError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Runs an async entry point against buffered stdout and maps the outcome
/// to a process exit code
///
/// Exit codes: 0 success, 1 error, 130 SIGINT, 143 SIGTERM, 129 SIGHUP.
pub struct CliApp {
    name: String,
}

impl CliApp {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Race `main_fn` against termination signals and return the exit code
    ///
    /// `main_fn` owns the stdout writer and is responsible for flushing it.
    pub async fn run<F, Fut>(self, main_fn: F) -> i32
    where
        F: FnOnce(BufWriter<Stdout>) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        let writer = BufWriter::new(tokio::io::stdout());

        tokio::select! {
            result = main_fn(writer) => self.exit_code(result),
            code = self.wait_for_signal() => code,
        }
    }

    fn exit_code(&self, result: Result<(), AppError>) -> i32 {
        match result {
            Ok(()) => EXIT_SUCCESS,
            Err(err) => {
                error!(app = %self.name, error = %err, "Run failed");
                eprintln!("Error: {err}");
                EXIT_FAILURE
            }
        }
    }

    /// Resolves with the signal exit code; never resolves if no handler
    /// could be installed
    async fn wait_for_signal(&self) -> i32 {
        match listen_for_signal().await {
            Ok(code) => code,
            Err(err) => {
                warn!(app = %self.name, error = %err, "Signal handlers unavailable");
                std::future::pending().await
            }
        }
    }
}

#[cfg(unix)]
async fn listen_for_signal() -> io::Result<i32> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sighup = signal(SignalKind::hangup())?;

    let code = tokio::select! {
        _ = sigterm.recv() => {
            eprintln!("Received SIGTERM");
            143 // 128 + 15
        }
        _ = sigint.recv() => {
            eprintln!("Received SIGINT");
            130 // 128 + 2
        }
        _ = sighup.recv() => {
            eprintln!("Received SIGHUP");
            129 // 128 + 1
        }
    };
    Ok(code)
}

#[cfg(not(unix))]
async fn listen_for_signal() -> io::Result<i32> {
    tokio::signal::ctrl_c().await?;
    eprintln!("Received Ctrl+C");
    Ok(130)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_app_new() {
        let app = CliApp::new("wallet");
        assert_eq!(app.name(), "wallet");
    }

    #[tokio::test]
    async fn success_exits_zero() {
        let code = CliApp::new("wallet").run(|_stdout| async { Ok(()) }).await;
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[tokio::test]
    async fn error_exits_one() {
        let code = CliApp::new("wallet")
            .run(|_stdout| async { Err(AppError::InvalidArguments("boom".to_string())) })
            .await;
        assert_eq!(code, EXIT_FAILURE);
    }
}
