//! Tracing setup
//!
//! The filter comes from `GASTOS_LOG` when set; otherwise `-v` raises the
//! default `gastos=warn` to info and `-vv` to debug. The full-screen UI logs
//! to a file so the terminal stays clean.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Environment variable holding an explicit filter
pub const LOG_ENV: &str = "GASTOS_LOG";

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Default filter directive for a verbosity level
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "gastos=warn",
        1 => "gastos=info",
        _ => "gastos=debug",
    }
}

/// Initializes the global tracing subscriber; later calls are no-ops.
pub fn init_tracing(verbosity: u8, target: LogTarget) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

        match target {
            LogTarget::Stderr => {
                let _ = fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .try_init();
            }
            LogTarget::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(&path);
                match file {
                    Ok(file) => {
                        let _ = fmt()
                            .with_env_filter(filter)
                            .with_writer(Mutex::new(file))
                            .with_ansi(false)
                            .try_init();
                    }
                    // Without a log file, stay silent rather than draw over the UI
                    Err(_) => {
                        let _ = fmt()
                            .with_env_filter(filter)
                            .with_writer(std::io::sink)
                            .try_init();
                    }
                }
            }
        }
    });
}
