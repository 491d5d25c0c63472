use std::path::Path;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,dishes_backend=debug";

/// Owns the background writer guards; dropping it flushes and stops file logging.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Console-only logging, filtered by `RUST_LOG`.
    pub fn console() -> Self {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .init();
        Logger { guards: Vec::new() }
    }

    /// Console plus daily rolling files under `log_dir`: a plain and a JSON
    /// log of everything, and the same pair restricted to errors.
    pub fn with_files(log_dir: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let root = Path::new(log_dir);
        let error_dir = root.join("error");
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let file_log_level = std::env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let error_file_log_level = std::env::var("ERROR_FILE_LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        let (general, general_guard) = non_blocking(rolling::daily(root, "dishes-backend.log"));
        let (general_json, general_json_guard) = non_blocking(rolling::daily(root, "dishes-backend.json"));
        let (errors, errors_guard) = non_blocking(rolling::daily(&error_dir, "dishes-backend-error.log"));
        let (errors_json, errors_json_guard) = non_blocking(rolling::daily(&error_dir, "dishes-backend-error.json"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_filter(console_filter),
            )
            .with(
                fmt::layer()
                    .with_writer(general)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(general_json)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&file_log_level)),
            )
            .with(
                fmt::layer()
                    .with_writer(errors)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(errors_json)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(&error_file_log_level)),
            )
            .init();

        Ok(Logger {
            guards: vec![general_guard, general_json_guard, errors_guard, errors_json_guard],
        })
    }

    /// Picks file logging when `LOG_TO_FILE` is set, falling back to the console.
    pub fn from_env() -> Self {
        let to_file = std::env::var("LOG_TO_FILE")
            .ok()
            .and_then(|v| crate::config::parse_flag("LOG_TO_FILE", &v).ok())
            .unwrap_or(false);
        if !to_file {
            return Self::console();
        }

        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        match Self::with_files(&log_dir) {
            Ok(logger) => logger,
            Err(e) => {
                let logger = Self::console();
                tracing::warn!("File logging unavailable ({}), logging to console only", e);
                logger
            }
        }
    }
}
