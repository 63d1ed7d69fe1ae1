//! Shared logging utilities for consistent tracing across all processes

use crate::types::ProcessId;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Filter directives for a process at the given base level
pub fn filter_directives(process_id: &ProcessId, base_level: &str) -> String {
    match process_id {
        ProcessId::WebServer => format!(
            "webserver={base_level},pipeline={base_level},shared={base_level},tower_http=debug,axum={base_level},reqwest=warn"
        ),
        ProcessId::Survey => {
            format!("survey={base_level},pipeline={base_level},shared={base_level},reqwest=warn")
        }
    }
}

/// Initialize tracing subscriber with an optional log level
///
/// `RUST_LOG`, when set, takes precedence over the process defaults.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let process_id = ProcessId::current();
    let base_level = log_level.unwrap_or("info");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(process_id, base_level)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for process-aware info logging
#[macro_export]
macro_rules! process_info {
    ($process_id:expr, $($arg:tt)*) => {
        tracing::info!(
            process = %$process_id,
            timestamp = shared::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for process-aware warning logging
#[macro_export]
macro_rules! process_warn {
    ($process_id:expr, $($arg:tt)*) => {
        tracing::warn!(
            process = %$process_id,
            timestamp = shared::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(process_id: &ProcessId, details: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for shutdown messages
pub fn log_shutdown(process_id: &ProcessId, reason: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "🛑 Shutting down: {}",
        reason
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(process_id: &ProcessId, context: &str, error: &dyn std::fmt::Display) {
    error!(
        process = %process_id,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(process_id: &ProcessId, message: &str) {
    info!(
        process = %process_id,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}
