// src/logging.rs

use crate::errors::{TarantibotError, TarantibotResult};
use crate::models::ApiCallLog;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use std::path::Path;

/// Starts the file logger. The terminal belongs to the UI, so nothing is
/// written to stdout or stderr. Keep the returned handle alive for the whole
/// session; dropping it flushes and stops logging.
pub fn init_logging(level: &str, directory: &Path) -> TarantibotResult<LoggerHandle> {
    Logger::try_with_str(level)
        .map_err(|e| TarantibotError::logging_error(format!("Invalid log level '{}': {}", level, e)))?
        .log_to_file(FileSpec::default().directory(directory).basename("tarantibot"))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|e| TarantibotError::logging_error(format!("Failed to start logger: {}", e)))
}

/// Logs an API call made to the answering service.
pub fn log_api_call(log: &ApiCallLog) {
    let status = log
        .response_status
        .map(|code| code.to_string())
        .unwrap_or_else(|| "none".to_string());

    log::info!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        status,
        log.response_time_ms
    );
}
