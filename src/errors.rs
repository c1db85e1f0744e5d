// src/errors.rs

use thiserror::Error;

/// Errors that can stop the application from starting or running.
///
/// Failures of an individual `/ask` exchange are not represented here: those
/// are recovered by the exchange controller and never leave it.
#[derive(Debug, Error)]
pub enum TarantibotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TarantibotError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn logging_error(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    pub fn terminal_error(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }
}

pub type TarantibotResult<T> = Result<T, TarantibotError>;
