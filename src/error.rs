use derive_more::Display;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Defines the application's custom error types.
///
#[derive(Debug, Error)]
pub enum Error {
    #[error("Not supported: {0}")]
    NotSupported(String),
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Descriptor error: {}: {reason}", .path.display())]
    Descriptor { path: PathBuf, reason: String },
    #[error("Communication error: {0}")]
    Communication(String),
    #[error("vmrest API error: {0} failed: status {1}, body: {2}")]
    Vmrest(VmrestError, reqwest::StatusCode, String),
    #[error("Header convert error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Environment error: {0}")]
    Environment(#[from] dotenv::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to set logger: {0}")]
    Logger(#[from] tracing_log::log::SetLoggerError),
    #[error("IO error: {0}")]
    InputOutput(#[from] std::io::Error),
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] tracing::dispatcher::SetGlobalDefaultError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl Error {
    /// Wraps a failed descriptor read, keeping the offending path.
    ///
    pub fn descriptor(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Descriptor {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Represents the vmrest operation that was rejected by the remote side.
///
#[derive(Debug, Display)]
pub enum VmrestError {
    List,
    Folders,
    Power,
}
