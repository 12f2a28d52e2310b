//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MeritSync
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MeritSyncError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Tracker API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Status option not found: {0}")]
    StatusOptionNotFound(String),

    #[error("No records to export")]
    EmptyExport,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for MeritSync operations
pub type Result<T> = std::result::Result<T, MeritSyncError>;
