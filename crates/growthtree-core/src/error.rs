//! Core error types for growthtree-core.
//!
//! Every engine operation reports failures through [`CoreError`]. Operations
//! validate before mutating, so an `Err` always means the in-memory state is
//! exactly what it was before the call.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for growthtree-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or missing required input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation referenced an id that is not in the current collection
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Persisted snapshot does not match the expected shape
    #[error("Corrupt state under '{key}': {message}")]
    CorruptState { key: String, message: String },

    /// Persistence gateway errors
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn habit_not_found(id: &str) -> Self {
        CoreError::NotFound {
            kind: EntityKind::Habit,
            id: id.to_string(),
        }
    }

    pub(crate) fn goal_not_found(id: &str) -> Self {
        CoreError::NotFound {
            kind: EntityKind::Goal,
            id: id.to_string(),
        }
    }

    pub(crate) fn corrupt(key: &str, message: impl Into<String>) -> Self {
        CoreError::CorruptState {
            key: key.to_string(),
            message: message.into(),
        }
    }

    /// True for `NotFound` errors.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound { .. })
    }

    /// True for `Validation` errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// True for `CorruptState` errors.
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, CoreError::CorruptState { .. })
    }
}

/// Entity kinds that can be looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Habit,
    Goal,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Habit => write!(f, "Habit"),
            EntityKind::Goal => write!(f, "Goal"),
        }
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required text field is empty or whitespace-only
    #[error("'{0}' must not be empty")]
    EmptyField(String),

    /// Date is missing or not in YYYY-MM-DD form
    #[error("Invalid date for '{field}': '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// Numeric value outside its allowed range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Persistence gateway errors.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Failed to read a stored value
    #[error("Failed to read '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Stored bytes are not valid JSON
    #[error("Stored value for '{key}' is not valid JSON: {message}")]
    Malformed { key: String, message: String },

    /// Failed to write a value
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Storage is out of space
    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
