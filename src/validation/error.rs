//! Error taxonomy for the marker engine
//!
//! Only dataset load failures keep the engine from reaching a usable state.
//! A missing or timed-out location fix is not an error at all; it is a
//! [`LocationState`](crate::core::LocationState) the sorter falls back on.

use crate::core::MarkerId;
use thiserror::Error;

/// Errors raised by engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Two markers in one dataset share an id; the dataset is rejected
    #[error("duplicate marker id in dataset: {id}")]
    DuplicateId { id: MarkerId },

    /// Lookup of an id the store does not hold
    #[error("marker not found: {id}")]
    NotFound { id: MarkerId },

    /// Marker coordinates outside WGS84 bounds
    #[error("invalid coordinates for marker {id}: {reason}")]
    InvalidCoordinates { id: MarkerId, reason: String },

    /// Malformed dataset document
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Stale or unknown request handle, bad argument
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Failures reported by a persistence collaborator
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("failed to read {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("stored {key} is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration load/validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_marker() {
        let err = EngineError::DuplicateId { id: MarkerId::new("NV-12") };
        assert_eq!(err.to_string(), "duplicate marker id in dataset: NV-12");

        let err = EngineError::NotFound { id: MarkerId::new("NV-99") };
        assert_eq!(err.to_string(), "marker not found: NV-99");
    }

    #[test]
    fn test_persistence_error_converts_into_engine_error() {
        let err: EngineError = PersistenceError::WriteFailed {
            key: "favorites".to_string(),
            message: "disk full".to_string(),
        }
        .into();
        assert!(matches!(err, EngineError::Persistence(_)));
        assert_eq!(err.to_string(), "failed to write favorites: disk full");
    }
}
