//! Persisted state error types

use thiserror::Error;

/// Errors raised by a key-value store
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store refused the write (quota, private mode, ...)
    #[error("Write failed for key {key}: {reason}")]
    Write { key: String, reason: String },

    /// No backing store is available in this environment
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Write {
            key: "votedPolls".to_string(),
            reason: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Write failed for key votedPolls: quota exceeded"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u64>>("[1,").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
