use thiserror::Error;

use crate::models::HoldId;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Insufficient holds: found {found}, need at least {required}")]
    InsufficientHolds { found: usize, required: usize },

    #[error(
        "No path found: {holds} holds, {low_candidates} low candidates, \
         {high_candidates} high candidates"
    )]
    NoPathFound { holds: usize, low_candidates: usize, high_candidates: usize },

    #[error("Invalid hold data at record {index}: {reason}")]
    InvalidHoldData { index: usize, reason: String },

    #[error("Duplicate hold id: {id}")]
    DuplicateHoldId { id: HoldId },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlanError {
    /// Stable code used in JSON error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::InsufficientHolds { .. } => "INSUFFICIENT_HOLDS",
            PlanError::NoPathFound { .. } => "NO_PATH_FOUND",
            PlanError::InvalidHoldData { .. } | PlanError::DuplicateHoldId { .. } => {
                "INVALID_HOLD_DATA"
            }
            PlanError::InvalidConfig(_) => "INVALID_CONFIG",
            PlanError::SchemaVersion { .. } => "SCHEMA_VERSION",
            PlanError::Json(_) => "JSON_ERROR",
            PlanError::Yaml(_) => "YAML_ERROR",
            PlanError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the error describes the climbing input rather than a fault in
    /// the surrounding plumbing. Presentation layers show these as-is.
    pub fn is_user_facing(&self) -> bool {
        match self {
            PlanError::InsufficientHolds { .. } => true,
            PlanError::NoPathFound { .. } => true,
            PlanError::InvalidHoldData { .. } => true,
            PlanError::DuplicateHoldId { .. } => true,
            PlanError::InvalidConfig(_) => true,
            PlanError::SchemaVersion { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_message_carries_counts() {
        let err = PlanError::NoPathFound { holds: 2, low_candidates: 2, high_candidates: 2 };
        let msg = err.to_string();
        assert!(msg.contains("2 holds"));
        assert!(msg.contains("2 low candidates"));
        assert_eq!(err.code(), "NO_PATH_FOUND");
        assert!(err.is_user_facing());
    }

    #[test]
    fn test_duplicate_id_shares_invalid_hold_code() {
        let err = PlanError::DuplicateHoldId { id: 7 };
        assert_eq!(err.code(), "INVALID_HOLD_DATA");
        assert_eq!(err.to_string(), "Duplicate hold id: 7");
    }

    #[test]
    fn test_io_error_is_not_user_facing() {
        let err: PlanError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code(), "IO_ERROR");
        assert!(!err.is_user_facing());
    }
}
