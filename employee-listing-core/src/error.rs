//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::{EmployeeId, WorkflowKind};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Initial fetch from the record store failed
    #[error("Failed to load employees: {0}")]
    LoadFailure(String),

    /// Remote create call failed
    #[error("Failed to create employee: {0}")]
    CreateFailure(String),

    /// Remote update call failed (remote persistence mode only)
    #[error("Failed to update employee: {0}")]
    UpdateFailure(String),

    /// Remote delete call failed (remote persistence mode only)
    #[error("Failed to delete employee: {0}")]
    DeleteFailure(String),

    /// Action invoked in a workflow state that does not permit it
    #[error("Invalid transition: `{action}` is not allowed while {state}")]
    InvalidTransition {
        action: &'static str,
        state: WorkflowKind,
    },

    /// Record not found
    #[error("Employee not found: {0}")]
    RecordNotFound(EmployeeId),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Store call did not resolve in time (milliseconds)
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::RecordNotFound(_) | Self::ValidationError(_) | Self::Timeout(_) => true,
            Self::LoadFailure(_)
            | Self::CreateFailure(_)
            | Self::UpdateFailure(_)
            | Self::DeleteFailure(_)
            | Self::InvalidTransition { .. }
            | Self::StorageError(_)
            | Self::NetworkError(_)
            | Self::SerializationError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_action_and_state() {
        let err = CoreError::InvalidTransition {
            action: "confirm_save_edit",
            state: WorkflowKind::Idle,
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: `confirm_save_edit` is not allowed while idle"
        );
        assert!(!err.is_expected());
    }

    #[test]
    fn serializes_with_code_and_details() {
        let err = CoreError::CreateFailure("HTTP 500".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CreateFailure");
        assert_eq!(json["details"], "HTTP 500");
    }
}
