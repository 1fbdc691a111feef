//! Custom error types for cascade-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cascade-cli operations
#[derive(Error, Debug)]
pub enum CascadeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and gate checks
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A budget already exists for the subsidiary/period combination
    #[error("A budget already exists for subsidiary '{subsidiary}' starting {period_start}")]
    Conflict {
        subsidiary: String,
        period_start: String,
    },

    /// Publishing to the external accounting system failed
    #[error("Publish error: {0}")]
    Publish(String),

    /// Catalog import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl CascadeError {
    /// Create a "not found" error for subsidiaries
    pub fn subsidiary_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Subsidiary",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for departments
    pub fn department_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Department",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for locations
    pub fn location_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Location",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for GL accounts
    pub fn gl_account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "GL account",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for GL lines at a location
    pub fn duplicate_gl_line(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "GL line",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for CascadeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CascadeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for cascade-cli operations
pub type CascadeResult<T> = Result<T, CascadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CascadeError::Config("missing settings file".into());
        assert_eq!(err.to_string(), "Configuration error: missing settings file");
    }

    #[test]
    fn test_not_found_error() {
        let err = CascadeError::department_not_found("d9");
        assert_eq!(err.to_string(), "Department not found: d9");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_conflict_error() {
        let err = CascadeError::Conflict {
            subsidiary: "US West Subsidiary".into(),
            period_start: "2024-01-01".into(),
        };
        assert!(err.is_conflict());
        assert!(err.to_string().contains("US West Subsidiary"));
        assert!(err.to_string().contains("2024-01-01"));
    }

    #[test]
    fn test_duplicate_error() {
        let err = CascadeError::duplicate_gl_line("a1");
        assert_eq!(err.to_string(), "GL line already exists: a1");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cascade_err: CascadeError = io_err.into();
        assert!(matches!(cascade_err, CascadeError::Io(_)));
    }
}
