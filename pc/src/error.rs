//! Store error types

use thiserror::Error;

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Invalid field value: {0}")]
    InvalidValue(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Check if this is a missing-row error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(StoreError::NotFound("place: x".to_string()).is_not_found());
        assert!(!StoreError::DuplicateSlug("cairo".to_string()).is_not_found());
    }

    #[test]
    fn test_display() {
        let err = StoreError::DuplicateSlug("pyramids".to_string());
        assert_eq!(err.to_string(), "Slug already in use: pyramids");
    }
}
