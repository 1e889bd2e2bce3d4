//! Error taxonomy for directory operations.
//!
//! Validation errors surface to clients with a 400 status and never reach
//! the store; storage and backup faults are server-side failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The add-partner payload is missing one or more required keys.
    /// Partial payloads are rejected wholesale, not field-by-field.
    #[error("Missing required fields")]
    MissingField,

    /// The contact info matches neither the email nor the phone shape.
    #[error("Invalid contact information format")]
    InvalidContactFormat,

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("backup failed: {0}")]
    Backup(#[from] std::io::Error),
}

impl DirectoryError {
    /// True for errors the client caused and can fix by resending.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DirectoryError::MissingField | DirectoryError::InvalidContactFormat
        )
    }
}
