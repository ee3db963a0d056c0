//! Error types for PulseLake
//!
//! This module defines all error types used throughout the provisioning tool.

use thiserror::Error;

/// The main error type for PulseLake
#[derive(Error, Debug)]
pub enum Error {
    // ========== Connection Errors ==========
    #[error("Connection error: invalid engine URL: {0}")]
    InvalidUrl(String),

    #[error("Connection error: unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("Connection error: engine closed the connection")]
    ConnectionClosed,

    // ========== Protocol Errors ==========
    #[error("Protocol error: malformed engine reply: {0}")]
    MalformedReply(String),

    // ========== Engine Errors ==========
    #[error("Engine error: {0}")]
    Engine(String),

    // ========== Provisioning Errors ==========
    #[error("Warehouse database is not selected. Cannot create '{0}' in the default database.")]
    DatabaseNotSelected(String),

    // ========== Validation Errors ==========
    #[error("Validation error: database '{0}' is missing")]
    DatabaseMissing(String),

    #[error("Validation error: table '{0}' is missing from '{1}'")]
    TableMissing(String, String),

    // ========== Config Errors ==========
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config error: unknown environment '{0}', expected dev, test or prod")]
    UnknownEnvironment(String),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for PulseLake operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DatabaseMissing("fitness_bronze".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: database 'fitness_bronze' is missing"
        );

        let err = Error::TableMissing("users".to_string(), "fitness_silver".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: table 'users' is missing from 'fitness_silver'"
        );
    }

    #[test]
    fn test_not_selected_carries_object_name() {
        let err = Error::DatabaseNotSelected("heart_rate".to_string());
        assert!(err.to_string().contains("Cannot create 'heart_rate'"));
    }
}
