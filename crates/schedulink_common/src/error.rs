// --- File: crates/schedulink_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Schedulink errors.
///
/// Every crate converts its own error enum into this one at the HTTP
/// boundary, so status codes and response bodies stay consistent.
#[derive(Error, Debug)]
pub enum SchedulinkError {
    /// A required field was missing or malformed
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A referenced user or slot does not exist
    #[error("{0}")]
    NotFoundError(String),

    /// The request was well-formed but violates a domain rule,
    /// e.g. a duplicate email or booking a slot that is already booked
    #[error("{0}")]
    BusinessRuleError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SchedulinkError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulinkError::ValidationError(_) => 400,
            SchedulinkError::NotFoundError(_) => 404,
            SchedulinkError::BusinessRuleError(_) => 400,
            SchedulinkError::DatabaseError(_) => 500,
            SchedulinkError::ConfigError(_) => 500,
            SchedulinkError::InternalError(_) => 500,
        }
    }
}

// Utility functions for error handling
pub fn validation_error<T: fmt::Display>(message: T) -> SchedulinkError {
    SchedulinkError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SchedulinkError {
    SchedulinkError::NotFoundError(message.to_string())
}

pub fn business_rule<T: fmt::Display>(message: T) -> SchedulinkError {
    SchedulinkError::BusinessRuleError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> SchedulinkError {
    SchedulinkError::InternalError(message.to_string())
}
