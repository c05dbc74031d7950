// --- File: crates/schedulink_booking/src/error.rs ---
use schedulink_common::{HttpStatusCode, SchedulinkError};
use schedulink_db::DbError;
use std::fmt;
use thiserror::Error;

/// Which kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Slot,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => write!(f, "User"),
            Entity::Slot => write!(f, "Slot"),
        }
    }
}

/// Errors raised by the user and slot services.
#[derive(Error, Debug)]
pub enum BookingError {
    /// A referenced user or slot does not exist
    #[error("{0} not found")]
    NotFound(Entity),

    /// Another user already registered this email
    #[error("Email already registered")]
    DuplicateEmail,

    /// The slot is booked, so it cannot be booked again
    #[error("Slot is already booked")]
    AlreadyBooked,

    /// The slot is available, so there is nothing to cancel
    #[error("Slot is not booked")]
    NotBooked,

    /// Unexpected storage failure
    #[error("Storage error: {0}")]
    Store(#[from] DbError),
}

/// Convert BookingError to SchedulinkError
impl From<BookingError> for SchedulinkError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_) => SchedulinkError::NotFoundError(err.to_string()),
            BookingError::DuplicateEmail
            | BookingError::AlreadyBooked
            | BookingError::NotBooked => SchedulinkError::BusinessRuleError(err.to_string()),
            BookingError::Store(e) => SchedulinkError::DatabaseError(e.to_string()),
        }
    }
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::NotFound(_) => 404,
            BookingError::DuplicateEmail => 400,
            BookingError::AlreadyBooked => 400,
            BookingError::NotBooked => 400,
            BookingError::Store(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(BookingError::NotFound(Entity::User).to_string(), "User not found");
        assert_eq!(BookingError::NotFound(Entity::Slot).to_string(), "Slot not found");
        assert_eq!(BookingError::DuplicateEmail.to_string(), "Email already registered");
        assert_eq!(BookingError::AlreadyBooked.to_string(), "Slot is already booked");
        assert_eq!(BookingError::NotBooked.to_string(), "Slot is not booked");
    }

    #[test]
    fn conversion_keeps_status_codes() {
        let cases = vec![
            BookingError::NotFound(Entity::Slot),
            BookingError::DuplicateEmail,
            BookingError::AlreadyBooked,
            BookingError::NotBooked,
            BookingError::Store(DbError::QueryError("disk full".to_string())),
        ];
        for err in cases {
            let status = err.status_code();
            let converted: SchedulinkError = err.into();
            assert_eq!(converted.status_code(), status);
        }
    }

    #[test]
    fn business_rule_message_is_not_prefixed() {
        let converted: SchedulinkError = BookingError::AlreadyBooked.into();
        assert_eq!(converted.to_string(), "Slot is already booked");
    }
}
