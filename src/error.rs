use chrono::NaiveDate;

use crate::models::booking::{ActorRole, BookingStatus, Operation};

#[derive(Debug, Clone, PartialEq)]
pub enum BookingError {
    Validation(String),
    AvailabilityConflict { date: NaiveDate },
    InvalidTransition {
        status: BookingStatus,
        operation: Operation,
        actor: ActorRole,
    },
    TierLimitExceeded,
    NotFound(String),
    Transport(String),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::Validation(msg) => write!(f, "Validation error: {}", msg),
            BookingError::AvailabilityConflict { date } => {
                write!(f, "Date {} is not available for booking", date)
            }
            BookingError::InvalidTransition {
                status,
                operation,
                actor,
            } => write!(
                f,
                "Operation {} is not allowed for {} on a {} booking",
                operation, actor, status
            ),
            BookingError::TierLimitExceeded => {
                write!(f, "Free tier booking limit reached; upgrade to accept more bookings")
            }
            BookingError::NotFound(what) => write!(f, "{} not found", what),
            BookingError::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for BookingError {}

impl BookingError {
    /// Recoverable errors are surfaced to the initiating user as an actionable
    /// message; the rest abort the operation and require a state refresh.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BookingError::Validation(_) | BookingError::TierLimitExceeded
        )
    }
}
