use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::provider::ProviderRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Confirmed,
    PendingPayment,
    Completed,
    Cancelled,
    Declined,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Declined
        )
    }

    /// Whether a booking in this status keeps the provider's dates blocked.
    pub fn holds_dates(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending
                | BookingStatus::Accepted
                | BookingStatus::Confirmed
                | BookingStatus::PendingPayment
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Declined => "declined",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Tourist,
    Provider,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Tourist => write!(f, "tourist"),
            ActorRole::Provider => write!(f, "provider"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Accept,
    Decline,
    RecordDownPayment,
    ConfirmPayment,
    Cancel,
    MarkPaid,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Operation::Create => "create",
            Operation::Accept => "accept",
            Operation::Decline => "decline",
            Operation::RecordDownPayment => "record_down_payment",
            Operation::ConfirmPayment => "confirm_payment",
            Operation::Cancel => "cancel",
            Operation::MarkPaid => "mark_paid",
        };
        write!(f, "{}", label)
    }
}

/// Result of an online down-payment capture attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    Captured,
    Processing,
}

/// How a booking appears to a given user: their own trip, or a client's
/// booking they are fulfilling. A user is never both on the same booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingSide {
    MyTrip,
    ClientBooking,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub tourist_id: Uuid,
    pub provider: ProviderRef,
    /// Absent for pure-accommodation bookings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: u32,
    pub status: BookingStatus,
    pub total_price: f64,
    pub down_payment: f64,
    pub balance_due: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn side_for(&self, user_id: Uuid) -> BookingSide {
        if self.tourist_id == user_id {
            BookingSide::MyTrip
        } else {
            BookingSide::ClientBooking
        }
    }
}

/// Tourist-facing submit payload for a new booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingRequest {
    pub tourist_id: Uuid,
    pub provider: ProviderRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_guests: u32,
}
