use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::accommodation::Accommodation;
use crate::models::booking::{ActorRole, Booking, BookingRequest, Operation};
use crate::models::guide::Guide;
use crate::models::tour_package::TourPackage;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccommodationFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// The backend operations the booking core requires, independent of wire
/// format. Implemented over HTTP by `RemoteBookingApi`.
pub trait BookingOperations {
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, BookingError>;
    async fn get_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError>;
    async fn set_booking_status(
        &self,
        booking_id: Uuid,
        operation: Operation,
        actor: ActorRole,
    ) -> Result<Booking, BookingError>;
    async fn mark_paid(&self, booking_id: Uuid) -> Result<Booking, BookingError>;
    async fn get_guide_blocked_dates(&self, guide_id: Uuid)
        -> Result<Vec<NaiveDate>, BookingError>;
    async fn get_guide(&self, guide_id: Uuid) -> Result<Guide, BookingError>;
    async fn get_tour_packages_for_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<TourPackage>, BookingError>;
    async fn get_accommodations(
        &self,
        filter: &AccommodationFilter,
    ) -> Result<Vec<Accommodation>, BookingError>;
}
