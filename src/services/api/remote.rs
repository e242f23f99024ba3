use chrono::NaiveDate;
use futures::try_join;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::BookingError;
use crate::models::accommodation::Accommodation;
use crate::models::booking::{ActorRole, Booking, BookingRequest, BookingStatus, Operation};
use crate::models::guide::Guide;
use crate::models::tour_package::TourPackage;
use crate::services::api::client::{ApiClient, ApiResponse};
use crate::services::api::interface::{AccommodationFilter, BookingOperations};

/// HTTP implementation of the backend contract. Wire payloads are decoded
/// defensively: itinerary timelines and amenity flags pass through the
/// data-model parse boundary and degrade to empty defaults instead of
/// erroring past this layer.
pub struct RemoteBookingApi {
    client: ApiClient,
}

impl RemoteBookingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Everything a destination screen needs, fetched concurrently.
    pub async fn browse_destination(
        &self,
        destination_id: Uuid,
        filter: &AccommodationFilter,
    ) -> Result<(Vec<TourPackage>, Vec<Accommodation>), BookingError> {
        try_join!(
            self.get_tour_packages_for_destination(destination_id),
            self.get_accommodations(filter)
        )
    }
}

impl BookingOperations for RemoteBookingApi {
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, BookingError> {
        let body = serde_json::to_value(request)
            .map_err(|err| BookingError::Transport(err.to_string()))?;
        let response = self
            .client
            .request(Method::POST, "/api/bookings", Some(body))
            .await?;

        match response.status {
            200 | 201 => decode(response.data, "booking"),
            409 => Err(BookingError::AvailabilityConflict {
                date: conflict_date(&response.data).unwrap_or(request.check_in),
            }),
            _ => Err(failure(response, "Booking")),
        }
    }

    async fn get_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        let response = self
            .client
            .request(
                Method::GET,
                &format!("/api/account/{}/bookings", user_id),
                None,
            )
            .await?;

        match response.status {
            200 => decode(response.data, "bookings"),
            _ => Err(failure(response, "Bookings")),
        }
    }

    async fn set_booking_status(
        &self,
        booking_id: Uuid,
        operation: Operation,
        actor: ActorRole,
    ) -> Result<Booking, BookingError> {
        let body = serde_json::json!({ "operation": operation, "actor": actor });
        let response = self
            .client
            .request(
                Method::PUT,
                &format!("/api/bookings/{}/status", booking_id),
                Some(body),
            )
            .await?;

        match response.status {
            200 => decode(response.data, "booking"),
            409 => match reported_status(&response.data) {
                Some(status) => Err(BookingError::InvalidTransition {
                    status,
                    operation,
                    actor,
                }),
                None => Err(BookingError::Transport(
                    "Transition conflict with unreadable status payload".to_string(),
                )),
            },
            _ => Err(failure(response, "Booking")),
        }
    }

    async fn mark_paid(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        let response = self
            .client
            .request(
                Method::POST,
                &format!("/api/bookings/{}/mark-paid", booking_id),
                None,
            )
            .await?;

        match response.status {
            200 => decode(response.data, "booking"),
            409 => match reported_status(&response.data) {
                Some(status) => Err(BookingError::InvalidTransition {
                    status,
                    operation: Operation::MarkPaid,
                    actor: ActorRole::Provider,
                }),
                None => Err(BookingError::Transport(
                    "Transition conflict with unreadable status payload".to_string(),
                )),
            },
            _ => Err(failure(response, "Booking")),
        }
    }

    async fn get_guide_blocked_dates(
        &self,
        guide_id: Uuid,
    ) -> Result<Vec<NaiveDate>, BookingError> {
        let response = self
            .client
            .request(
                Method::GET,
                &format!("/api/guides/{}/blocked-dates", guide_id),
                None,
            )
            .await?;

        match response.status {
            200 => decode(response.data, "blocked dates"),
            _ => Err(failure(response, "Guide")),
        }
    }

    async fn get_guide(&self, guide_id: Uuid) -> Result<Guide, BookingError> {
        let response = self
            .client
            .request(Method::GET, &format!("/api/guides/{}", guide_id), None)
            .await?;

        match response.status {
            200 => decode(response.data, "guide"),
            _ => Err(failure(response, "Guide")),
        }
    }

    async fn get_tour_packages_for_destination(
        &self,
        destination_id: Uuid,
    ) -> Result<Vec<TourPackage>, BookingError> {
        let response = self
            .client
            .request(
                Method::GET,
                &format!("/api/destinations/{}/packages", destination_id),
                None,
            )
            .await?;

        match response.status {
            200 => decode(response.data, "tour packages"),
            _ => Err(failure(response, "Destination")),
        }
    }

    async fn get_accommodations(
        &self,
        filter: &AccommodationFilter,
    ) -> Result<Vec<Accommodation>, BookingError> {
        let body = serde_json::to_value(filter)
            .map_err(|err| BookingError::Transport(err.to_string()))?;
        let response = self
            .client
            .request(Method::POST, "/api/accommodations/search", Some(body))
            .await?;

        match response.status {
            200 => decode(response.data, "accommodations"),
            _ => Err(failure(response, "Accommodations")),
        }
    }
}

fn decode<T: DeserializeOwned>(data: Value, what: &str) -> Result<T, BookingError> {
    serde_json::from_value(data)
        .map_err(|err| BookingError::Transport(format!("Malformed {} payload: {}", what, err)))
}

fn conflict_date(data: &Value) -> Option<NaiveDate> {
    data.get("date")?.as_str()?.parse().ok()
}

fn reported_status(data: &Value) -> Option<BookingStatus> {
    serde_json::from_value(data.get("status")?.clone()).ok()
}

fn failure(response: ApiResponse, resource: &str) -> BookingError {
    let message = response
        .data
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Request failed")
        .to_string();
    let code = response.data.get("code").and_then(Value::as_str);

    match response.status {
        400 => BookingError::Validation(message),
        403 if code == Some("tier_limit_exceeded") => BookingError::TierLimitExceeded,
        404 => BookingError::NotFound(resource.to_string()),
        status => BookingError::Transport(format!("Status {}: {}", status, message)),
    }
}
