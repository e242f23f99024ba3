use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::config::PlatformConfig;
use crate::error::BookingError;
use crate::models::booking::{
    ActorRole, Booking, BookingRequest, BookingSide, BookingStatus, Operation, PaymentOutcome,
};
use crate::models::guide::{Guide, GuideTier};
use crate::models::provider::ProviderRef;
use crate::services::availability_service::{
    date_span, AvailabilityService, DateStatus, DayAvailability,
};
use crate::services::pricing_service::{PricingService, RateCard};

/// A user's bookings, split by which side of each booking they are on.
#[derive(Debug, Default)]
pub struct UserBookings {
    pub trips: Vec<Booking>,
    pub client_bookings: Vec<Booking>,
}

#[derive(Default)]
struct Registry {
    bookings: HashMap<Uuid, Booking>,
    guides: HashMap<Uuid, Guide>,
}

/// Backend of record for the booking lifecycle. Every transition is an atomic
/// read-modify-write under one lock, so concurrent attempts on the same
/// booking serialize: exactly one succeeds and the rest see the new status.
/// Availability reads under the same lock are snapshot-consistent with the
/// transitions that create and release date blocks.
pub struct BookingService {
    config: PlatformConfig,
    pricing: PricingService,
    registry: Mutex<Registry>,
}

impl BookingService {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            pricing: PricingService::new(config.clone()),
            config,
            registry: Mutex::new(Registry::default()),
        }
    }

    pub fn register_guide(&self, guide: Guide) {
        let mut registry = self.registry.lock().unwrap();
        registry.guides.insert(guide.id, guide);
    }

    pub fn guide(&self, guide_id: Uuid) -> Option<Guide> {
        self.registry.lock().unwrap().guides.get(&guide_id).cloned()
    }

    pub fn booking(&self, booking_id: Uuid) -> Option<Booking> {
        self.registry
            .lock()
            .unwrap()
            .bookings
            .get(&booking_id)
            .cloned()
    }

    /// Tourist submit action. Validates the request, checks every requested
    /// date against the guide's calendar, prices the trip, and records the
    /// booking as pending. The requested dates are blocked for the provider
    /// the moment this returns.
    pub fn create(
        &self,
        request: BookingRequest,
        rates: RateCard,
        accommodation_price: Option<f64>,
    ) -> Result<Booking, BookingError> {
        validate_request(&request)?;

        let mut registry = self.registry.lock().unwrap();

        if let ProviderRef::Guide(guide_id) = request.provider {
            let guide = registry
                .guides
                .get(&guide_id)
                .ok_or_else(|| BookingError::NotFound("Guide".to_string()))?;

            let bookings: Vec<Booking> = registry.bookings.values().cloned().collect();
            let blocked = AvailabilityService::blocked_dates(guide_id, &bookings);

            for date in date_span(request.check_in, request.check_out) {
                let status =
                    AvailabilityService::classify(date, &guide.specific_available_dates, &blocked);
                if status != DateStatus::Available {
                    return Err(BookingError::AvailabilityConflict { date });
                }
            }
        }

        let breakdown = self
            .pricing
            .quote(rates, request.num_guests, accommodation_price);
        let now = Utc::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            tourist_id: request.tourist_id,
            provider: request.provider,
            destination_id: request.destination_id,
            accommodation_id: request.accommodation_id,
            check_in: request.check_in,
            check_out: request.check_out,
            num_guests: request.num_guests,
            status: BookingStatus::Pending,
            total_price: breakdown.total_price,
            down_payment: breakdown.down_payment,
            balance_due: breakdown.balance_due,
            created_at: now,
            updated_at: now,
        };

        log::info!(
            "Created booking {} ({} to {}) for provider {}",
            booking.id,
            booking.check_in,
            booking.check_out,
            booking.provider.id()
        );
        registry.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    pub fn accept(&self, booking_id: Uuid, actor: ActorRole) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::Accept, actor, None)
    }

    pub fn decline(&self, booking_id: Uuid, actor: ActorRole) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::Decline, actor, None)
    }

    pub fn record_down_payment(
        &self,
        booking_id: Uuid,
        actor: ActorRole,
        outcome: PaymentOutcome,
    ) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::RecordDownPayment, actor, Some(outcome))
    }

    pub fn confirm_payment(
        &self,
        booking_id: Uuid,
        actor: ActorRole,
    ) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::ConfirmPayment, actor, None)
    }

    pub fn cancel(&self, booking_id: Uuid, actor: ActorRole) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::Cancel, actor, None)
    }

    pub fn mark_paid(&self, booking_id: Uuid, actor: ActorRole) -> Result<Booking, BookingError> {
        self.apply(booking_id, Operation::MarkPaid, actor, None)
    }

    fn apply(
        &self,
        booking_id: Uuid,
        operation: Operation,
        actor: ActorRole,
        outcome: Option<PaymentOutcome>,
    ) -> Result<Booking, BookingError> {
        let mut registry = self.registry.lock().unwrap();
        let registry = &mut *registry;

        let (status, provider) = match registry.bookings.get(&booking_id) {
            Some(booking) => (booking.status, booking.provider),
            None => return Err(BookingError::NotFound("Booking".to_string())),
        };

        let next = next_status(status, operation, actor, outcome)?;

        // The tier gate rejects before any state changes; the booking stays
        // pending and the guide is prompted to upgrade.
        if operation == Operation::Accept {
            if let ProviderRef::Guide(guide_id) = provider {
                let guide = registry
                    .guides
                    .get_mut(&guide_id)
                    .ok_or_else(|| BookingError::NotFound("Guide".to_string()))?;
                if guide.guide_tier == GuideTier::Free
                    && guide.booking_count >= self.config.free_tier_booking_cap
                {
                    return Err(BookingError::TierLimitExceeded);
                }
                guide.booking_count += 1;
            }
        }

        let booking = registry
            .bookings
            .get_mut(&booking_id)
            .ok_or_else(|| BookingError::NotFound("Booking".to_string()))?;
        booking.status = next;
        if operation == Operation::MarkPaid {
            // Balance collected in person; nothing left to remit online.
            booking.balance_due = 0.0;
        }
        booking.updated_at = Utc::now();

        log::info!("Booking {} is now {}", booking.id, booking.status);
        Ok(booking.clone())
    }

    /// Everything a user can see, split into their own trips and the client
    /// bookings they are fulfilling as a provider.
    pub fn bookings_for_user(&self, user_id: Uuid) -> UserBookings {
        let registry = self.registry.lock().unwrap();
        let mut result = UserBookings::default();

        for booking in registry.bookings.values() {
            match booking.side_for(user_id) {
                BookingSide::MyTrip => result.trips.push(booking.clone()),
                BookingSide::ClientBooking if booking.provider.id() == user_id => {
                    result.client_bookings.push(booking.clone())
                }
                BookingSide::ClientBooking => {}
            }
        }
        result
    }

    pub fn blocked_dates(&self, guide_id: Uuid) -> HashSet<NaiveDate> {
        let registry = self.registry.lock().unwrap();
        let bookings: Vec<Booking> = registry.bookings.values().cloned().collect();
        AvailabilityService::blocked_dates(guide_id, &bookings)
    }

    /// Month view rendered from the same snapshot the lifecycle writes to.
    pub fn calendar_month(
        &self,
        guide_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>, BookingError> {
        let registry = self.registry.lock().unwrap();
        let guide = registry
            .guides
            .get(&guide_id)
            .ok_or_else(|| BookingError::NotFound("Guide".to_string()))?;

        let bookings: Vec<Booking> = registry.bookings.values().cloned().collect();
        let blocked = AvailabilityService::blocked_dates(guide_id, &bookings);
        Ok(AvailabilityService::calendar_month(year, month, guide, &blocked))
    }
}

fn validate_request(request: &BookingRequest) -> Result<(), BookingError> {
    if request.num_guests == 0 {
        return Err(BookingError::Validation(
            "At least one guest is required".to_string(),
        ));
    }
    if request.check_out < request.check_in {
        return Err(BookingError::Validation(
            "Check-out date precedes check-in date".to_string(),
        ));
    }
    if request.destination_id.is_none() && request.accommodation_id.is_none() {
        return Err(BookingError::Validation(
            "A destination or an accommodation is required".to_string(),
        ));
    }
    Ok(())
}

/// The transition table. Total over (status, operation, actor): anything not
/// listed is an invalid transition, never a silent no-op.
fn next_status(
    status: BookingStatus,
    operation: Operation,
    actor: ActorRole,
    outcome: Option<PaymentOutcome>,
) -> Result<BookingStatus, BookingError> {
    use ActorRole::{Provider, Tourist};
    use BookingStatus::*;
    use Operation::*;

    let rejected = || BookingError::InvalidTransition {
        status,
        operation,
        actor,
    };

    let next = match (status, operation, actor) {
        (Pending, Accept, Provider) => Accepted,
        (Pending, Decline, Provider) => Declined,
        (Accepted, RecordDownPayment, Tourist) => match outcome {
            Some(PaymentOutcome::Captured) => Confirmed,
            Some(PaymentOutcome::Processing) => PendingPayment,
            None => return Err(rejected()),
        },
        (Accepted | Confirmed | PendingPayment, Cancel, Tourist) => Cancelled,
        (Accepted | Confirmed, MarkPaid, Provider) => Completed,
        (PendingPayment, ConfirmPayment, Tourist) => Completed,
        _ => return Err(rejected()),
    };
    Ok(next)
}
