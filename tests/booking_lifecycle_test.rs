mod common;

use std::sync::Arc;
use std::thread;

use common::{booking_request, service_with_guide, standard_rates, test_guide};
use tourbook_core::error::BookingError;
use tourbook_core::models::booking::{
    ActorRole, BookingSide, BookingStatus, PaymentOutcome,
};
use tourbook_core::models::guide::GuideTier;

#[test]
fn test_happy_path_offline_settlement() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13", "2025-11-14"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-14", 3),
            standard_rates(),
            None,
        )
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, 600.0);
    assert_eq!(booking.down_payment, 180.0);
    assert_eq!(booking.balance_due, 420.0);

    let accepted = service.accept(booking.id, ActorRole::Provider).unwrap();
    assert_eq!(accepted.status, BookingStatus::Accepted);

    let completed = service.mark_paid(booking.id, ActorRole::Provider).unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
    // Balance settled in cash with the provider.
    assert_eq!(completed.balance_due, 0.0);
    println!("✓ Offline settlement flow passed");
}

#[test]
fn test_online_payment_flow_reaches_completed() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    service.accept(booking.id, ActorRole::Provider).unwrap();

    let pending_payment = service
        .record_down_payment(booking.id, ActorRole::Tourist, PaymentOutcome::Processing)
        .unwrap();
    assert_eq!(pending_payment.status, BookingStatus::PendingPayment);

    let completed = service
        .confirm_payment(booking.id, ActorRole::Tourist)
        .unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
    println!("✓ Online payment flow passed");
}

#[test]
fn test_captured_down_payment_confirms_booking() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    service.accept(booking.id, ActorRole::Provider).unwrap();

    let confirmed = service
        .record_down_payment(booking.id, ActorRole::Tourist, PaymentOutcome::Captured)
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    // A confirmed booking can still settle the balance offline.
    let completed = service.mark_paid(booking.id, ActorRole::Provider).unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
}

#[test]
fn test_free_tier_guide_cannot_accept_second_booking() {
    let guide = test_guide(GuideTier::Free, &["2025-11-13", "2025-11-20"]);
    let service = service_with_guide(&guide);

    let first = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    service.accept(first.id, ActorRole::Provider).unwrap();

    let second = service
        .create(
            booking_request(&guide, "2025-11-20", "2025-11-20", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    let err = service.accept(second.id, ActorRole::Provider).unwrap_err();
    assert_eq!(err, BookingError::TierLimitExceeded);
    assert!(err.is_recoverable());

    // The tourist still sees the booking as pending.
    assert_eq!(
        service.booking(second.id).unwrap().status,
        BookingStatus::Pending
    );
    println!("✓ Free tier gate passed");
}

#[test]
fn test_tier_gate_never_applies_to_decline() {
    let guide = test_guide(GuideTier::Free, &["2025-11-13", "2025-11-20"]);
    let service = service_with_guide(&guide);

    let first = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    service.accept(first.id, ActorRole::Provider).unwrap();

    let second = service
        .create(
            booking_request(&guide, "2025-11-20", "2025-11-20", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    let declined = service.decline(second.id, ActorRole::Provider).unwrap();
    assert_eq!(declined.status, BookingStatus::Declined);
}

#[test]
fn test_paid_tier_guide_accepts_beyond_cap() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13", "2025-11-20", "2025-11-27"]);
    let service = service_with_guide(&guide);

    for day in ["2025-11-13", "2025-11-20", "2025-11-27"] {
        let booking = service
            .create(booking_request(&guide, day, day, 2), standard_rates(), None)
            .unwrap();
        service.accept(booking.id, ActorRole::Provider).unwrap();
    }
    assert_eq!(service.guide(guide.id).unwrap().booking_count, 3);
}

#[test]
fn test_cancel_on_completed_booking_is_rejected() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();
    service.accept(booking.id, ActorRole::Provider).unwrap();
    service.mark_paid(booking.id, ActorRole::Provider).unwrap();

    let err = service.cancel(booking.id, ActorRole::Tourist).unwrap_err();
    assert!(matches!(err, BookingError::InvalidTransition { .. }));
    assert_eq!(
        service.booking(booking.id).unwrap().status,
        BookingStatus::Completed
    );
    println!("✓ Terminal status stays terminal");
}

#[test]
fn test_unlisted_transitions_are_rejected_and_leave_status_unchanged() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();

    // Wrong actor for the operation.
    assert!(matches!(
        service.accept(booking.id, ActorRole::Tourist).unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    assert!(matches!(
        service.decline(booking.id, ActorRole::Tourist).unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    // Operations that skip ahead of the current status.
    assert!(matches!(
        service.cancel(booking.id, ActorRole::Tourist).unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    assert!(matches!(
        service
            .confirm_payment(booking.id, ActorRole::Tourist)
            .unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    assert!(matches!(
        service.mark_paid(booking.id, ActorRole::Provider).unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    assert!(matches!(
        service
            .record_down_payment(booking.id, ActorRole::Tourist, PaymentOutcome::Captured)
            .unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));

    assert_eq!(
        service.booking(booking.id).unwrap().status,
        BookingStatus::Pending
    );

    // Declined bookings accept nothing further.
    service.decline(booking.id, ActorRole::Provider).unwrap();
    assert!(matches!(
        service.accept(booking.id, ActorRole::Provider).unwrap_err(),
        BookingError::InvalidTransition { .. }
    ));
    println!("✓ Transition totality passed");
}

#[test]
fn test_balance_invariant_holds_through_lifecycle() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 4),
            standard_rates(),
            None,
        )
        .unwrap();

    let check = |id| {
        let b = service.booking(id).unwrap();
        assert_eq!(b.balance_due, b.total_price - b.down_payment);
    };
    check(booking.id);
    service.accept(booking.id, ActorRole::Provider).unwrap();
    check(booking.id);
    service
        .record_down_payment(booking.id, ActorRole::Tourist, PaymentOutcome::Processing)
        .unwrap();
    check(booking.id);
}

#[test]
fn test_visibility_splits_trips_from_client_bookings() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = service_with_guide(&guide);

    let request = booking_request(&guide, "2025-11-13", "2025-11-13", 2);
    let tourist_id = request.tourist_id;
    let booking = service.create(request, standard_rates(), None).unwrap();

    assert_eq!(booking.side_for(tourist_id), BookingSide::MyTrip);
    assert_eq!(booking.side_for(guide.id), BookingSide::ClientBooking);

    let tourist_view = service.bookings_for_user(tourist_id);
    assert_eq!(tourist_view.trips.len(), 1);
    assert!(tourist_view.client_bookings.is_empty());

    let guide_view = service.bookings_for_user(guide.id);
    assert!(guide_view.trips.is_empty());
    assert_eq!(guide_view.client_bookings.len(), 1);

    let bystander_view = service.bookings_for_user(uuid::Uuid::new_v4());
    assert!(bystander_view.trips.is_empty());
    assert!(bystander_view.client_bookings.is_empty());
}

#[test]
fn test_pure_accommodation_booking_needs_no_destination() {
    let guide = test_guide(GuideTier::Paid, &[]);
    let service = service_with_guide(&guide);
    let host_id = uuid::Uuid::new_v4();

    let request = tourbook_core::models::booking::BookingRequest {
        tourist_id: uuid::Uuid::new_v4(),
        provider: tourbook_core::models::provider::ProviderRef::AccommodationHost(host_id),
        destination_id: None,
        accommodation_id: Some(uuid::Uuid::new_v4()),
        check_in: common::date("2025-11-13"),
        check_out: common::date("2025-11-14"),
        num_guests: 2,
    };

    let booking = service
        .create(request, standard_rates(), Some(1800.0))
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.total_price, 500.0 + 50.0 + 1800.0);

    let accepted = service.accept(booking.id, ActorRole::Provider).unwrap();
    assert_eq!(accepted.status, BookingStatus::Accepted);
}

#[test]
fn test_concurrent_accept_and_decline_serialize() {
    let guide = test_guide(GuideTier::Paid, &["2025-11-13"]);
    let service = Arc::new(service_with_guide(&guide));

    let booking = service
        .create(
            booking_request(&guide, "2025-11-13", "2025-11-13", 2),
            standard_rates(),
            None,
        )
        .unwrap();

    let accepting = {
        let service = Arc::clone(&service);
        let id = booking.id;
        thread::spawn(move || service.accept(id, ActorRole::Provider))
    };
    let declining = {
        let service = Arc::clone(&service);
        let id = booking.id;
        thread::spawn(move || service.decline(id, ActorRole::Provider))
    };

    let outcomes = [accepting.join().unwrap(), declining.join().unwrap()];
    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    assert_eq!(successes, 1);
    assert!(outcomes.iter().any(|outcome| matches!(
        outcome,
        Err(BookingError::InvalidTransition { .. })
    )));

    let settled = service.booking(booking.id).unwrap().status;
    assert!(settled == BookingStatus::Accepted || settled == BookingStatus::Declined);
    println!("✓ Concurrent transition serialization passed");
}
