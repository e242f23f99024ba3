use chrono::NaiveDate;
use uuid::Uuid;

use tourbook_core::config::PlatformConfig;
use tourbook_core::models::booking::BookingRequest;
use tourbook_core::models::destination::Destination;
use tourbook_core::models::guide::{Guide, GuideTier};
use tourbook_core::models::provider::ProviderRef;
use tourbook_core::models::tour_package::{Stop, TimelineEntry, TimelineRef, TourPackage};
use tourbook_core::services::booking_service::BookingService;
use tourbook_core::services::pricing_service::RateCard;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn test_guide(tier: GuideTier, open_dates: &[&str]) -> Guide {
    Guide {
        id: Uuid::new_v4(),
        display_name: "Rio Delgado".to_string(),
        location: "Cebu City".to_string(),
        bio: Some("Canyoneering and island hopping since 2016".to_string()),
        rating: Some(4.8),
        price_per_day: 500.0,
        solo_price_per_day: 500.0,
        additional_fee_per_head: 50.0,
        available_days: vec!["All".to_string()],
        specific_available_dates: open_dates.iter().map(|d| date(d)).collect(),
        guide_tier: tier,
        booking_count: 0,
    }
}

pub fn test_destination() -> Destination {
    Destination {
        id: Uuid::new_v4(),
        name: "South Cebu".to_string(),
        location: "Cebu, Philippines".to_string(),
        images: vec!["south-cebu.jpg".to_string()],
        attractions: vec![
            "Kawasan Falls".to_string(),
            "Moalboal Sardine Run".to_string(),
        ],
    }
}

pub fn test_package(guide: &Guide, destination_id: Uuid) -> TourPackage {
    let falls = Stop {
        id: Uuid::new_v4(),
        name: "Kawasan Falls".to_string(),
        image: Some("kawasan.jpg".to_string()),
    };
    let sardines = Stop {
        id: Uuid::new_v4(),
        name: "Moalboal Sardine Run".to_string(),
        image: None,
    };

    TourPackage {
        id: Uuid::new_v4(),
        guide_id: guide.id,
        destination_id,
        name: "South Cebu Day Tour".to_string(),
        description: "Falls, sardines, and sunsets.".to_string(),
        duration_label: "1 day".to_string(),
        max_group_size: 8,
        price_per_day: 500.0,
        solo_price_per_day: 500.0,
        additional_fee_per_head: 50.0,
        what_to_bring: vec!["Water shoes".to_string(), "Dry bag".to_string()],
        itinerary: vec![
            TimelineEntry {
                start_time: "8:00 AM".to_string(),
                end_time: "11:00 AM".to_string(),
                activity_name: falls.name.clone(),
                reference: TimelineRef::Stop { id: Some(falls.id) },
            },
            TimelineEntry {
                start_time: "1:00 PM".to_string(),
                end_time: "3:00 PM".to_string(),
                activity_name: sardines.name.clone(),
                reference: TimelineRef::Stop {
                    id: Some(sardines.id),
                },
            },
        ],
        stops: vec![falls, sardines],
    }
}

pub fn booking_request(
    guide: &Guide,
    check_in: &str,
    check_out: &str,
    guests: u32,
) -> BookingRequest {
    BookingRequest {
        tourist_id: Uuid::new_v4(),
        provider: ProviderRef::Guide(guide.id),
        destination_id: Some(Uuid::new_v4()),
        accommodation_id: None,
        check_in: date(check_in),
        check_out: date(check_out),
        num_guests: guests,
    }
}

pub fn standard_rates() -> RateCard {
    RateCard {
        price_per_day: 500.0,
        solo_price_per_day: 500.0,
        additional_fee_per_head: 50.0,
    }
}

pub fn service_with_guide(guide: &Guide) -> BookingService {
    init_logging();
    let service = BookingService::new(PlatformConfig::default());
    service.register_guide(guide.clone());
    service
}
