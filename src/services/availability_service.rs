use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::models::booking::Booking;
use crate::models::guide::Guide;
use crate::models::provider::ProviderRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    Available,
    Blocked,
    Unavailable,
}

/// One day of the calendar month view.
#[derive(Debug, Clone, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub status: DateStatus,
    /// Whether the guide's recurring weekly schedule covers this day.
    /// Display hint only; never consulted for booking enforcement.
    pub recurring_open: bool,
}

pub struct AvailabilityService;

impl AvailabilityService {
    /// Every date already committed to a booking for this guide that still
    /// holds its dates (pending, accepted, confirmed, or awaiting payment).
    pub fn blocked_dates(guide_id: Uuid, bookings: &[Booking]) -> HashSet<NaiveDate> {
        bookings
            .iter()
            .filter(|booking| booking.provider == ProviderRef::Guide(guide_id))
            .filter(|booking| booking.status.holds_dates())
            .flat_map(|booking| date_span(booking.check_in, booking.check_out))
            .collect()
    }

    /// Blocked wins over available: a date in both sets is already booked and
    /// must not be offered again.
    pub fn classify(
        date: NaiveDate,
        specific_available: &[NaiveDate],
        blocked: &HashSet<NaiveDate>,
    ) -> DateStatus {
        if blocked.contains(&date) {
            DateStatus::Blocked
        } else if specific_available.contains(&date) {
            DateStatus::Available
        } else {
            DateStatus::Unavailable
        }
    }

    /// Rendering data for a month of the booking calendar.
    pub fn calendar_month(
        year: i32,
        month: u32,
        guide: &Guide,
        blocked: &HashSet<NaiveDate>,
    ) -> Vec<DayAvailability> {
        let mut days = Vec::new();
        let mut day = match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(first) => first,
            None => return days,
        };

        while day.month() == month {
            days.push(DayAvailability {
                date: day,
                status: Self::classify(day, &guide.specific_available_dates, blocked),
                recurring_open: guide.works_on(day.weekday()),
            });
            day = day + Duration::days(1);
        }
        days
    }
}

/// Inclusive range of trip dates: a booking holds its check-in day, its
/// check-out day, and everything between.
pub fn date_span(check_in: NaiveDate, check_out: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut day = check_in;
    while day <= check_out {
        dates.push(day);
        day = day + Duration::days(1);
    }
    dates
}
