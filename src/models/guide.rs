use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel entry in `available_days` meaning every weekday is open.
pub const ALL_DAYS: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideTier {
    Free,
    Paid,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Guide {
    pub id: Uuid,
    pub display_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    pub price_per_day: f64,
    pub solo_price_per_day: f64,
    pub additional_fee_per_head: f64,
    /// Weekday names the guide generally works, or the single entry `"All"`.
    /// Advisory display data; enforcement goes through `specific_available_dates`.
    #[serde(default)]
    pub available_days: Vec<String>,
    /// Calendar dates the guide has explicitly opened for booking.
    #[serde(default)]
    pub specific_available_dates: Vec<NaiveDate>,
    pub guide_tier: GuideTier,
    /// Lifetime count of accepted bookings; gates the free tier.
    #[serde(default)]
    pub booking_count: u32,
}

impl Guide {
    /// Whether the guide's recurring weekly schedule covers this weekday.
    pub fn works_on(&self, weekday: Weekday) -> bool {
        self.available_days
            .iter()
            .any(|day| day == ALL_DAYS || day.eq_ignore_ascii_case(weekday_name(weekday)))
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
