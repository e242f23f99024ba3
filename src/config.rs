use std::env;

const DOWN_PAYMENT_RATE: f64 = 0.30;
const COMMISSION_RATE: f64 = 0.02;
const BASE_INCLUDED_GUESTS: u32 = 1;
const FREE_TIER_BOOKING_CAP: u32 = 1;

/// Platform-wide rates and caps shared by the pricing and lifecycle rules.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Fraction of the total price collected online at booking time.
    pub down_payment_rate: f64,
    /// Platform cut, deducted from the provider payout.
    pub commission_rate: f64,
    /// Guests covered by the base price; everyone beyond pays the per-head fee.
    pub base_included_guests: u32,
    /// Accepted bookings a free-tier guide may hold before upgrading.
    pub free_tier_booking_cap: u32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            down_payment_rate: DOWN_PAYMENT_RATE,
            commission_rate: COMMISSION_RATE,
            base_included_guests: BASE_INCLUDED_GUESTS,
            free_tier_booking_cap: FREE_TIER_BOOKING_CAP,
        }
    }
}

impl PlatformConfig {
    pub fn from_env() -> Self {
        Self {
            down_payment_rate: env_var("TOURBOOK_DOWN_PAYMENT_RATE", DOWN_PAYMENT_RATE),
            commission_rate: env_var("TOURBOOK_COMMISSION_RATE", COMMISSION_RATE),
            base_included_guests: env_var("TOURBOOK_BASE_INCLUDED_GUESTS", BASE_INCLUDED_GUESTS),
            free_tier_booking_cap: env_var("TOURBOOK_FREE_TIER_CAP", FREE_TIER_BOOKING_CAP),
        }
    }
}

fn env_var<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}
