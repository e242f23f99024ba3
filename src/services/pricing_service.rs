use serde::{Deserialize, Serialize};

use crate::config::PlatformConfig;
use crate::models::accommodation::Accommodation;
use crate::models::guide::Guide;
use crate::models::tour_package::{TimelineRef, TourPackage};

/// The rates a quote is computed from: a package's own rates, or the guide's
/// profile rates when no package is selected.
#[derive(Debug, Clone, Copy)]
pub struct RateCard {
    pub price_per_day: f64,
    pub solo_price_per_day: f64,
    pub additional_fee_per_head: f64,
}

impl RateCard {
    pub fn from_package(package: &TourPackage) -> Self {
        Self {
            price_per_day: package.price_per_day,
            solo_price_per_day: package.solo_price_per_day,
            additional_fee_per_head: package.additional_fee_per_head,
        }
    }

    pub fn from_guide(guide: &Guide) -> Self {
        Self {
            price_per_day: guide.price_per_day,
            solo_price_per_day: guide.solo_price_per_day,
            additional_fee_per_head: guide.additional_fee_per_head,
        }
    }
}

/// Tourist-facing price breakdown. `balance_due` is always derived from the
/// other two figures, never stored independently.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub extra_guest_fee: f64,
    pub accommodation_inclusion: f64,
    pub total_price: f64,
    pub down_payment: f64,
    pub balance_due: f64,
}

/// Provider-facing payout figures. Commission comes out of the payout; it is
/// never added to what the tourist pays.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PayoutBreakdown {
    pub commission: f64,
    pub net_payout: f64,
}

pub struct PricingService {
    config: PlatformConfig,
}

impl PricingService {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config }
    }

    /// Compute the full breakdown for a party size. Pure in its inputs: the
    /// quote is recomputed from scratch on every guest-count change, never
    /// adjusted incrementally.
    ///
    /// The base price covers exactly one person; every guest beyond the first
    /// is billed the per-head fee, even against the group base rate. An
    /// included accommodation is added once, regardless of trip length.
    pub fn quote(
        &self,
        rates: RateCard,
        num_guests: u32,
        accommodation_price: Option<f64>,
    ) -> PriceBreakdown {
        let base_price = if num_guests == 1 {
            rates.solo_price_per_day
        } else {
            rates.price_per_day
        };

        let billable_guests = num_guests.saturating_sub(self.config.base_included_guests);
        let extra_guest_fee = rates.additional_fee_per_head * f64::from(billable_guests);
        let accommodation_inclusion = accommodation_price.unwrap_or(0.0);

        let total_price = base_price + extra_guest_fee + accommodation_inclusion;
        let down_payment = (total_price * self.config.down_payment_rate).round();
        let balance_due = total_price - down_payment;

        PriceBreakdown {
            base_price,
            extra_guest_fee,
            accommodation_inclusion,
            total_price,
            down_payment,
            balance_due,
        }
    }

    /// What the provider sees for a quote: platform commission and the net
    /// remitted from the online down payment.
    pub fn payout(&self, breakdown: &PriceBreakdown) -> PayoutBreakdown {
        let commission = round_cents(breakdown.total_price * self.config.commission_rate);
        PayoutBreakdown {
            commission,
            net_payout: breakdown.down_payment - commission,
        }
    }

    /// The accommodation a package flow attaches automatically: the first one
    /// its itinerary references, if it resolves.
    pub fn included_accommodation<'a>(
        package: &TourPackage,
        accommodations: &'a [Accommodation],
    ) -> Option<&'a Accommodation> {
        package.itinerary.iter().find_map(|entry| match entry.reference {
            TimelineRef::Accommodation { id } => {
                accommodations.iter().find(|accommodation| accommodation.id == id)
            }
            TimelineRef::Stop { .. } => None,
        })
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
