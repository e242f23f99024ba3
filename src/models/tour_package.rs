use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stop {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// What a timeline entry points at, resolved by id for both kinds.
///
/// Packages published before stops had ids identify them only by
/// `activity_name`; readers fall back to a name match when `id` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineRef {
    Stop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Uuid>,
    },
    Accommodation { id: Uuid },
}

/// One scheduled activity in a package itinerary. Times are free-form display
/// strings, not parsed clock values, and entries render in sequence order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TimelineEntry {
    pub start_time: String,
    pub end_time: String,
    pub activity_name: String,
    #[serde(flatten)]
    pub reference: TimelineRef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TourPackage {
    pub id: Uuid,
    pub guide_id: Uuid,
    pub destination_id: Uuid,
    pub name: String,
    pub description: String,
    pub duration_label: String,
    pub max_group_size: u32,
    /// Group base rate, used for parties of two or more.
    pub price_per_day: f64,
    pub solo_price_per_day: f64,
    pub additional_fee_per_head: f64,
    #[serde(default)]
    pub what_to_bring: Vec<String>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default, deserialize_with = "timeline_from_value")]
    pub itinerary: Vec<TimelineEntry>,
}

/// Deserialization boundary for itinerary timelines. The backend persists the
/// timeline as an opaque ordered-array value and some records carry it as a
/// JSON-encoded string; parse failure means "no timeline", never an error.
pub fn parse_timeline(value: &Value) -> Vec<TimelineEntry> {
    let parsed = match value {
        Value::Null => return Vec::new(),
        Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    };

    match parsed {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Discarding unreadable itinerary timeline: {}", err);
            Vec::new()
        }
    }
}

fn timeline_from_value<'de, D>(deserializer: D) -> Result<Vec<TimelineEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_timeline(&value))
}
