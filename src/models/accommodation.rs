use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Amenities {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub ac: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub pool: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transportation {
    pub vehicle_type: String,
    pub capacity: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Accommodation {
    pub id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub location: String,
    /// Nightly rate.
    pub price: f64,
    pub accommodation_type: String,
    #[serde(default, deserialize_with = "amenities_from_value")]
    pub amenities: Amenities,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transportation: Option<Transportation>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Accommodation {
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Deserialization boundary for amenity flags. Listings written by older
/// clients carry the flags as a JSON-encoded string rather than an object;
/// anything unreadable degrades to no amenities instead of failing the record.
pub fn parse_amenities(value: &Value) -> Amenities {
    let parsed = match value {
        Value::Null => return Amenities::default(),
        Value::String(raw) => serde_json::from_str(raw),
        other => serde_json::from_value(other.clone()),
    };

    match parsed {
        Ok(amenities) => amenities,
        Err(err) => {
            log::warn!("Discarding unreadable amenities payload: {}", err);
            Amenities::default()
        }
    }
}

fn amenities_from_value<'de, D>(deserializer: D) -> Result<Amenities, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_amenities(&value))
}
