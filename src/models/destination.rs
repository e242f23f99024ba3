use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable reference data; never mutated by the booking lifecycle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub attractions: Vec<String>,
}
