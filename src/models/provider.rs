use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Guide,
    Agency,
    AccommodationHost,
}

/// The counterparty fulfilling a booking.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Provider {
    pub id: Uuid,
    pub kind: ProviderKind,
    pub display_name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

/// Tags which provider relation a booking points at. Exactly one is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ProviderRef {
    Guide(Uuid),
    Agency(Uuid),
    AccommodationHost(Uuid),
}

impl ProviderRef {
    pub fn id(&self) -> Uuid {
        match self {
            ProviderRef::Guide(id) | ProviderRef::Agency(id) | ProviderRef::AccommodationHost(id) => {
                *id
            }
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderRef::Guide(_) => ProviderKind::Guide,
            ProviderRef::Agency(_) => ProviderKind::Agency,
            ProviderRef::AccommodationHost(_) => ProviderKind::AccommodationHost,
        }
    }
}
