//! Domain DTOs for the lodging API.
//!
//! # Design
//! These types mirror the remote API's wire schema but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. Wire quirks live here as serde attributes:
//! `safety_rating` defaults to 4 when the server omits it, unknown
//! accommodation types collapse into a renderable catch-all, and user
//! records keep fields this layer does not model in a flattened map so they
//! pass through verbatim.

use serde::{Deserialize, Serialize};

/// Category of an accommodation, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hostel,
    Hotel,
    Guesthouse,
    Homestay,
    #[serde(other)]
    Unknown,
}

impl Default for AccommodationType {
    fn default() -> Self {
        AccommodationType::Hostel
    }
}

/// A single accommodation record returned by search and fetch calls, or
/// substituted from the embedded sample set in degraded mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: u64,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub accommodation_type: AccommodationType,
    /// Strictly positive when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_safety_rating")]
    pub safety_rating: u8,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub is_active: bool,
}

fn default_safety_rating() -> u8 {
    4
}

/// A user record as returned by the auth endpoints. Opaque to this layer
/// beyond the identifying fields; everything else rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupProfile {
    pub full_name: String,
    pub age: u32,
    pub email: String,
    pub gender: String,
    pub password: String,
    pub interests: Vec<String>,
}

/// Successful auth response: the token and user record are only ever
/// consumed together.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Search query parameters. `None` fields are omitted from the query string
/// entirely; empty or whitespace-only values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub city: Option<String>,
    pub checkin: Option<String>,
    pub checkout: Option<String>,
}
