//! Embedded sample records substituted when the live API is unreachable.
//!
//! # Design
//! The sample set is fixed at build time and immutable for the process
//! lifetime. Degraded-mode helpers never fail on the search path (an empty
//! result is a valid answer); the caller is responsible for telling the
//! user the data is not live.

use once_cell::sync::Lazy;

use crate::error::ApiError;
use crate::types::{Accommodation, AccommodationType};

static SAMPLE_ACCOMMODATIONS: Lazy<Vec<Accommodation>> = Lazy::new(|| {
    vec![
        Accommodation {
            id: 1,
            name: "Cozy Central Hostel".to_string(),
            city: "Bangalore".to_string(),
            accommodation_type: AccommodationType::Hostel,
            price_per_night: Some(2500),
            description: "Perfect for solo female travelers with excellent safety measures \
                          and a vibrant community atmosphere."
                .to_string(),
            amenities: vec![
                "WiFi".to_string(),
                "AC".to_string(),
                "Breakfast".to_string(),
                "24/7 Security".to_string(),
            ],
            safety_rating: 5,
            verified: true,
            is_active: true,
        },
        Accommodation {
            id: 2,
            name: "Backpacker's Paradise".to_string(),
            city: "Pune".to_string(),
            accommodation_type: AccommodationType::Hostel,
            price_per_night: Some(1800),
            description: "Budget-friendly hostel with a great kitchen and social atmosphere \
                          for meeting fellow travelers."
                .to_string(),
            amenities: vec![
                "WiFi".to_string(),
                "Kitchen".to_string(),
                "Common Room".to_string(),
                "Lockers".to_string(),
            ],
            safety_rating: 4,
            verified: true,
            is_active: true,
        },
        Accommodation {
            id: 3,
            name: "Urban Nomad Hub".to_string(),
            city: "Mumbai".to_string(),
            accommodation_type: AccommodationType::Hotel,
            price_per_night: Some(3200),
            description: "Premium accommodation perfect for digital nomads and business \
                          travelers seeking comfort and connectivity."
                .to_string(),
            amenities: vec![
                "High-Speed WiFi".to_string(),
                "Workspace".to_string(),
                "Gym".to_string(),
                "Restaurant".to_string(),
            ],
            safety_rating: 5,
            verified: true,
            is_active: true,
        },
    ]
});

/// The embedded sample set, in its fixed order.
pub fn sample_accommodations() -> &'static [Accommodation] {
    SAMPLE_ACCOMMODATIONS.as_slice()
}

/// Filter the sample set by destination: case-insensitive substring match
/// against city or name. An absent, empty, or whitespace-only destination
/// yields the full set. Never fails.
pub fn degraded_search(destination: Option<&str>) -> Vec<Accommodation> {
    let needle = destination.map(str::trim).filter(|d| !d.is_empty());
    match needle {
        None => sample_accommodations().to_vec(),
        Some(needle) => {
            let needle = needle.to_lowercase();
            sample_accommodations()
                .iter()
                .filter(|acc| {
                    acc.city.to_lowercase().contains(&needle)
                        || acc.name.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        }
    }
}

/// Look up a record by id, preferring the last-known live results over the
/// sample set. Fails with `NotFoundLocal` when both miss.
pub fn degraded_lookup(id: u64, last_results: &[Accommodation]) -> Result<Accommodation, ApiError> {
    last_results
        .iter()
        .chain(sample_accommodations())
        .find(|acc| acc.id == id)
        .cloned()
        .ok_or(ApiError::NotFoundLocal)
}
