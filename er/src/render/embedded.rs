//! Embedded templates
//!
//! Compiled into the binary from .hbs files; an on-disk template directory
//! can override any of them at runtime.

/// Day-by-day itinerary output
pub const ITINERARY: &str = include_str!("../../templates/itinerary.hbs");

/// Single place page
pub const PLACE: &str = include_str!("../../templates/place.hbs");

/// Place listing
pub const PLACES: &str = include_str!("../../templates/places.hbs");

/// Get the embedded template by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "itinerary" => Some(ITINERARY),
        "place" => Some(PLACE),
        "places" => Some(PLACES),
        _ => None,
    }
}
