//! PlaceStore - bilingual tourist place catalog
//!
//! Stores the content of a bilingual (Arabic/English) tourism site in SQLite:
//! tourist places grouped into categories and governorates, plus the
//! user-facing side tables (contact messages, saved places, trip plans).
//!
//! # Example
//!
//! ```ignore
//! use placestore::{PlaceStore, PlaceQuery};
//!
//! let store = PlaceStore::open("egyroute.db")?;
//! let pyramids = store.place_by_slug("pyramids-of-giza")?;
//! let historical = store.places(&PlaceQuery::default().category("pharaonic-tourism"))?;
//! ```

pub mod error;
pub mod language;
pub mod models;
mod schema;
mod slug;
mod store;

pub use error::StoreError;
pub use language::{BilingualText, Language, Localized};
pub use models::{
    Category, CategoryField, ContactMessage, Duration, Governorate, GovernorateField, Place, PlaceField, SavedPlace,
    TripPlan, TripPlanEntry, TripStatus,
};
pub use slug::slugify;
pub use store::{CatalogStats, GovernorateSummary, PlaceQuery, PlaceStore, SaveOutcome, SortKey};

/// Current timestamp in Unix milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
