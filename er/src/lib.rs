//! EgyRoute - bilingual Egypt tourism catalog and trip planner
//!
//! The catalog content (places, categories, governorates) lives in
//! [`placestore`]; this crate adds everything around it:
//!
//! - [`planner`] - the itinerary generator (greedy day-by-day partition)
//! - [`forms`] - input validation for the planner and contact forms
//! - [`render`] - handlebars rendering of itineraries and place pages
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//! - [`seed`] - sample content loader

pub mod cli;
pub mod config;
pub mod forms;
pub mod planner;
pub mod render;
pub mod seed;

pub use config::Config;
pub use forms::{ContactForm, PlannerForm, ValidationErrors};
pub use planner::{Itinerary, ItineraryDay, ItineraryRequest, PlaceCatalog, generate};
pub use render::Renderer;
