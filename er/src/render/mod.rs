//! Output rendering
//!
//! Handlebars templates over pre-localized data. Every string the templates
//! see is already resolved to one language here; templates never branch on
//! the language themselves.

mod embedded;

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use log::debug;
use serde_json::{Value, json};

use placestore::{
    Category, CategoryField, Governorate, GovernorateField, Language, Localized, Place, PlaceField,
};

use crate::planner::Itinerary;

/// Renders catalog data through handlebars templates
pub struct Renderer {
    hbs: Handlebars<'static>,
    /// Optional directory of `{name}.hbs` overrides
    template_dir: Option<PathBuf>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        // Plain-text output, never HTML
        hbs.register_escape_fn(handlebars::no_escape);
        Self {
            hbs,
            template_dir: None,
        }
    }

    /// Prefer `{name}.hbs` files from `dir` over the embedded templates
    pub fn with_template_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.template_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref dir) = self.template_dir {
            let path = dir.join(format!("{}.hbs", name));
            if path.exists() {
                debug!("Loading template override from {}", path.display());
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read template {}: {}", path.display(), e));
            }
        }

        embedded::get_embedded(name)
            .map(|t| t.to_string())
            .ok_or_else(|| eyre!("Template not found: {}", name))
    }

    /// Render a named template with the given data
    pub fn render(&self, name: &str, data: &Value) -> Result<String> {
        let template = self.load_template(name)?;
        self.hbs
            .render_template(&template, data)
            .map_err(|e| eyre!("Failed to render template {}: {}", name, e))
    }
}

fn separator(title: &str) -> String {
    "=".repeat(title.chars().count().max(8))
}

fn day_title(day_number: u32, lang: Language) -> String {
    match lang {
        Language::Ar => format!("اليوم {}", day_number),
        Language::En => format!("Day {}", day_number),
    }
}

fn hours_label(hours: u32, lang: Language) -> String {
    match lang {
        Language::Ar => format!("{} ساعات", hours),
        Language::En => format!("{} hours", hours),
    }
}

/// Template data for the itinerary view
pub fn itinerary_data(itinerary: &Itinerary, lang: Language) -> Value {
    let title = match lang {
        Language::Ar => format!("برنامج سياحي لمدة {} أيام", itinerary.days),
        Language::En => format!("A {}-day tour program", itinerary.days),
    };
    let empty_message = match lang {
        Language::Ar => "لا توجد أماكن مطابقة لاختيارك",
        Language::En => "No places match your selection",
    };
    let total_hours: u32 = itinerary.schedule.iter().map(|d| d.total_duration).sum();
    let footer = match lang {
        Language::Ar => format!(
            "{} مكانًا في {} أيام، {}",
            itinerary.total_places(),
            itinerary.schedule.len(),
            hours_label(total_hours, lang)
        ),
        Language::En => format!(
            "{} places over {} days, {}",
            itinerary.total_places(),
            itinerary.schedule.len(),
            hours_label(total_hours, lang)
        ),
    };

    let days: Vec<Value> = itinerary
        .schedule
        .iter()
        .map(|day| {
            let places: Vec<Value> = day
                .places
                .iter()
                .enumerate()
                .map(|(i, place)| {
                    json!({
                        "order": i + 1,
                        "name": place.localized(PlaceField::Name, lang),
                        "city": place.localized(PlaceField::City, lang),
                        "short_description": place.localized(PlaceField::ShortDescription, lang),
                        "duration_label": place.suggested_duration.label(lang),
                    })
                })
                .collect();
            json!({
                "title": day_title(day.day_number, lang),
                "total_duration_label": hours_label(day.total_duration, lang),
                "places": places,
            })
        })
        .collect();

    json!({
        "title": &title,
        "separator": separator(&title),
        "empty": itinerary.is_empty(),
        "empty_message": empty_message,
        "days": days,
        "footer": footer,
    })
}

/// Template data for a single place page
pub fn place_data(
    place: &Place,
    category: &Category,
    governorate: &Governorate,
    related: &[Place],
    lang: Language,
) -> Value {
    let name = place.localized(PlaceField::Name, lang);
    let headings = match lang {
        Language::Ar => (
            "المدة المقترحة",
            "أفضل وقت للزيارة",
            "رسوم الدخول",
            "نصائح للزوار",
            "الموقع",
            "أماكن مشابهة",
        ),
        Language::En => (
            "Suggested duration",
            "Best time to visit",
            "Entry fee",
            "Visitor tips",
            "Location",
            "Related places",
        ),
    };

    let coordinates = match (place.latitude, place.longitude) {
        (Some(lat), Some(lon)) => Some(format!("{:.4}, {:.4}", lat, lon)),
        _ => None,
    };

    let related: Vec<Value> = related
        .iter()
        .map(|p| {
            json!({
                "name": p.localized(PlaceField::Name, lang),
                "slug": p.slug,
            })
        })
        .collect();

    json!({
        "name": name,
        "separator": separator(name),
        "category": category.localized(CategoryField::Name, lang),
        "governorate": governorate.localized(GovernorateField::Name, lang),
        "city": place.localized(PlaceField::City, lang),
        "description": place.localized(PlaceField::Description, lang),
        "duration_heading": headings.0,
        "duration_label": place.suggested_duration.label(lang),
        "best_time_heading": headings.1,
        "best_time": place.localized(PlaceField::BestTimeToVisit, lang),
        "entry_fee_heading": headings.2,
        "entry_fee": place.localized(PlaceField::EntryFee, lang),
        "tips_heading": headings.3,
        "visitor_tips": place.localized(PlaceField::VisitorTips, lang),
        "location_heading": headings.4,
        "coordinates": coordinates,
        "related_heading": headings.5,
        "related": related,
    })
}

/// Template data for a place listing.
///
/// `places` pairs each place with its governorate's display name, already
/// resolved by the caller.
pub fn place_list_data(title: &str, places: &[(Place, String)], lang: Language) -> Value {
    let empty_message = match lang {
        Language::Ar => "لا توجد أماكن",
        Language::En => "No places found",
    };
    let count_label = match lang {
        Language::Ar => format!("{} مكانًا", places.len()),
        Language::En => format!("{} places", places.len()),
    };

    let rows: Vec<Value> = places
        .iter()
        .map(|(place, governorate)| {
            json!({
                "name": place.localized(PlaceField::Name, lang),
                "slug": place.slug,
                "governorate": governorate,
                "duration_label": place.suggested_duration.label(lang),
                "featured": place.is_featured,
            })
        })
        .collect();

    json!({
        "title": title,
        "separator": separator(title),
        "empty": places.is_empty(),
        "empty_message": empty_message,
        "places": rows,
        "count_label": count_label,
    })
}
