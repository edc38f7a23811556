//! Catalog domain records
//!
//! The entities of the tourism catalog: categories, governorates, tourist
//! places, and the user-facing side records (contact messages, saved places,
//! trip plans). All display text is bilingual; see [`crate::language`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::language::{BilingualText, Language, Localized};
use crate::now_ms;
use crate::slug::slugify;

/// A thematic grouping of places (pharaonic, islamic, coptic, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Database id (0 until stored)
    pub id: i64,
    pub name: BilingualText,
    /// URL slug, generated from the English name when left empty
    pub slug: String,
    pub description: BilingualText,
    /// CSS icon class shown next to the category
    pub icon: String,
    /// Display position on listing pages (ascending)
    pub order: i32,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: 0,
            name: BilingualText::new(name_ar, name_en),
            slug: String::new(),
            description: BilingualText::default(),
            icon: "fa-landmark".to_string(),
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_description(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.description = BilingualText::new(ar, en);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Slug to store: the explicit one, or a generated one
    pub fn effective_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name.en)
        } else {
            self.slug.clone()
        }
    }
}

/// Bilingual fields of a [`Category`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
}

impl Localized for Category {
    type Field = CategoryField;

    fn localized(&self, field: CategoryField, lang: Language) -> &str {
        match field {
            CategoryField::Name => self.name.resolve(lang),
            CategoryField::Description => self.description.resolve(lang),
        }
    }
}

/// An administrative region places belong to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Governorate {
    pub id: i64,
    pub name: BilingualText,
    pub slug: String,
    pub is_active: bool,
}

impl Governorate {
    pub fn new(name_ar: impl Into<String>, name_en: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: BilingualText::new(name_ar, name_en),
            slug: String::new(),
            is_active: true,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn effective_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name.en)
        } else {
            self.slug.clone()
        }
    }
}

/// Bilingual fields of a [`Governorate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GovernorateField {
    Name,
}

impl Localized for Governorate {
    type Field = GovernorateField;

    fn localized(&self, field: GovernorateField, lang: Language) -> &str {
        match field {
            GovernorateField::Name => self.name.resolve(lang),
        }
    }
}

/// Suggested visit duration, restricted to the site's fixed choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(into = "u32", try_from = "u32")]
pub enum Duration {
    OneHour,
    TwoHours,
    #[default]
    ThreeHours,
    FourHours,
    FiveHours,
    HalfDay,
    FullDay,
    DayAndHalf,
    TwoDays,
}

impl Duration {
    /// All allowed durations, ascending
    pub const ALL: [Duration; 9] = [
        Duration::OneHour,
        Duration::TwoHours,
        Duration::ThreeHours,
        Duration::FourHours,
        Duration::FiveHours,
        Duration::HalfDay,
        Duration::FullDay,
        Duration::DayAndHalf,
        Duration::TwoDays,
    ];

    /// Duration in hours
    pub fn hours(self) -> u32 {
        match self {
            Self::OneHour => 1,
            Self::TwoHours => 2,
            Self::ThreeHours => 3,
            Self::FourHours => 4,
            Self::FiveHours => 5,
            Self::HalfDay => 6,
            Self::FullDay => 8,
            Self::DayAndHalf => 12,
            Self::TwoDays => 16,
        }
    }

    /// Parse from an hour count (only the fixed choices are valid)
    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.hours() == hours)
    }

    /// Human-readable label for the given language
    pub fn label(self, lang: Language) -> &'static str {
        match (self, lang) {
            (Self::OneHour, Language::Ar) => "ساعة واحدة",
            (Self::OneHour, Language::En) => "One hour",
            (Self::TwoHours, Language::Ar) => "ساعتان",
            (Self::TwoHours, Language::En) => "Two hours",
            (Self::ThreeHours, Language::Ar) => "3 ساعات",
            (Self::ThreeHours, Language::En) => "3 hours",
            (Self::FourHours, Language::Ar) => "4 ساعات",
            (Self::FourHours, Language::En) => "4 hours",
            (Self::FiveHours, Language::Ar) => "5 ساعات",
            (Self::FiveHours, Language::En) => "5 hours",
            (Self::HalfDay, Language::Ar) => "نصف يوم",
            (Self::HalfDay, Language::En) => "Half a day",
            (Self::FullDay, Language::Ar) => "يوم كامل",
            (Self::FullDay, Language::En) => "Full day",
            (Self::DayAndHalf, Language::Ar) => "يوم ونصف",
            (Self::DayAndHalf, Language::En) => "A day and a half",
            (Self::TwoDays, Language::Ar) => "يومان",
            (Self::TwoDays, Language::En) => "Two days",
        }
    }
}

impl From<Duration> for u32 {
    fn from(d: Duration) -> Self {
        d.hours()
    }
}

impl TryFrom<u32> for Duration {
    type Error = String;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Duration::from_hours(hours).ok_or_else(|| format!("Invalid duration: {} hours", hours))
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

/// A single tourist destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: i64,
    pub name: BilingualText,
    pub slug: String,
    pub category_id: i64,
    pub governorate_id: i64,
    /// City or district within the governorate
    pub city: BilingualText,
    pub short_description: BilingualText,
    pub description: BilingualText,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub suggested_duration: Duration,
    pub visitor_tips: BilingualText,
    pub best_time_to_visit: BilingualText,
    pub entry_fee: BilingualText,
    /// Inclusion ranking, 1 = highest priority, 10 = lowest
    pub priority: u8,
    pub is_featured: bool,
    pub is_active: bool,
    pub view_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Place {
    pub fn new(
        name_ar: impl Into<String>,
        name_en: impl Into<String>,
        category_id: i64,
        governorate_id: i64,
    ) -> Self {
        let now = now_ms();
        Self {
            id: 0,
            name: BilingualText::new(name_ar, name_en),
            slug: String::new(),
            category_id,
            governorate_id,
            city: BilingualText::default(),
            short_description: BilingualText::default(),
            description: BilingualText::default(),
            latitude: None,
            longitude: None,
            suggested_duration: Duration::default(),
            visitor_tips: BilingualText::default(),
            best_time_to_visit: BilingualText::default(),
            entry_fee: BilingualText::default(),
            priority: 5,
            is_featured: false,
            is_active: true,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_city(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.city = BilingualText::new(ar, en);
        self
    }

    pub fn with_short_description(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.short_description = BilingualText::new(ar, en);
        self
    }

    pub fn with_description(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.description = BilingualText::new(ar, en);
        self
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.suggested_duration = duration;
        self
    }

    pub fn with_visitor_tips(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.visitor_tips = BilingualText::new(ar, en);
        self
    }

    pub fn with_best_time(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.best_time_to_visit = BilingualText::new(ar, en);
        self
    }

    pub fn with_entry_fee(mut self, ar: impl Into<String>, en: impl Into<String>) -> Self {
        self.entry_fee = BilingualText::new(ar, en);
        self
    }

    /// Set the inclusion priority, clamped to the valid 1..=10 range
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 10);
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    pub fn effective_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name.en)
        } else {
            self.slug.clone()
        }
    }
}

/// Bilingual fields of a [`Place`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceField {
    Name,
    City,
    ShortDescription,
    Description,
    VisitorTips,
    BestTimeToVisit,
    EntryFee,
}

impl Localized for Place {
    type Field = PlaceField;

    fn localized(&self, field: PlaceField, lang: Language) -> &str {
        match field {
            PlaceField::Name => self.name.resolve(lang),
            PlaceField::City => self.city.resolve(lang),
            PlaceField::ShortDescription => self.short_description.resolve(lang),
            PlaceField::Description => self.description.resolve(lang),
            PlaceField::VisitorTips => self.visitor_tips.resolve(lang),
            PlaceField::BestTimeToVisit => self.best_time_to_visit.resolve(lang),
            PlaceField::EntryFee => self.entry_fee.resolve(lang),
        }
    }
}

/// A message submitted through the contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Place the message is about, when sent from a place page
    pub place_id: Option<i64>,
    pub is_read: bool,
    pub created_at: i64,
}

impl ContactMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            phone: None,
            subject: subject.into(),
            message: message.into(),
            place_id: None,
            is_read: false,
            created_at: now_ms(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn about_place(mut self, place_id: i64) -> Self {
        self.place_id = Some(place_id);
        self
    }
}

/// A place bookmarked by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPlace {
    pub id: i64,
    pub user: String,
    pub place_id: i64,
    pub notes: String,
    pub created_at: i64,
}

/// Workflow state of a trip plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Draft,
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Planned => write!(f, "planned"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "planned" => Ok(Self::Planned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("Unknown trip status: {}", s)),
        }
    }
}

/// A user-authored multi-day trip plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub id: i64,
    pub user: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: Option<f64>,
    pub status: TripStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TripPlan {
    pub fn new(user: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: 0,
            user: user.into(),
            title: title.into(),
            description: String::new(),
            start_date: None,
            end_date: None,
            budget: None,
            status: TripStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Inclusive day span of the trip, 0 when the dates are not set
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (end - start).num_days() + 1,
            _ => 0,
        }
    }
}

/// One place scheduled on one day of a trip plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlanEntry {
    pub id: i64,
    pub plan_id: i64,
    pub place_id: i64,
    pub day_number: u32,
    pub visit_time: Option<NaiveTime>,
    pub notes: String,
    pub is_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_effective_slug() {
        let category = Category::new("السياحة الفرعونية", "Pharaonic Tourism");
        assert_eq!(category.effective_slug(), "pharaonic-tourism");

        let category = category.with_slug("custom-slug");
        assert_eq!(category.effective_slug(), "custom-slug");
    }

    #[test]
    fn test_place_defaults() {
        let place = Place::new("الأهرامات", "Pyramids of Giza", 1, 1);
        assert_eq!(place.priority, 5);
        assert_eq!(place.suggested_duration, Duration::ThreeHours);
        assert!(place.is_active);
        assert!(!place.is_featured);
        assert_eq!(place.view_count, 0);
    }

    #[test]
    fn test_place_priority_clamped() {
        assert_eq!(Place::new("أ", "A", 1, 1).with_priority(0).priority, 1);
        assert_eq!(Place::new("أ", "A", 1, 1).with_priority(99).priority, 10);
        assert_eq!(Place::new("أ", "A", 1, 1).with_priority(7).priority, 7);
    }

    #[test]
    fn test_place_localized_fields() {
        let place = Place::new("الأهرامات", "Pyramids", 1, 1).with_city("الجيزة", "");
        assert_eq!(place.localized(PlaceField::Name, Language::En), "Pyramids");
        assert_eq!(place.localized(PlaceField::Name, Language::Ar), "الأهرامات");
        // Untranslated field falls back to Arabic
        assert_eq!(place.localized(PlaceField::City, Language::En), "الجيزة");
    }

    #[test]
    fn test_duration_hours() {
        assert_eq!(Duration::OneHour.hours(), 1);
        assert_eq!(Duration::HalfDay.hours(), 6);
        assert_eq!(Duration::TwoDays.hours(), 16);
    }

    #[test]
    fn test_duration_from_hours() {
        assert_eq!(Duration::from_hours(8), Some(Duration::FullDay));
        assert_eq!(Duration::from_hours(12), Some(Duration::DayAndHalf));
        // 7 is not one of the allowed choices
        assert_eq!(Duration::from_hours(7), None);
        assert_eq!(Duration::from_hours(0), None);
    }

    #[test]
    fn test_duration_serde_as_hours() {
        let json = serde_json::to_string(&Duration::FullDay).unwrap();
        assert_eq!(json, "8");

        let duration: Duration = serde_json::from_str("16").unwrap();
        assert_eq!(duration, Duration::TwoDays);

        assert!(serde_json::from_str::<Duration>("7").is_err());
    }

    #[test]
    fn test_trip_status_round_trip() {
        assert_eq!("in_progress".parse::<TripStatus>().unwrap(), TripStatus::InProgress);
        assert_eq!(TripStatus::Planned.to_string(), "planned");
        assert!("unknown".parse::<TripStatus>().is_err());
    }

    #[test]
    fn test_trip_plan_duration_days() {
        let plan = TripPlan::new("amira", "My Cairo Trip");
        assert_eq!(plan.duration_days(), 0);

        let plan = plan.with_dates(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
        );
        assert_eq!(plan.duration_days(), 5);
    }
}
