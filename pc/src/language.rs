//! Language selection and field localization
//!
//! The catalog stores every display field twice, once per language. The
//! original site resolved bilingual fields by runtime attribute lookup; here
//! the mapping is a compile-time match: each entity exposes a field enum and
//! implements [`Localized`] over it.

use serde::{Deserialize, Serialize};

/// Supported display languages. Arabic is the site default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ar => write!(f, "ar"),
            Self::En => write!(f, "en"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ar" => Ok(Self::Ar),
            "en" => Ok(Self::En),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// An Arabic/English text pair.
///
/// The English half is optional content-wise: resolving [`Language::En`]
/// falls back to the Arabic text when the English text is empty, matching
/// how the site behaves for partially translated entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BilingualText {
    pub ar: String,
    pub en: String,
}

impl BilingualText {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: en.into(),
        }
    }

    /// Arabic-only text (no translation yet)
    pub fn arabic(ar: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            en: String::new(),
        }
    }

    /// Resolve the text for a language, falling back to Arabic
    pub fn resolve(&self, lang: Language) -> &str {
        match lang {
            Language::En if !self.en.is_empty() => &self.en,
            _ => &self.ar,
        }
    }

    /// True when both halves are empty
    pub fn is_empty(&self) -> bool {
        self.ar.is_empty() && self.en.is_empty()
    }
}

/// Localized field access for catalog entities.
///
/// `Field` is a per-entity enum naming the bilingual fields, so a rendering
/// layer can ask for `place.localized(PlaceField::Name, lang)` without knowing
/// the entity's layout.
pub trait Localized {
    type Field: Copy;

    /// Resolve a bilingual field for the given language
    fn localized(&self, field: Self::Field, lang: Language) -> &str;
}
