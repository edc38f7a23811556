//! Input validation
//!
//! Mirrors what the site's forms enforced: every rule is checked and all
//! failures are reported together, not just the first one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use placestore::ContactMessage;

use crate::planner::{ItineraryRequest, MAX_DAYS, MIN_DAYS};

/// Upper length bound for a contact name
pub const MAX_NAME_LEN: usize = 100;
/// Upper length bound for a contact subject
pub const MAX_SUBJECT_LEN: usize = 200;
/// Upper length bound for a phone number
pub const MAX_PHONE_LEN: usize = 20;

/// All validation failures for one form submission
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize)]
#[error("{}", self.describe())]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// (field, message) pairs in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// First message recorded for the given field, if any
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(f, m)| format!("{}: {}", f, m))
            .collect();
        parts.join("; ")
    }

    fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Raw itinerary planner input, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerForm {
    pub days: u32,
    /// Resolved category ids, in submission order
    pub categories: Vec<i64>,
}

impl PlannerForm {
    pub fn new(days: u32, categories: Vec<i64>) -> Self {
        Self { days, categories }
    }

    /// Check the trip length bounds and category selection.
    ///
    /// Duplicate category ids are collapsed, keeping first occurrence order.
    pub fn validate(&self) -> Result<ItineraryRequest, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.days < MIN_DAYS || self.days > MAX_DAYS {
            errors.add(
                "days",
                format!("Must be between {} and {}", MIN_DAYS, MAX_DAYS),
            );
        }
        if self.categories.is_empty() {
            errors.add("categories", "Select at least one tourism type");
        }

        let mut categories = Vec::new();
        for &id in &self.categories {
            if !categories.contains(&id) {
                categories.push(id);
            }
        }

        errors.into_result(ItineraryRequest {
            days: self.days,
            categories,
        })
    }
}

/// Raw contact form input, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    /// Set when the message concerns a specific place
    pub place_id: Option<i64>,
}

impl ContactForm {
    /// Check all fields and build the message record on success
    pub fn validate(&self) -> Result<ContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add("name", "Required");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.add("name", format!("At most {} characters", MAX_NAME_LEN));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", "Required");
        } else if !looks_like_email(email) {
            errors.add("email", "Not a valid email address");
        }

        if let Some(phone) = self.phone.as_deref().map(str::trim) {
            if phone.chars().count() > MAX_PHONE_LEN {
                errors.add("phone", format!("At most {} characters", MAX_PHONE_LEN));
            }
        }

        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.add("subject", "Required");
        } else if subject.chars().count() > MAX_SUBJECT_LEN {
            errors.add("subject", format!("At most {} characters", MAX_SUBJECT_LEN));
        }

        if self.message.trim().is_empty() {
            errors.add("message", "Required");
        }

        let mut message = ContactMessage::new(name, email, subject, self.message.trim());
        if let Some(phone) = self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            message = message.with_phone(phone);
        }
        if let Some(place_id) = self.place_id {
            message = message.about_place(place_id);
        }

        errors.into_result(message)
    }
}

/// Minimal shape check: something before and after '@', a '.' in the domain
fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !s.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactForm {
        ContactForm {
            name: "Ahmed Hassan".to_string(),
            email: "ahmed@example.com".to_string(),
            phone: None,
            subject: "Opening hours".to_string(),
            message: "When does the museum open on Fridays?".to_string(),
            place_id: None,
        }
    }

    #[test]
    fn test_planner_form_valid() {
        let request = PlannerForm::new(3, vec![1, 2]).validate().unwrap();
        assert_eq!(request.days, 3);
        assert_eq!(request.categories, vec![1, 2]);
    }

    #[test]
    fn test_planner_form_day_bounds() {
        assert!(PlannerForm::new(0, vec![1]).validate().is_err());
        assert!(PlannerForm::new(15, vec![1]).validate().is_err());
        assert!(PlannerForm::new(1, vec![1]).validate().is_ok());
        assert!(PlannerForm::new(14, vec![1]).validate().is_ok());
    }

    #[test]
    fn test_planner_form_requires_categories() {
        let errors = PlannerForm::new(3, vec![]).validate().unwrap_err();
        assert!(errors.field("categories").is_some());
    }

    #[test]
    fn test_planner_form_collects_all_errors() {
        let errors = PlannerForm::new(0, vec![]).validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.field("days").is_some());
        assert!(errors.field("categories").is_some());
    }

    #[test]
    fn test_planner_form_dedupes_categories() {
        let request = PlannerForm::new(2, vec![3, 1, 3, 2, 1]).validate().unwrap();
        assert_eq!(request.categories, vec![3, 1, 2]);
    }

    #[test]
    fn test_contact_form_valid() {
        let message = contact().validate().unwrap();
        assert_eq!(message.name, "Ahmed Hassan");
        assert_eq!(message.email, "ahmed@example.com");
        assert!(message.phone.is_none());
    }

    #[test]
    fn test_contact_form_required_fields() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        for field in ["name", "email", "subject", "message"] {
            assert_eq!(errors.field(field), Some("Required"));
        }
    }

    #[test]
    fn test_contact_form_email_shape() {
        for bad in ["plainaddress", "no-domain@", "@no-local.com", "a@b", "a b@c.com", "a@.com"] {
            let mut form = contact();
            form.email = bad.to_string();
            let errors = form.validate().unwrap_err();
            assert!(errors.field("email").is_some(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_contact_form_length_limits() {
        let mut form = contact();
        form.name = "x".repeat(101);
        form.subject = "y".repeat(201);
        form.phone = Some("0".repeat(21));
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_contact_form_trims_and_attaches_place() {
        let mut form = contact();
        form.name = "  Mona  ".to_string();
        form.phone = Some(" 0100 123 4567 ".to_string());
        form.place_id = Some(7);
        let message = form.validate().unwrap();
        assert_eq!(message.name, "Mona");
        assert_eq!(message.phone.as_deref(), Some("0100 123 4567"));
        assert_eq!(message.place_id, Some(7));
    }

    #[test]
    fn test_validation_errors_display() {
        let mut errors = ValidationErrors::new();
        errors.add("days", "Must be between 1 and 14");
        errors.add("categories", "Select at least one tourism type");
        let text = errors.to_string();
        assert!(text.contains("days: Must be between 1 and 14"));
        assert!(text.contains("; categories:"));
    }
}
