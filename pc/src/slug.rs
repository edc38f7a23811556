//! URL slug generation
//!
//! Slugs are derived from the English name of an entity: lowercase,
//! apostrophes stripped, every other non-alphanumeric run collapsed to a
//! single hyphen.

/// Slugify a display name
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c)
            } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
                None // strip apostrophes (straight and curly)
            } else {
                Some('-')
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Pyramids of Giza"), "pyramids-of-giza");
        assert_eq!(slugify("Test Category New"), "test-category-new");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Saint Catherine's Monastery"), "saint-catherines-monastery");
        assert_eq!(slugify("Khan el-Khalili!"), "khan-el-khalili");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  Abu Simbel  "), "abu-simbel");
        assert_eq!(slugify("--edge--"), "edge");
    }
}
