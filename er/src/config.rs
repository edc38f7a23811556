//! Configuration for egyroute

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use placestore::Language;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the catalog database
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Display language for listings and rendered pages
    #[serde(default)]
    pub language: Language,

    /// Places per page in listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Featured places shown on the home view
    #[serde(default = "default_featured_limit")]
    pub featured_limit: usize,

    /// Related places shown under a place page
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("egyroute")
        .join("catalog.db")
}

fn default_page_size() -> usize {
    12
}

fn default_featured_limit() -> usize {
    6
}

fn default_related_limit() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            language: Language::default(),
            page_size: default_page_size(),
            featured_limit: default_featured_limit(),
            related_limit: default_related_limit(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            return Ok(config);
        }

        // Try default locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("egyroute").join("config.yml")),
            Some(PathBuf::from("egyroute.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.language, Language::Ar);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.featured_limit, 6);
        assert_eq!(config.related_limit, 4);
        assert!(config.db_path.ends_with("egyroute/catalog.db"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "language: en\npage_size: 24\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.language, Language::En);
        assert_eq!(config.page_size, 24);
        assert_eq!(config.featured_limit, 6);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let mut config = Config::default();
        config.language = Language::En;
        config.db_path = PathBuf::from("/tmp/catalog.db");
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.language, Language::En);
        assert_eq!(loaded.db_path, PathBuf::from("/tmp/catalog.db"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let path = PathBuf::from("/nonexistent/egyroute.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
