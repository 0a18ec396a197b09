use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OknaError;
use crate::models::PriceTable;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Everything the page can be tuned by: prices, thresholds, delays, copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub prices: PriceTable,
    pub header: HeaderConfig,
    pub calculator: CalculatorConfig,
    pub contact: ContactConfig,
    pub carousel: CarouselConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Scroll offset (px) past which the header switches to its compact style.
    pub scrolled_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Id of the section "place order" scrolls to.
    pub contacts_section: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
    pub message_ttl_ms: u64,
    pub sending_label: String,
    pub success_text: String,
    pub error_text: String,
}

impl ContactConfig {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.message_ttl_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Scroll distance per pixel of pointer travel.
    pub drag_factor: f64,
    pub resume_delay_ms: u64,
}

impl CarouselConfig {
    pub fn resume_delay(&self) -> Duration {
        Duration::from_millis(self.resume_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Local storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
}

impl SiteConfig {
    /// Parse a full config document.
    pub fn from_toml(source: &str) -> Result<Self, OknaError> {
        let config: SiteConfig =
            toml::from_str(source).map_err(|e| OknaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, OknaError> {
        toml::to_string_pretty(self).map_err(|e| OknaError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), OknaError> {
        if !self.carousel.drag_factor.is_finite() || self.carousel.drag_factor <= 0.0 {
            return Err(OknaError::Config(format!(
                "carousel.drag_factor must be positive, got {}",
                self.carousel.drag_factor
            )));
        }
        if !self.header.scrolled_threshold.is_finite() || self.header.scrolled_threshold < 0.0 {
            return Err(OknaError::Config(
                "header.scrolled_threshold must be a non-negative number".into(),
            ));
        }
        if self.calculator.contacts_section.trim().is_empty() {
            return Err(OknaError::Config(
                "calculator.contacts_section must not be empty".into(),
            ));
        }
        if self.theme.storage_key.is_empty() {
            return Err(OknaError::Config("theme.storage_key must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(feature = "fs")]
mod fs {
    use std::path::{Path, PathBuf};

    use directories::ProjectDirs;

    use super::SiteConfig;
    use crate::error::OknaError;

    impl SiteConfig {
        /// Load config: user file if it exists, else the built-in defaults.
        pub fn load() -> Result<Self, OknaError> {
            Self::load_from(&Self::config_path())
        }

        /// Load from `path`, falling back to defaults when it does not exist.
        pub fn load_from(path: &Path) -> Result<Self, OknaError> {
            if path.exists() {
                let source = std::fs::read_to_string(path)?;
                tracing::debug!(path = %path.display(), "Loaded user config");
                Self::from_toml(&source)
            } else {
                Ok(Self::default())
            }
        }

        /// Save to the user config file.
        pub fn save(&self) -> Result<(), OknaError> {
            self.save_to(&Self::config_path())
        }

        pub fn save_to(&self, path: &Path) -> Result<(), OknaError> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, self.to_toml()?)?;
            Ok(())
        }

        /// Path to user config file (XDG on Linux, AppData on Windows).
        pub fn config_path() -> PathBuf {
            ProjectDirs::from("", "", "okna")
                .map(|d| d.config_dir().join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_toml(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SiteConfig::default();
        assert_eq!(config.prices.service.door, 4000);
        assert_eq!(config.prices.extras.slopes, 1500);
        assert_eq!(config.header.scrolled_threshold, 50.0);
        assert_eq!(config.calculator.contacts_section, "contacts");
        assert_eq!(config.contact.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.contact.message_ttl(), Duration::from_millis(5000));
        assert_eq!(config.carousel.resume_delay(), Duration::from_millis(3000));
        assert_eq!(config.carousel.drag_factor, 2.0);
        assert_eq!(config.theme.storage_key, "theme");
    }

    #[test]
    fn test_roundtrip() {
        let config = SiteConfig::default();
        let serialized = config.to_toml().unwrap();
        let deserialized = SiteConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_missing_price_rejected() {
        let source = DEFAULT_CONFIG.replace("balcony = 8000\n", "");
        let err = SiteConfig::from_toml(&source).unwrap_err();
        assert!(matches!(err, OknaError::Config(_)));
    }

    #[test]
    fn test_invalid_drag_factor_rejected() {
        let source = DEFAULT_CONFIG.replace("drag_factor = 2.0", "drag_factor = 0.0");
        assert!(SiteConfig::from_toml(&source).is_err());
    }

    #[test]
    fn test_invalid_scrolled_threshold_rejected() {
        for bad in ["nan", "inf", "-1.0"] {
            let source = DEFAULT_CONFIG.replace(
                "scrolled_threshold = 50.0",
                &format!("scrolled_threshold = {bad}"),
            );
            assert!(SiteConfig::from_toml(&source).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_huge_prices_do_not_panic() {
        let source = DEFAULT_CONFIG
            .replace("window = 3000", &format!("window = {}", i64::MAX))
            .replace("large = 2000", &format!("large = {}", i64::MAX))
            .replace("sill = 800", &format!("sill = {}", i64::MAX));
        let config = SiteConfig::from_toml(&source).unwrap();

        let selection = crate::models::SelectionState {
            size: Some(crate::models::SizeKind::Large),
            extras: [crate::models::Extra::Sill].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(config.prices.total(&selection), u64::MAX);
    }

    #[cfg(feature = "fs")]
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        // Missing file falls back to defaults.
        assert_eq!(SiteConfig::load_from(&path).unwrap(), SiteConfig::default());

        let mut config = SiteConfig::default();
        config.prices.service.window = 3500;
        config.save_to(&path).unwrap();

        let loaded = SiteConfig::load_from(&path).unwrap();
        assert_eq!(loaded.prices.service.window, 3500);
    }
}
