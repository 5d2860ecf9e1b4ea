//! Configuration Module
//!
//! This module defines all configuration structures for the card loader.
//! Configuration is loaded from TOML files and parsed using serde. Every
//! field has a default, so a partial (or empty) file is valid.

use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Main configuration structure
///
/// Contains all configuration sections for the page.
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [api]
/// movie_base_url = "http://localhost:8000/movie/"
/// eval_base_url = "http://localhost:8000/evaluate/"
/// csrf_token = "..."
///
/// [loaders.vertical]
/// initial_batch_size = 10
/// batch_size = 5
/// cooldown_ms = 150
///
/// [page]
/// main_container = "#container-main"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub loaders: LoaderProfiles,
    pub page: PageConfig,
}

/// Backend endpoints and credentials
///
/// # Fields
/// - `movie_base_url`: Base URL for movie data (`<base><id>/` and `<base><id>/lite/`)
/// - `eval_base_url`: Base URL for rating submission (`<base><id>/`)
/// - `csrf_token`: Token sent as `X-CSRFToken` on mutating requests
/// - `timeout_ms`: Per-request timeout of the HTTP client
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub movie_base_url: String,
    pub eval_base_url: String,
    pub csrf_token: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            movie_base_url: "http://127.0.0.1:8000/movie/".to_string(),
            eval_base_url: "http://127.0.0.1:8000/evaluate/".to_string(),
            csrf_token: String::new(),
            timeout_ms: 10_000,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Batch sizes and cooldown for one loader
///
/// # Fields
/// - `initial_batch_size`: Units drained by `initialize`
/// - `batch_size`: Units drained per accepted trigger
/// - `cooldown_ms`: Window after a drain during which triggers are ignored
/// - `scroll_offset_px`: Distance from the document bottom that counts as "reached"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LoaderConfig {
    pub initial_batch_size: usize,
    pub batch_size: usize,
    pub cooldown_ms: u64,
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset_px: u32,
}

fn default_scroll_offset() -> u32 {
    400
}

impl LoaderConfig {
    pub const fn new(initial_batch_size: usize, batch_size: usize, cooldown_ms: u64) -> Self {
        Self {
            initial_batch_size,
            batch_size,
            cooldown_ms,
            scroll_offset_px: 400,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// One loader profile per page section
///
/// Defaults mirror the page the loader was written for:
/// - `vertical`: evaluation list, scroll-triggered
/// - `rated`: rating record list, scroll-triggered
/// - `horizontal`: carousel filled through the right arrow
/// - `containers`: carousels on the home page, scroll-triggered
/// - `similar`: similar movies inside a detail modal, no trigger
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderProfiles {
    pub vertical: LoaderConfig,
    pub rated: LoaderConfig,
    pub horizontal: LoaderConfig,
    pub containers: LoaderConfig,
    pub similar: LoaderConfig,
}

impl LoaderProfiles {
    /// Longest cooldown of any profile
    pub fn longest_cooldown(&self) -> Duration {
        [
            self.vertical,
            self.rated,
            self.horizontal,
            self.containers,
            self.similar,
        ]
        .iter()
        .map(LoaderConfig::cooldown)
        .max()
        .unwrap_or_default()
    }
}

impl Default for LoaderProfiles {
    fn default() -> Self {
        Self {
            vertical: LoaderConfig::new(10, 5, 150),
            rated: LoaderConfig::new(10, 5, 150),
            horizontal: LoaderConfig {
                scroll_offset_px: 300,
                ..LoaderConfig::new(8, 4, 450)
            },
            containers: LoaderConfig::new(3, 1, 150),
            similar: LoaderConfig::new(12, 0, 150),
        }
    }
}

/// Selectors and page-level constants
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub main_container: String,
    pub modal_container: String,
    pub rating_count_selector: String,
    pub ready_note_selector: String,
    /// Rating count that reveals the ready note
    pub unlock_threshold: u32,
    /// Characters of the overview shown before "read more"
    pub overview_preview_chars: usize,
    /// Whether cards are rendered with a pending image marker
    pub lazy_images: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            main_container: "#container-main".to_string(),
            modal_container: "#container-modal".to_string(),
            rating_count_selector: "#rating-count".to_string(),
            ready_note_selector: "#ready-note".to_string(),
            unlock_threshold: 10,
            overview_preview_chars: 250,
            lazy_images: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_page_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.loaders.vertical, LoaderConfig::new(10, 5, 150));
        assert_eq!(config.loaders.horizontal.batch_size, 4);
        assert_eq!(config.loaders.horizontal.cooldown_ms, 450);
        assert_eq!(config.loaders.similar.batch_size, 0);
        assert_eq!(config.page.unlock_threshold, 10);
        assert_eq!(config.page.main_container, "#container-main");
    }

    #[test]
    fn test_partial_profile_override() {
        let toml = r#"
            [api]
            csrf_token = "abc"

            [loaders.vertical]
            initial_batch_size = 20
            batch_size = 10
            cooldown_ms = 300
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.api.csrf_token, "abc");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.loaders.vertical.initial_batch_size, 20);
        assert_eq!(config.loaders.vertical.scroll_offset_px, 400);
        assert_eq!(config.loaders.vertical.cooldown(), Duration::from_millis(300));
        assert_eq!(config.loaders.rated, LoaderConfig::new(10, 5, 150));
    }

    #[test]
    fn test_longest_cooldown() {
        let config = Config::default();
        assert_eq!(config.loaders.longest_cooldown(), Duration::from_millis(450));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::parse("[loaders.vertical]\nbatch_size = \"five\"").is_err());
    }
}
