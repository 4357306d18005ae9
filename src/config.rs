// Site configuration.
// Collects the tunable constants of the page units and the stats lookup.

use std::time::Duration;

/// Default base URL of the repository metadata service.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default time-to-live for cached repository stats: 1 hour.
pub const DEFAULT_STATS_TTL: Duration = Duration::from_secs(60 * 60);

/// Tunables for every page unit and the stats fetcher.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Scroll offset past which the scroll-to-top button shows.
    pub scroll_threshold: u32,
    /// Scroll offset past which the navbar is marked as scrolled.
    pub sticky_nav_offset: u32,
    /// Duration of one counter animation in milliseconds.
    pub counter_duration_ms: f64,
    /// Minimum visible ratio before a counter starts animating.
    pub counter_threshold: f64,
    /// Image classes that open the lightbox.
    pub lightbox_classes: Vec<String>,
    /// Minimum number of headings before a table of contents is built.
    pub toc_min_headings: usize,
    /// Maximum age of a cached stats entry.
    pub stats_ttl: Duration,
    /// Base URL of the metadata service.
    pub api_base: String,
    /// Optional token for authenticated requests.
    pub github_token: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 300,
            sticky_nav_offset: 100,
            counter_duration_ms: 2000.0,
            counter_threshold: 0.5,
            lightbox_classes: vec!["hero-image".to_string(), "card-image".to_string()],
            toc_min_headings: 2,
            stats_ttl: DEFAULT_STATS_TTL,
            api_base: DEFAULT_API_BASE.to_string(),
            github_token: None,
        }
    }
}

impl SiteConfig {
    /// Build a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from defaults overlaid with values from `lookup`.
    ///
    /// Recognized keys: `SITEKIT_API_BASE`, `SITEKIT_STATS_TTL_SECS`, `GITHUB_TOKEN`.
    /// Unparseable or empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup("SITEKIT_API_BASE").filter(|v| !v.is_empty()) {
            config.api_base = base.trim_end_matches('/').to_string();
        }

        if let Some(secs) = lookup("SITEKIT_STATS_TTL_SECS").and_then(|v| v.parse::<u64>().ok()) {
            config.stats_ttl = Duration::from_secs(secs);
        }

        config.github_token = lookup("GITHUB_TOKEN").filter(|v| !v.is_empty());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_page_constants() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll_threshold, 300);
        assert_eq!(config.sticky_nav_offset, 100);
        assert_eq!(config.counter_duration_ms, 2000.0);
        assert_eq!(config.stats_ttl.as_millis(), 3_600_000);
        assert_eq!(config.api_base, "https://api.github.com");
        assert!(config.github_token.is_none());
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SITEKIT_API_BASE", "http://localhost:1234/"),
            ("SITEKIT_STATS_TTL_SECS", "60"),
            ("GITHUB_TOKEN", "abc"),
        ]);
        let config = SiteConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://localhost:1234");
        assert_eq!(config.stats_ttl, Duration::from_secs(60));
        assert_eq!(config.github_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_bad_values_ignored() {
        let config = SiteConfig::from_lookup(|k| match k {
            "SITEKIT_STATS_TTL_SECS" => Some("soon".to_string()),
            "GITHUB_TOKEN" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.stats_ttl, DEFAULT_STATS_TTL);
        assert!(config.github_token.is_none());
    }
}
