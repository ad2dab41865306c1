//! Site metadata sourced from the environment.
//!
//! Read once at startup (with `.env` support) and passed explicitly to the
//! exporters. Nothing here affects the normalized numbers.

use serde::Serialize;

pub const DEFAULT_SITE_NAME: &str = "Protein Visualizer";
pub const DEFAULT_SITE_URL: &str = "https://example.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub site_name: String,
    /// Canonical base URL without a trailing slash.
    pub site_url: String,
}

impl SiteConfig {
    /// `SITE_NAME` / `SITE_URL` from the process environment (and `.env`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            site_name: get("SITE_NAME", DEFAULT_SITE_NAME),
            site_url: get("SITE_URL", DEFAULT_SITE_URL).trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a page relative to the site root.
    pub fn page_url(&self, page: &str) -> String {
        format!("{}/{}", self.site_url, page.trim_start_matches('/'))
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset_or_blank() {
        let cfg = SiteConfig::from_lookup(|key| (key == "SITE_NAME").then(|| "   ".to_string()));
        assert_eq!(cfg.site_name, DEFAULT_SITE_NAME);
        assert_eq!(cfg.site_url, DEFAULT_SITE_URL);
    }

    #[test]
    fn url_trailing_slash_is_stripped() {
        let cfg = SiteConfig::from_lookup(|key| match key {
            "SITE_NAME" => Some("Macro Maps".to_string()),
            "SITE_URL" => Some("https://proteins.example.org/".to_string()),
            _ => None,
        });
        assert_eq!(cfg.site_name, "Macro Maps");
        assert_eq!(cfg.page_url("/charts.json"), "https://proteins.example.org/charts.json");
    }
}
