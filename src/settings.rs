use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ShellResult;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Google,
    DuckDuckGo,
    Bing,
    Brave,
}

impl SearchEngine {
    fn base_url(self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search?q=",
            Self::DuckDuckGo => "https://duckduckgo.com/?q=",
            Self::Bing => "https://bing.com/search?q=",
            Self::Brave => "https://search.brave.com/search?q=",
        }
    }

    /// Builds the results URL for `query`.
    ///
    /// With `encode` off the query is spliced into the URL verbatim, so `&`, `#`
    /// and spaces in user input change the meaning of the URL. That mode only
    /// exists to reproduce the historical behaviour and is not the default.
    pub fn query_url(self, query: &str, encode: bool) -> String {
        if encode {
            format!("{}{}", self.base_url(), urlencoding::encode(query))
        } else {
            format!("{}{}", self.base_url(), query)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub homepage: String,
    pub search_engine: SearchEngine,
    pub encode_search_query: bool,
    /// Page loaded by the new-tab action. Falls back to `homepage`.
    pub new_tab_url: Option<String>,
    /// Page loaded into the surface added by the split action. Falls back to `homepage`.
    pub split_url: Option<String>,
    /// Logical pixels reserved above the content area for the toolbar and tab strip.
    pub toolbar_height: f64,
    pub min_pane_width: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            homepage: "https://www.google.com".to_string(),
            search_engine: SearchEngine::default(),
            encode_search_query: true,
            new_tab_url: None,
            split_url: None,
            toolbar_height: 56.0 + 28.0,
            min_pane_width: 120.0,
        }
    }
}

impl Settings {
    pub fn search_url(&self, query: &str) -> String {
        self.search_engine.query_url(query, self.encode_search_query)
    }

    pub fn new_tab_url(&self) -> &str {
        self.new_tab_url.as_deref().unwrap_or(&self.homepage)
    }

    pub fn split_url(&self) -> &str {
        self.split_url.as_deref().unwrap_or(&self.homepage)
    }

    /// Loads settings from `path`, returning defaults when the file is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("[Settings] Failed to parse settings: {}, returning defaults", e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("[Settings] Failed to read file: {}, returning defaults", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> ShellResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;

        // Write to tmp, then rename, so a crash never leaves a half-written file.
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SearchEngine::Google, "cats", "https://www.google.com/search?q=cats")]
    #[case(SearchEngine::Google, "hello world", "https://www.google.com/search?q=hello%20world")]
    #[case(SearchEngine::DuckDuckGo, "c++", "https://duckduckgo.com/?q=c%2B%2B")]
    #[case(SearchEngine::Bing, "a&b", "https://bing.com/search?q=a%26b")]
    fn test_encoded_query_url(
        #[case] engine: SearchEngine,
        #[case] query: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(engine.query_url(query, true), expected);
    }

    #[test]
    fn test_raw_query_url_keeps_input_verbatim() {
        assert_eq!(
            SearchEngine::Google.query_url("a&b c", false),
            "https://www.google.com/search?q=a&b c"
        );
    }

    #[test]
    fn test_default_urls_fall_back_to_homepage() {
        let mut settings = Settings::default();
        assert_eq!(settings.new_tab_url(), "https://www.google.com");
        assert_eq!(settings.split_url(), "https://www.google.com");

        settings.new_tab_url = Some("https://www.youtube.com".to_string());
        assert_eq!(settings.new_tab_url(), "https://www.youtube.com");
        assert_eq!(settings.split_url(), "https://www.google.com");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_corrupt_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let json = r#"{ "homepage": "https://example.org", "search_engine": "Brave" }"#;
        fs::write(&path, json).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.homepage, "https://example.org");
        assert_eq!(settings.search_engine, SearchEngine::Brave);
        assert!(settings.encode_search_query);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.encode_search_query = false;
        settings.split_url = Some("https://example.com".to_string());

        settings.save_to(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(Settings::load_from(&path), settings);
    }
}
