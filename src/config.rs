//! Summarizer configuration, loaded from TOML.
//!
//! ```toml
//! themes = ["Budget", "Project Timeline", "Key Decisions"]
//!
//! [heading]
//! title = "Meeting Summary"
//! date = "2024-10-21"
//! ```

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SummarizerError};
use crate::markdown::Heading;

pub const DEFAULT_THEMES: [&str; 3] = ["Budget", "Project Timeline", "Key Decisions"];
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Themes to look for. Order decides section order in the summary.
    pub themes: Vec<String>,
    pub heading: Heading,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            themes: DEFAULT_THEMES.iter().map(|t| t.to_string()).collect(),
            heading: Heading::default(),
        }
    }
}

impl SummarizerConfig {
    pub fn with_themes<S: Into<String>>(themes: impl IntoIterator<Item = S>) -> Self {
        Self {
            themes: themes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SummarizerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| SummarizerError::io(path, e))?;
        toml::from_str(&raw).map_err(|source| SummarizerError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check the heading. Themes are never rejected: an empty list renders a
    /// heading and nothing else, a blank theme matches every sentence and a
    /// repeated one lists its sentences once per repeat.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for theme in &self.themes {
            if theme.trim().is_empty() {
                warn!(theme = theme.as_str(), "blank theme matches every sentence");
            }
            if !seen.insert(theme.as_str()) {
                warn!(theme = theme.as_str(), "theme listed twice, its sentences will repeat");
            }
        }

        if self.heading.title.contains('\n') {
            return Err(SummarizerError::Config(
                "heading title must be a single line".to_string(),
            ));
        }

        if !self.heading.is_placeholder_date() {
            parse_date(&self.heading.date)?;
        }

        Ok(())
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| SummarizerError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_nightingale_sync() {
        let config = SummarizerConfig::default();
        assert_eq!(config.themes, vec!["Budget", "Project Timeline", "Key Decisions"]);
        assert!(config.heading.is_placeholder_date());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = SummarizerConfig::from_toml_str(r#"themes = ["Hiring"]"#).unwrap();
        assert_eq!(config.themes, vec!["Hiring"]);
        assert_eq!(config.heading, Heading::default());

        let config = SummarizerConfig::from_toml_str("[heading]\ndate = \"2024-10-28\"\n").unwrap();
        assert_eq!(config.themes.len(), 3);
        assert_eq!(config.heading.date, "2024-10-28");
        assert_eq!(config.heading.title, "Meeting Summary");
    }

    #[test]
    fn unreadable_toml_is_a_config_error() {
        let err = SummarizerConfig::from_toml_str("themes = 3").unwrap_err();
        assert!(matches!(err, SummarizerError::Config(_)));
    }

    #[test]
    fn empty_theme_list_is_valid() {
        let config = SummarizerConfig::with_themes(Vec::<String>::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_and_repeated_themes_are_accepted() {
        let blank = SummarizerConfig::with_themes(["Budget", "  ", ""]);
        assert!(blank.validate().is_ok());

        let repeated = SummarizerConfig::with_themes(["Budget", "Timeline", "Budget"]);
        assert!(repeated.validate().is_ok());
    }

    #[test]
    fn heading_date_must_be_placeholder_or_calendar_date() {
        let mut config = SummarizerConfig::default();
        config.heading.date = "2024-02-30".to_string();
        assert!(matches!(config.validate(), Err(SummarizerError::InvalidDate(_))));

        config.heading.date = "2024-02-29".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn multi_line_title_is_rejected() {
        let mut config = SummarizerConfig::default();
        config.heading.title = "Sync\nNotes".to_string();
        assert!(matches!(config.validate(), Err(SummarizerError::Config(_))));
    }
}
