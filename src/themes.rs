//! Theme filtering: keep every sentence that mentions a configured theme.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SummarizerError};
use crate::sentences::sentence_candidates;

/// Case-insensitive literal containment test for one theme.
#[derive(Debug, Clone)]
pub struct ThemeMatcher {
    theme: String,
    pattern: Regex,
}

impl ThemeMatcher {
    pub fn new(theme: impl Into<String>) -> Result<Self> {
        let theme = theme.into();
        let pattern = RegexBuilder::new(&regex::escape(&theme))
            .case_insensitive(true)
            .build()
            .map_err(|source| SummarizerError::Pattern {
                theme: theme.clone(),
                source,
            })?;
        Ok(Self { theme, pattern })
    }

    /// Compile one matcher per theme, keeping the configured order.
    pub fn compile_all<S: AsRef<str>>(themes: &[S]) -> Result<Vec<Self>> {
        themes.iter().map(|t| Self::new(t.as_ref())).collect()
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn is_match(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }
}

/// The sentences retained for a single theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMatches {
    pub theme: String,
    pub sentences: Vec<String>,
}

/// Sentences grouped by theme, in configured theme order.
///
/// Every configured theme has an entry, including the ones nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemedMatchSet {
    entries: Vec<ThemeMatches>,
}

impl ThemedMatchSet {
    /// An empty entry for every distinct theme, in first-seen order.
    pub fn with_themes<'a, I>(themes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = Self::default();
        for theme in themes {
            if set.position(theme).is_none() {
                set.entries.push(ThemeMatches {
                    theme: theme.to_string(),
                    sentences: Vec::new(),
                });
            }
        }
        set
    }

    fn position(&self, theme: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.theme == theme)
    }

    fn push(&mut self, theme: &str, sentence: &str) {
        if let Some(i) = self.position(theme) {
            self.entries[i].sentences.push(sentence.to_string());
        }
    }

    pub fn get(&self, theme: &str) -> Option<&[String]> {
        self.position(theme)
            .map(|i| self.entries[i].sentences.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeMatches> {
        self.entries.iter()
    }

    /// Entries with at least one sentence.
    pub fn matched(&self) -> impl Iterator<Item = &ThemeMatches> {
        self.entries.iter().filter(|e| !e.sentences.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|e| e.sentences.len()).sum()
    }
}

/// Collect, for every theme, the trimmed sentences that mention it.
///
/// Blank fragments are skipped. A sentence mentioning several themes is
/// recorded under each of them. A theme listed twice shares one entry and
/// records each matching sentence once per listing.
pub fn extract_themed_sentences<'a, I>(fragments: I, matchers: &[ThemeMatcher]) -> ThemedMatchSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut set = ThemedMatchSet::with_themes(matchers.iter().map(ThemeMatcher::theme));

    for sentence in sentence_candidates(fragments) {
        for matcher in matchers {
            if matcher.is_match(sentence) {
                debug!(theme = matcher.theme(), sentence, "theme hit");
                set.push(matcher.theme(), sentence);
            }
        }
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matchers(themes: &[&str]) -> Vec<ThemeMatcher> {
        ThemeMatcher::compile_all(themes).unwrap()
    }

    #[test]
    fn matcher_ignores_case() {
        let m = ThemeMatcher::new("Project Timeline").unwrap();
        assert!(m.is_match("the PROJECT timeline slipped"));
        assert!(!m.is_match("the project's timeline slipped"));
    }

    #[test]
    fn matcher_treats_theme_as_literal_text() {
        let m = ThemeMatcher::new("Q3 (draft)").unwrap();
        assert!(m.is_match("see q3 (DRAFT) numbers"));
        assert!(!m.is_match("see Q3 draft numbers"));

        let dot = ThemeMatcher::new("a+b").unwrap();
        assert!(dot.is_match("A+B"));
        assert!(!dot.is_match("aab"));
    }

    #[test]
    fn every_theme_gets_an_entry() {
        let set = extract_themed_sentences(
            vec!["Budget is fine", ""],
            &matchers(&["Budget", "Hiring"]),
        );
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("Budget"), Some(&["Budget is fine".to_string()][..]));
        assert_eq!(set.get("Hiring"), Some(&[][..]));
        assert_eq!(set.get("Unknown"), None);
        assert_eq!(set.matched().count(), 1);
    }

    #[test]
    fn sentence_can_land_under_several_themes() {
        let set = extract_themed_sentences(
            vec![" Budget and Timeline both look fine", " Nothing else"],
            &matchers(&["Budget", "Timeline"]),
        );
        let expected = vec!["Budget and Timeline both look fine".to_string()];
        assert_eq!(set.get("Budget").unwrap(), expected.as_slice());
        assert_eq!(set.get("Timeline").unwrap(), expected.as_slice());
        assert_eq!(set.total_matches(), 2);
    }

    #[test]
    fn overlapping_themes_both_match() {
        let set = extract_themed_sentences(
            vec!["The budget review is done"],
            &matchers(&["budget", "budget review"]),
        );
        assert_eq!(set.get("budget").unwrap().len(), 1);
        assert_eq!(set.get("budget review").unwrap().len(), 1);
    }

    #[test]
    fn repeated_theme_appends_once_per_listing() {
        let set = extract_themed_sentences(
            vec!["Budget first", " Timeline", " Budget again"],
            &matchers(&["Budget", "Timeline", "Budget"]),
        );
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.iter().map(|e| e.theme.as_str()).collect::<Vec<_>>(),
            vec!["Budget", "Timeline"]
        );
        assert_eq!(
            set.get("Budget").unwrap(),
            &[
                "Budget first".to_string(),
                "Budget first".to_string(),
                "Budget again".to_string(),
                "Budget again".to_string(),
            ][..]
        );
        assert_eq!(set.get("Timeline").unwrap().len(), 1);
    }

    #[test]
    fn blank_theme_matches_every_sentence() {
        let set = extract_themed_sentences(vec!["Budget ok", " Lunch", " "], &matchers(&[""]));
        assert_eq!(
            set.get("").unwrap(),
            &["Budget ok".to_string(), "Lunch".to_string()][..]
        );
    }

    #[test]
    fn case_folding_follows_unicode_simple_folding() {
        // lowercasing both sides would not match final sigma against capital sigma
        let m = ThemeMatcher::new("Σ").unwrap();
        assert!(m.is_match("λόγος"));
        assert!(m.is_match("ΛΌΓΟΣ"));
    }

    #[test]
    fn no_themes_gives_an_empty_set() {
        let set = extract_themed_sentences(vec!["Budget"], &[]);
        assert!(set.is_empty());
        assert_eq!(set.total_matches(), 0);
    }

    #[test]
    fn match_set_serializes_in_theme_order() {
        let set = extract_themed_sentences(
            vec!["timeline moved", "budget ok"],
            &matchers(&["Timeline", "Budget"]),
        );
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(
            json,
            r#"[{"theme":"Timeline","sentences":["timeline moved"]},{"theme":"Budget","sentences":["budget ok"]}]"#
        );
    }
}
