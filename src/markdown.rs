//! Markdown rendering of a [`ThemedMatchSet`].

use serde::{Deserialize, Serialize};

use crate::themes::ThemedMatchSet;

pub const DEFAULT_TITLE: &str = "Meeting Summary";
/// Stands in for the meeting date unless a real one is configured.
pub const PLACEHOLDER_DATE: &str = "YYYY-MM-DD";

/// Top-level heading of the summary, rendered as `# {title} - {date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heading {
    pub title: String,
    pub date: String,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date: PLACEHOLDER_DATE.to_string(),
        }
    }
}

impl Heading {
    pub fn is_placeholder_date(&self) -> bool {
        self.date == PLACEHOLDER_DATE
    }
}

impl std::fmt::Display for Heading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "# {} - {}", self.title, self.date)
    }
}

/// Render the heading followed by one section per theme that matched.
///
/// Themes without matches produce nothing at all.
pub fn render_markdown(match_set: &ThemedMatchSet, heading: &Heading) -> String {
    let mut out = format!("{heading}\n");

    for entry in match_set.matched() {
        out.push_str(&format!("## {}\n", entry.theme));
        for sentence in &entry.sentences {
            out.push_str(&format!("- {sentence}.\n"));
        }
        out.push('\n');
    }

    out
}
