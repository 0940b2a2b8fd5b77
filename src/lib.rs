//! Keyword-driven meeting summaries.
//!
//! A transcript is cut into sentences on every period, sentences that
//! mention a configured theme are kept, and the survivors are rendered as a
//! Markdown document with one section per theme:
//!
//! ```
//! use meeting_summarizer::summarize_transcript;
//!
//! let summary = summarize_transcript(
//!     "Sarah: Budget is on track. Mike: Timeline slips a week.",
//!     &["Budget", "Timeline"],
//! )?;
//! assert!(summary.contains("## Budget\n- Sarah: Budget is on track.\n"));
//! # Ok::<(), meeting_summarizer::SummarizerError>(())
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod sentences;
pub mod themes;
pub mod transcriptparser;

use tracing::info;

pub use config::SummarizerConfig;
pub use error::{Result, SummarizerError};
pub use markdown::{render_markdown, Heading};
pub use sentences::split_sentences;
pub use themes::{extract_themed_sentences, ThemeMatcher, ThemeMatches, ThemedMatchSet};
pub use transcriptparser::{read_transcript, PageSettings};

/// Project Nightingale sync, summarized when no input file is given.
pub const DEMO_TRANSCRIPT: &str = "
Alright team, let's kick off the Project Nightingale sync. First up, financials.
Sarah, what's the latest on the budget?
Sarah: We're currently tracking at 75% of our allocated budget for Q3, which is right on target.
We need to finalize the vendor contract by next Friday.
John: Okay, great. Next, the Project Timeline. Where are we with the alpha release?
Mike: We've hit a small snag with the integration module. I think it will push the timeline
back by about a week. The new projected date for the alpha is October 28th.
John: A week is acceptable. Let's make sure we document that.
Finally, let's talk about Key Decisions from this meeting. We've agreed to move forward
with the 'Orion' UI framework. I also want to confirm the decision to table the
internationalization feature until Phase 2.
All: Agreed.
John: Perfect. That's all for today. Let's get back to it. The budget is solid, and the
timeline slip is manageable.
";

/// Raw meeting text. Never modified once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_TRANSCRIPT)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    match_set: ThemedMatchSet,
    markdown: String,
}

impl Summary {
    pub fn match_set(&self) -> &ThemedMatchSet {
        &self.match_set
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn into_markdown(self) -> String {
        self.markdown
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.match_set)?)
    }
}

/// Compiled theme matchers and a checked heading, ready for any number of transcripts.
#[derive(Debug, Clone)]
pub struct Summarizer {
    matchers: Vec<ThemeMatcher>,
    heading: Heading,
}

impl Summarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        config.validate()?;
        let matchers = ThemeMatcher::compile_all(&config.themes)?;
        Ok(Self {
            matchers,
            heading: config.heading,
        })
    }

    pub fn themes(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(ThemeMatcher::theme)
    }

    /// Split, filter and render. Runs to completion and cannot fail.
    pub fn summarize(&self, transcript: &Transcript) -> Summary {
        info!("Step 1: Parsing transcript into individual sentences...");
        let fragments = split_sentences(transcript.as_str());

        info!("Step 2: Identifying and extracting sentences relevant to key themes...");
        let match_set = extract_themed_sentences(fragments, &self.matchers);
        info!(
            matches = match_set.total_matches(),
            themes = match_set.matched().count(),
            "  -> Extraction complete."
        );

        info!("Step 3: Formatting extracted information into a Markdown summary...");
        let markdown = render_markdown(&match_set, &self.heading);
        info!("  -> Formatting complete.");

        Summary {
            match_set,
            markdown,
        }
    }
}

/// One-shot summary with the default heading.
pub fn summarize_transcript<S: AsRef<str>>(transcript: &str, themes: &[S]) -> Result<String> {
    let config = SummarizerConfig::with_themes(themes.iter().map(|t| t.as_ref().to_string()));
    let summarizer = Summarizer::new(config)?;
    Ok(summarizer
        .summarize(&Transcript::new(transcript))
        .into_markdown())
}
