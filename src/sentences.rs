//! Naive sentence splitting.
//!
//! A sentence is whatever sits between two `.` characters. Abbreviations,
//! decimals and other punctuation are not special-cased.

use tracing::info;

const SENTENCE_DELIMITER: char = '.';

/// Split `text` on every period.
///
/// `N` periods always give `N + 1` fragments, untrimmed and in source order.
/// The fragment after the last period is usually empty; dropping it is left
/// to [`sentence_candidates`].
pub fn split_sentences(text: &str) -> Vec<&str> {
    let fragments: Vec<&str> = text.split(SENTENCE_DELIMITER).collect();
    info!("  -> Found {} sentences to analyze.", fragments.len());
    fragments
}

/// Trim each fragment and skip the ones with nothing left.
pub fn sentence_candidates<'a, I>(fragments: I) -> impl Iterator<Item = &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    fragments
        .into_iter()
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}
