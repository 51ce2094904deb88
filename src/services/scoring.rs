//! Affinity scoring and ranking of recommendation candidates.
//!
//! Every candidate starts at [`BASE_SCORE`]. When its label matches one the
//! user already saved items under, it gains [`AFFINITY_WEIGHT`] points per
//! saved item with that label.

use crate::models::{AffinityCounts, Exhibitor, ScoredCandidate, Talk};

pub const BASE_SCORE: i64 = 1;
pub const AFFINITY_WEIGHT: i64 = 10;

/// Label used for candidates without a track or sector
pub const DEFAULT_LABEL: &str = "Other";

/// A catalog item that can be matched against affinity counts
pub trait Categorized {
    /// The free-text track or sector label, if set
    fn label(&self) -> Option<&str>;

    /// Reason shown when the label matches the user's interests
    fn matched_reason(label: &str) -> String;

    /// Reason shown when nothing matches
    fn discovery_reason() -> &'static str;
}

impl Categorized for Talk {
    fn label(&self) -> Option<&str> {
        self.track.as_deref()
    }

    fn matched_reason(label: &str) -> String {
        format!("Matches your interest in '{}' talks.", label)
    }

    fn discovery_reason() -> &'static str {
        "Good to discover a new track."
    }
}

impl Categorized for Exhibitor {
    fn label(&self) -> Option<&str> {
        self.sector.as_deref()
    }

    fn matched_reason(label: &str) -> String {
        format!("Matches your interest in '{}' exhibitors.", label)
    }

    fn discovery_reason() -> &'static str {
        "New sector to explore."
    }
}

/// Score and reason for a single candidate
pub fn score<T: Categorized>(candidate: &T, counts: &AffinityCounts) -> (i64, String) {
    let label = candidate
        .label()
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_LABEL);

    match counts.get(label) {
        Some(count) => (BASE_SCORE + AFFINITY_WEIGHT * count, T::matched_reason(label)),
        None => (BASE_SCORE, T::discovery_reason().to_string()),
    }
}

/// Scores every candidate, keeping input order
pub fn score_all<T: Categorized>(
    candidates: Vec<T>,
    counts: &AffinityCounts,
) -> Vec<ScoredCandidate<T>> {
    candidates
        .into_iter()
        .map(|candidate| {
            let (score, reason) = score(&candidate, counts);
            ScoredCandidate::new(candidate, score, reason)
        })
        .collect()
}

/// Orders by descending score; equal scores keep their relative order
pub fn rank<T>(mut scored: Vec<ScoredCandidate<T>>) -> Vec<ScoredCandidate<T>> {
    // `sort_by` is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
