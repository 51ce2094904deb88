use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Exhibitor, Talk};

/// Frequency of each track or sector label among a user's saved items
///
/// Keys are exact, case-sensitive labels. Ordered so that serialized output is
/// identical across runs.
pub type AffinityCounts = BTreeMap<String, i64>;

/// A catalog item that survived filtering, with its score and explanation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate<T> {
    #[serde(flatten)]
    pub item: T,
    pub score: i64,
    pub reason: String,
}

impl<T> ScoredCandidate<T> {
    pub fn new(item: T, score: i64, reason: impl Into<String>) -> Self {
        Self {
            item,
            score,
            reason: reason.into(),
        }
    }
}

/// Output of one recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Recommendations {
    /// Active event the request was scoped to, if any
    pub event_id: Option<i64>,
    pub talks: Vec<ScoredCandidate<Talk>>,
    pub exhibitors: Vec<ScoredCandidate<Exhibitor>>,
    pub track_counts: AffinityCounts,
    pub sector_counts: AffinityCounts,
}
