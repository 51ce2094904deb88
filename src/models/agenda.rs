use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Event, Exhibitor, Talk};

/// Result of saving an item to a user's agenda
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// A new save record was created
    Added,
    /// The pair was already saved; nothing changed
    AlreadySaved,
}

/// Items a user has saved, optionally limited to one event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Agenda {
    pub event_id: Option<i64>,
    pub talks: Vec<Talk>,
    pub exhibitors: Vec<Exhibitor>,
}

/// An event with its catalog and, when a user is known, what they saved from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDetail {
    pub event: Event,
    pub talks: Vec<Talk>,
    pub exhibitors: Vec<Exhibitor>,
    pub saved_talk_ids: BTreeSet<i64>,
    pub saved_exhibitor_ids: BTreeSet<i64>,
}
