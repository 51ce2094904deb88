use serde::{Deserialize, Serialize};

use crate::services::schedule::{self, TimeRange};

/// A conference event grouping talks and exhibitors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// A scheduled talk in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Talk {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Free-text track label entered by organisers
    pub track: Option<String>,
    /// Wall-clock start time, expected as "HH:MM"
    pub start_time: Option<String>,
    /// Wall-clock end time, expected as "HH:MM"
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub event_id: Option<i64>,
}

impl Talk {
    /// Returns the talk's time slot when both ends parse
    pub fn time_range(&self) -> Option<TimeRange> {
        schedule::parse_range(self.start_time.as_deref(), self.end_time.as_deref())
    }
}

/// An exhibitor with a stand at an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Exhibitor {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Free-text sector label entered by organisers
    pub sector: Option<String>,
    pub stand: Option<String>,
    pub event_id: Option<i64>,
}

/// Start/end text of a talk the user has saved
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SavedSlot {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// One grouped row of an affinity query; `label` is NULL for unlabelled items
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LabelCount {
    pub label: Option<String>,
    pub count: i64,
}
