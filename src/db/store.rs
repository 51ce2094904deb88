use std::collections::HashSet;

use crate::{
    error::AppResult,
    models::{Event, Exhibitor, LabelCount, SavedSlot, Talk},
};

/// Relational storage behind the agenda and recommendation services
///
/// Every `event_id: Option<i64>` parameter scopes a query to one event when
/// present and covers the whole catalog when absent. Saved-id lookups are
/// never scoped: an item saved under any event counts as saved everywhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AgendaStore: Send + Sync {
    /// Saved talks grouped by track, NULL tracks included as a `None` label
    async fn track_counts(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<LabelCount>>;

    /// Saved exhibitors grouped by sector, NULL sectors included as a `None` label
    async fn sector_counts(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<LabelCount>>;

    /// Raw start/end text of each saved talk
    async fn saved_talk_slots(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<SavedSlot>>;

    async fn saved_talk_ids(&self, user_id: i64) -> AppResult<HashSet<i64>>;

    async fn saved_exhibitor_ids(&self, user_id: i64) -> AppResult<HashSet<i64>>;

    /// Talk catalog in id order
    async fn talks(&self, event_id: Option<i64>) -> AppResult<Vec<Talk>>;

    /// Exhibitor catalog in id order
    async fn exhibitors(&self, event_id: Option<i64>) -> AppResult<Vec<Exhibitor>>;

    /// Talks on the user's agenda ordered by start time
    async fn saved_talks(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<Talk>>;

    /// Exhibitors on the user's agenda ordered by name
    async fn saved_exhibitors(&self, user_id: i64, event_id: Option<i64>) -> AppResult<Vec<Exhibitor>>;

    async fn talk_exists(&self, talk_id: i64) -> AppResult<bool>;

    async fn exhibitor_exists(&self, exhibitor_id: i64) -> AppResult<bool>;

    /// Returns false if the pair was already saved
    async fn insert_saved_talk(&self, user_id: i64, talk_id: i64) -> AppResult<bool>;

    /// Returns false if the pair was already saved
    async fn insert_saved_exhibitor(&self, user_id: i64, exhibitor_id: i64) -> AppResult<bool>;

    /// Returns false if nothing was saved
    async fn delete_saved_talk(&self, user_id: i64, talk_id: i64) -> AppResult<bool>;

    /// Returns false if nothing was saved
    async fn delete_saved_exhibitor(&self, user_id: i64, exhibitor_id: i64) -> AppResult<bool>;

    /// All events, dated ones first in start-date order
    async fn events(&self) -> AppResult<Vec<Event>>;

    async fn event(&self, event_id: i64) -> AppResult<Option<Event>>;

    /// Talks of one event ordered by start time
    async fn event_talks(&self, event_id: i64) -> AppResult<Vec<Talk>>;

    /// Exhibitors of one event ordered by name
    async fn event_exhibitors(&self, event_id: i64) -> AppResult<Vec<Exhibitor>>;
}
