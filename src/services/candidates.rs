use std::collections::HashSet;

use crate::{
    db::AgendaStore,
    error::AppResult,
    models::{Exhibitor, SavedSlot, Talk},
    services::schedule::{self, TimeRange},
};

/// Time slots of saved talks whose start and end both parse
pub fn saved_intervals(slots: &[SavedSlot]) -> Vec<TimeRange> {
    slots
        .iter()
        .filter_map(|slot| {
            schedule::parse_range(slot.start_time.as_deref(), slot.end_time.as_deref())
        })
        .collect()
}

/// Drops talks already saved or clashing with the saved schedule
///
/// Talks without a parseable time slot are only ever removed by id.
/// Catalog order is preserved.
pub fn filter_talks(
    catalog: Vec<Talk>,
    saved_ids: &HashSet<i64>,
    intervals: &[TimeRange],
) -> Vec<Talk> {
    let total = catalog.len();
    let mut already_saved = 0usize;
    let mut conflicting = 0usize;

    let candidates: Vec<Talk> = catalog
        .into_iter()
        .filter(|talk| {
            if saved_ids.contains(&talk.id) {
                already_saved += 1;
                return false;
            }
            match talk.time_range() {
                Some(range) if schedule::overlaps(range.start, range.end, intervals) => {
                    conflicting += 1;
                    false
                }
                _ => true,
            }
        })
        .collect();

    tracing::debug!(
        total,
        already_saved,
        conflicting,
        remaining = candidates.len(),
        "Filtered talk candidates"
    );

    candidates
}

/// Drops exhibitors already saved, preserving catalog order
pub fn filter_exhibitors(catalog: Vec<Exhibitor>, saved_ids: &HashSet<i64>) -> Vec<Exhibitor> {
    let total = catalog.len();
    let candidates: Vec<Exhibitor> = catalog
        .into_iter()
        .filter(|exhibitor| !saved_ids.contains(&exhibitor.id))
        .collect();

    tracing::debug!(total, remaining = candidates.len(), "Filtered exhibitor candidates");

    candidates
}

/// Unsaved, non-conflicting talks from the scoped catalog
///
/// The saved-id exclusion covers every event; the catalog and the conflict
/// check follow `event_id`.
pub async fn candidate_talks(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<Vec<Talk>> {
    let (catalog, saved_ids, slots) = tokio::try_join!(
        store.talks(event_id),
        store.saved_talk_ids(user_id),
        store.saved_talk_slots(user_id, event_id),
    )?;

    Ok(filter_talks(catalog, &saved_ids, &saved_intervals(&slots)))
}

/// Unsaved exhibitors from the scoped catalog
pub async fn candidate_exhibitors(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<Vec<Exhibitor>> {
    let (catalog, saved_ids) = tokio::try_join!(
        store.exhibitors(event_id),
        store.saved_exhibitor_ids(user_id),
    )?;

    Ok(filter_exhibitors(catalog, &saved_ids))
}
