use crate::{
    db::AgendaStore,
    error::AppResult,
    models::{AffinityCounts, LabelCount},
};

/// Builds the label → count mapping, dropping unlabelled rows
///
/// Missing or empty labels never form a bucket; the "Other" fallback only
/// applies to candidates at scoring time.
pub fn to_affinity_counts(rows: Vec<LabelCount>) -> AffinityCounts {
    rows.into_iter()
        .filter_map(|row| match row.label {
            Some(label) if !label.is_empty() => Some((label, row.count)),
            _ => None,
        })
        .collect()
}

/// Track frequencies among the user's saved talks
pub async fn aggregate_track_counts(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<AffinityCounts> {
    let counts = to_affinity_counts(store.track_counts(user_id, event_id).await?);
    tracing::debug!(user_id, ?event_id, tracks = counts.len(), "Aggregated track counts");
    Ok(counts)
}

/// Sector frequencies among the user's saved exhibitors
pub async fn aggregate_sector_counts(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<AffinityCounts> {
    let counts = to_affinity_counts(store.sector_counts(user_id, event_id).await?);
    tracing::debug!(user_id, ?event_id, sectors = counts.len(), "Aggregated sector counts");
    Ok(counts)
}
