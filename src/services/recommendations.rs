use crate::{
    db::AgendaStore,
    error::AppResult,
    models::{AffinityCounts, Exhibitor, Recommendations, ScoredCandidate, Talk},
    services::{affinity, candidates, scoring},
};

/// Generates a personalised agenda recommendation
///
/// Suggests talks and exhibitors the user has not saved yet, ranked by how
/// often the user already saved items in the same track or sector. Talks that
/// clash with the saved schedule are left out. When `event_id` is set, the
/// catalog, the affinity counts and the clash check are limited to that event.
///
/// The talk and exhibitor pipelines share no state and run concurrently. Any
/// storage failure fails the whole request.
pub async fn get_recommendations(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<Recommendations> {
    let ((talks, track_counts), (exhibitors, sector_counts)) = tokio::try_join!(
        recommend_talks(store, user_id, event_id),
        recommend_exhibitors(store, user_id, event_id),
    )?;

    tracing::info!(
        user_id,
        ?event_id,
        talks = talks.len(),
        exhibitors = exhibitors.len(),
        "Recommendations computed"
    );

    Ok(Recommendations {
        event_id,
        talks,
        exhibitors,
        track_counts,
        sector_counts,
    })
}

async fn recommend_talks(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<(Vec<ScoredCandidate<Talk>>, AffinityCounts)> {
    let (track_counts, candidates) = tokio::try_join!(
        affinity::aggregate_track_counts(store, user_id, event_id),
        candidates::candidate_talks(store, user_id, event_id),
    )?;

    let ranked = scoring::rank(scoring::score_all(candidates, &track_counts));
    Ok((ranked, track_counts))
}

async fn recommend_exhibitors(
    store: &dyn AgendaStore,
    user_id: i64,
    event_id: Option<i64>,
) -> AppResult<(Vec<ScoredCandidate<Exhibitor>>, AffinityCounts)> {
    let (sector_counts, candidates) = tokio::try_join!(
        affinity::aggregate_sector_counts(store, user_id, event_id),
        candidates::candidate_exhibitors(store, user_id, event_id),
    )?;

    let ranked = scoring::rank(scoring::score_all(candidates, &sector_counts));
    Ok((ranked, sector_counts))
}
