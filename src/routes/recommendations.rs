use axum::{
    extract::State,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Recommendations,
    routes::{
        extract::{AppPath, AppQuery},
        AppState,
    },
    services::recommendations,
};

/// Optional active-event scope
#[derive(Debug, Deserialize, Default)]
pub struct ScopeQuery {
    pub event_id: Option<i64>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath(user_id): AppPath<i64>,
    AppQuery(scope): AppQuery<ScopeQuery>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        event_id = ?scope.event_id,
        "Processing recommendation request"
    );

    let response =
        recommendations::get_recommendations(state.store.as_ref(), user_id, scope.event_id).await?;

    tracing::info!(
        request_id = %request_id,
        talks = response.talks.len(),
        exhibitors = response.exhibitors.len(),
        "Recommendation request completed"
    );

    Ok(Json(response))
}
