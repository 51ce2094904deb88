use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Event, EventDetail},
    routes::{
        extract::{AppPath, AppQuery},
        AppState,
    },
    services::events,
};

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub user_id: Option<i64>,
}

/// Handler for event listing
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = events::list_events(state.store.as_ref()).await?;
    Ok(Json(events))
}

/// Handler for a single event with its talks and exhibitors
pub async fn detail(
    State(state): State<AppState>,
    AppPath(event_id): AppPath<i64>,
    AppQuery(query): AppQuery<DetailQuery>,
) -> AppResult<Json<EventDetail>> {
    let detail = events::get_event_detail(state.store.as_ref(), event_id, query.user_id).await?;
    Ok(Json(detail))
}
