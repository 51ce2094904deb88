use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{Agenda, SaveOutcome},
    routes::{
        extract::{AppJson, AppPath, AppQuery},
        recommendations::ScopeQuery,
        AppState,
    },
    services::agenda,
};

#[derive(Debug, Deserialize)]
pub struct AddTalkRequest {
    pub talk_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AddExhibitorRequest {
    pub exhibitor_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub outcome: SaveOutcome,
}

/// A fresh save is 201; re-saving an existing pair is a 200 no-op
fn save_response(outcome: SaveOutcome) -> (StatusCode, Json<SaveResponse>) {
    let status = match outcome {
        SaveOutcome::Added => StatusCode::CREATED,
        SaveOutcome::AlreadySaved => StatusCode::OK,
    };
    (status, Json(SaveResponse { outcome }))
}

/// Shows the user's agenda
pub async fn show(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    AppQuery(scope): AppQuery<ScopeQuery>,
) -> AppResult<Json<Agenda>> {
    let agenda = agenda::get_agenda(state.store.as_ref(), user_id, scope.event_id).await?;
    Ok(Json(agenda))
}

/// Saves a talk to the user's agenda
pub async fn add_talk(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath(user_id): AppPath<i64>,
    AppJson(request): AppJson<AddTalkRequest>,
) -> AppResult<(StatusCode, Json<SaveResponse>)> {
    tracing::info!(request_id = %request_id, user_id, talk_id = request.talk_id, "Adding talk");

    let outcome = agenda::add_talk(state.store.as_ref(), user_id, request.talk_id).await?;
    Ok(save_response(outcome))
}

/// Saves an exhibitor to the user's agenda
pub async fn add_exhibitor(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    AppPath(user_id): AppPath<i64>,
    AppJson(request): AppJson<AddExhibitorRequest>,
) -> AppResult<(StatusCode, Json<SaveResponse>)> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        exhibitor_id = request.exhibitor_id,
        "Adding exhibitor"
    );

    let outcome =
        agenda::add_exhibitor(state.store.as_ref(), user_id, request.exhibitor_id).await?;
    Ok(save_response(outcome))
}

pub async fn remove_talk(
    State(state): State<AppState>,
    AppPath((user_id, talk_id)): AppPath<(i64, i64)>,
) -> AppResult<StatusCode> {
    agenda::remove_talk(state.store.as_ref(), user_id, talk_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_exhibitor(
    State(state): State<AppState>,
    AppPath((user_id, exhibitor_id)): AppPath<(i64, i64)>,
) -> AppResult<StatusCode> {
    agenda::remove_exhibitor(state.store.as_ref(), user_id, exhibitor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
