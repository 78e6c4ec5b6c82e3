use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::extractors::{ApiJson, ApiPath};
use crate::db::{Poll, PollId, PollResult, PollWithOptions};
use crate::{PollError, router::PollState};

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub title: Option<String>,
    pub owner: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPoll {
    pub id: PollId,
}

/// Trimmed value of a required text field, or a validation error naming it.
pub(crate) fn required(value: Option<&str>, field: &str) -> Result<String, PollError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(PollError::Validation(format!("`{field}` is required"))),
    }
}

/// Drop blank options, keeping submission order.
pub(crate) fn non_empty_options(options: Vec<String>) -> Vec<String> {
    options
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

/// POST /polls
pub async fn create_poll_handler(
    State(state): State<PollState>,
    ApiJson(req): ApiJson<CreatePollRequest>,
) -> Result<(StatusCode, Json<CreatedPoll>), PollError> {
    let title = required(req.title.as_deref(), "title")?;
    let owner = required(req.owner.as_deref(), "owner")?;
    let options = non_empty_options(req.options);
    if options.is_empty() {
        return Err(PollError::Validation(
            "at least one non-empty option is required".to_string(),
        ));
    }

    let id = state
        .storage
        .polls()
        .create_poll(&title, &owner, &options)
        .await?;
    info!(poll_id = id, options = options.len(), "poll created");
    Ok((StatusCode::CREATED, Json(CreatedPoll { id })))
}

/// GET /polls
pub async fn list_polls_handler(
    State(state): State<PollState>,
) -> Result<Json<Vec<Poll>>, PollError> {
    Ok(Json(state.storage.polls().list_polls().await?))
}

/// GET /polls/latest
pub async fn latest_poll_handler(
    State(state): State<PollState>,
) -> Result<Json<PollWithOptions>, PollError> {
    state
        .storage
        .polls()
        .get_latest_poll()
        .await?
        .map(Json)
        .ok_or_else(|| PollError::NotFound("no polls yet".to_string()))
}

/// GET /polls/{id}
pub async fn get_poll_handler(
    State(state): State<PollState>,
    ApiPath(poll_id): ApiPath<PollId>,
) -> Result<Json<PollWithOptions>, PollError> {
    let polls = state.storage.polls();
    let poll = polls
        .get_poll(poll_id)
        .await?
        .ok_or_else(|| PollError::NotFound(format!("poll {poll_id}")))?;
    let options = polls.get_poll_options(poll_id).await?;
    Ok(Json(PollWithOptions { poll, options }))
}

/// GET /polls/{id}/results
pub async fn poll_results_handler(
    State(state): State<PollState>,
    ApiPath(poll_id): ApiPath<PollId>,
) -> Result<Json<Vec<PollResult>>, PollError> {
    Ok(Json(state.storage.results().get_results(poll_id).await?))
}
