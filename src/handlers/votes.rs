use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::info;

use super::extractors::{ApiJson, ApiPath};
use super::polls::required;
use crate::db::{OptionId, PollOption, Vote};
use crate::{PollError, router::PollState};

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub username: Option<String>,
    pub option_id: Option<OptionId>,
}

/// POST /votes
pub async fn add_vote_handler(
    State(state): State<PollState>,
    ApiJson(req): ApiJson<VoteRequest>,
) -> Result<StatusCode, PollError> {
    let username = required(req.username.as_deref(), "username")?;
    let option_id = req
        .option_id
        .ok_or_else(|| PollError::Validation("`option_id` is required".to_string()))?;

    state.storage.votes().add_vote(&username, option_id).await?;
    info!(option_id, "vote recorded");
    Ok(StatusCode::CREATED)
}

/// GET /options/{id}
pub async fn get_option_handler(
    State(state): State<PollState>,
    ApiPath(option_id): ApiPath<OptionId>,
) -> Result<Json<PollOption>, PollError> {
    state
        .storage
        .polls()
        .get_option(option_id)
        .await?
        .map(Json)
        .ok_or_else(|| PollError::NotFound(format!("option {option_id}")))
}

/// GET /options/{id}/votes
pub async fn option_votes_handler(
    State(state): State<PollState>,
    ApiPath(option_id): ApiPath<OptionId>,
) -> Result<Json<Vec<Vote>>, PollError> {
    Ok(Json(
        state.storage.votes().get_votes_for_option(option_id).await?,
    ))
}
