use axum::{
    Router,
    routing::{get, post},
};

use crate::db::Storage;
use crate::handlers::{
    add_vote_handler, create_poll_handler, get_option_handler, get_poll_handler,
    latest_poll_handler, list_polls_handler, option_votes_handler, poll_results_handler,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct PollState {
    pub storage: Storage,
}

impl PollState {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

pub fn poll_router(state: PollState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/polls", get(list_polls_handler).post(create_poll_handler))
        .route("/polls/latest", get(latest_poll_handler))
        .route("/polls/{id}", get(get_poll_handler))
        .route("/polls/{id}/results", get(poll_results_handler))
        .route("/votes", post(add_vote_handler))
        .route("/options/{id}", get(get_option_handler))
        .route("/options/{id}/votes", get(option_votes_handler))
        .with_state(state)
}
