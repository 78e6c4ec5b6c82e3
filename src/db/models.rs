use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type PollId = i64;
pub type OptionId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub owner_username: String,
}

/// One selectable choice of a poll. Named to avoid clashing with `std::option::Option`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct PollOption {
    pub id: OptionId,
    pub option_text: String,
    pub poll_id: PollId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Vote {
    pub username: String,
    pub option_id: OptionId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollWithOptions {
    #[serde(flatten)]
    pub poll: Poll,
    pub options: Vec<PollOption>,
}

/// Aggregated outcome for one option of a poll. Computed, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollResult {
    pub poll_id: PollId,
    pub poll_title: String,
    pub option_id: OptionId,
    pub option_text: String,
    pub vote_count: i64,
    /// Sum of `vote_count` over every option of the poll.
    pub total_votes: i64,
    /// Share of `total_votes`, 0 to 100, rounded to two decimals. 0 when nobody voted.
    pub vote_percentage: f64,
}
