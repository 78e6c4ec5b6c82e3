use crate::db::models::{OptionId, Vote};
use crate::db::sqlite::SqlitePool;
use crate::error::PollError;

#[derive(Clone)]
pub struct VoteRepository {
    pool: SqlitePool,
}

impl VoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one ballot. Repeat votes are stored as separate rows.
    ///
    /// Fails with [`PollError::ForeignKeyViolation`] when `option_id` does not exist.
    pub async fn add_vote(&self, username: &str, option_id: OptionId) -> Result<(), PollError> {
        sqlx::query("INSERT INTO votes (username, option_id) VALUES (?, ?)")
            .bind(username)
            .bind(option_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_votes_for_option(&self, option_id: OptionId) -> Result<Vec<Vote>, PollError> {
        let votes = sqlx::query_as::<_, Vote>(
            "SELECT username, option_id FROM votes WHERE option_id = ? ORDER BY rowid",
        )
        .bind(option_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(votes)
    }
}
