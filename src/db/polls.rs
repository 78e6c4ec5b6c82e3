use crate::db::models::{OptionId, Poll, PollId, PollOption, PollWithOptions};
use crate::db::sqlite::SqlitePool;
use crate::error::PollError;

#[derive(Clone)]
pub struct PollRepository {
    pool: SqlitePool,
}

impl PollRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a poll and its options in one transaction. Returns the new poll id.
    ///
    /// Options are stored in the order given. Empty strings are not filtered here;
    /// callers drop them before calling.
    pub async fn create_poll<S: AsRef<str>>(
        &self,
        title: &str,
        owner: &str,
        options: &[S],
    ) -> Result<PollId, PollError> {
        let mut tx = self.pool.begin().await?;

        let (poll_id,): (PollId,) = sqlx::query_as(
            "INSERT INTO polls (title, owner_username) VALUES (?, ?) RETURNING id",
        )
        .bind(title)
        .bind(owner)
        .fetch_one(&mut *tx)
        .await?;

        for option_text in options {
            sqlx::query("INSERT INTO options (option_text, poll_id) VALUES (?, ?)")
                .bind(option_text.as_ref())
                .bind(poll_id)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping `tx` on any early return above rolls everything back.
        tx.commit().await?;
        Ok(poll_id)
    }

    /// All polls, newest first.
    pub async fn list_polls(&self) -> Result<Vec<Poll>, PollError> {
        let polls = sqlx::query_as::<_, Poll>(
            "SELECT id, title, owner_username FROM polls ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(polls)
    }

    pub async fn get_poll(&self, poll_id: PollId) -> Result<Option<Poll>, PollError> {
        let poll = sqlx::query_as::<_, Poll>(
            "SELECT id, title, owner_username FROM polls WHERE id = ?",
        )
        .bind(poll_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(poll)
    }

    /// Options of a poll in creation order. Empty for an unknown poll.
    pub async fn get_poll_options(&self, poll_id: PollId) -> Result<Vec<PollOption>, PollError> {
        let options = sqlx::query_as::<_, PollOption>(
            "SELECT id, option_text, poll_id FROM options WHERE poll_id = ? ORDER BY id",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(options)
    }

    pub async fn get_option(&self, option_id: OptionId) -> Result<Option<PollOption>, PollError> {
        let option = sqlx::query_as::<_, PollOption>(
            "SELECT id, option_text, poll_id FROM options WHERE id = ?",
        )
        .bind(option_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(option)
    }

    /// The most recently created poll together with its options.
    pub async fn get_latest_poll(&self) -> Result<Option<PollWithOptions>, PollError> {
        let mut tx = self.pool.begin().await?;

        let poll = sqlx::query_as::<_, Poll>(
            "SELECT id, title, owner_username FROM polls ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&mut *tx)
        .await?;
        let Some(poll) = poll else {
            return Ok(None);
        };

        let options = sqlx::query_as::<_, PollOption>(
            "SELECT id, option_text, poll_id FROM options WHERE poll_id = ? ORDER BY id",
        )
        .bind(poll.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(PollWithOptions { poll, options }))
    }
}
