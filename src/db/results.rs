use crate::db::models::{OptionId, PollId, PollResult};
use crate::db::sqlite::SqlitePool;
use crate::error::PollError;
use sqlx::FromRow;

/// Per-option vote counts plus the poll-wide total from a window over the grouped counts.
/// The LEFT JOIN keeps options nobody voted for, with a count of 0.
const SELECT_POLL_RESULTS: &str = r#"
SELECT
    p.id AS poll_id,
    p.title AS poll_title,
    o.id AS option_id,
    o.option_text AS option_text,
    COUNT(v.option_id) AS vote_count,
    SUM(COUNT(v.option_id)) OVER (PARTITION BY p.id) AS total_votes
FROM polls p
JOIN options o ON o.poll_id = p.id
LEFT JOIN votes v ON v.option_id = o.id
WHERE p.id = ?
GROUP BY p.id, p.title, o.id, o.option_text
ORDER BY o.id
"#;

#[derive(Debug, FromRow)]
struct ResultRow {
    poll_id: PollId,
    poll_title: String,
    option_id: OptionId,
    option_text: String,
    vote_count: i64,
    total_votes: i64,
}

impl From<ResultRow> for PollResult {
    fn from(r: ResultRow) -> Self {
        Self {
            vote_percentage: vote_percentage(r.vote_count, r.total_votes),
            poll_id: r.poll_id,
            poll_title: r.poll_title,
            option_id: r.option_id,
            option_text: r.option_text,
            vote_count: r.vote_count,
            total_votes: r.total_votes,
        }
    }
}

/// `count` as a percentage of `total`, rounded half away from zero to two decimals.
/// A poll without votes gives 0 for every option.
pub fn vote_percentage(count: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 * 100.0 / total as f64;
    (raw * 100.0).round() / 100.0
}

#[derive(Clone)]
pub struct ResultsAggregator {
    pool: SqlitePool,
}

impl ResultsAggregator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// One entry per option of the poll, in option order. Empty for an unknown poll.
    pub async fn get_results(&self, poll_id: PollId) -> Result<Vec<PollResult>, PollError> {
        let rows = sqlx::query_as::<_, ResultRow>(SELECT_POLL_RESULTS)
            .bind(poll_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(PollResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::vote_percentage;

    #[test]
    fn zero_total_never_divides() {
        assert_eq!(vote_percentage(0, 0), 0.0);
    }

    #[test]
    fn thirds_round_to_two_decimals() {
        assert_eq!(vote_percentage(2, 3), 66.67);
        assert_eq!(vote_percentage(1, 3), 33.33);
    }

    #[test]
    fn halves_round_away_from_zero() {
        // 1/8 = 12.5% exactly, 1/16 = 6.25% exactly, 1/32 = 3.125% -> 3.13
        assert_eq!(vote_percentage(1, 8), 12.5);
        assert_eq!(vote_percentage(1, 16), 6.25);
        assert_eq!(vote_percentage(1, 32), 3.13);
    }

    #[test]
    fn unanimous_and_absent() {
        assert_eq!(vote_percentage(5, 5), 100.0);
        assert_eq!(vote_percentage(0, 5), 0.0);
    }
}
