use crate::config::Config;
use crate::db::polls::PollRepository;
use crate::db::results::ResultsAggregator;
use crate::db::schema::SQLITE_INIT;
use crate::db::votes::VoteRepository;
use crate::error::PollError;
use backon::{ExponentialBuilder, Retryable};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub type SqlitePool = Pool<Sqlite>;

fn connect_retry_policy(max_times: usize) -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(200))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(max_times)
        .with_jitter()
}

/// Open the bounded connection pool described by `cfg`.
///
/// Foreign keys are enforced on every connection. The first connection is
/// retried with backoff; a malformed URL fails immediately.
pub async fn connect(cfg: &Config) -> Result<SqlitePool, PollError> {
    let connect_opts = SqliteConnectOptions::from_str(&cfg.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool_opts = SqlitePoolOptions::new()
        .min_connections(cfg.min_connections)
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout());

    let pool = (|| pool_opts.clone().connect_with(connect_opts.clone()))
        .retry(connect_retry_policy(cfg.connect_retries))
        .when(|e| !matches!(e, sqlx::Error::Configuration(_)))
        .notify(|e, after| {
            warn!(error = %e, retry_in = ?after, "database connection failed; retrying");
        })
        .await?;

    info!(
        min = cfg.min_connections,
        max = cfg.max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Entry point to the data-access layer. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect using `cfg` and make sure the schema exists.
    pub async fn open(cfg: &Config) -> Result<Self, PollError> {
        let storage = Self::new(connect(cfg).await?);
        storage.ensure_schema().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the tables if they are missing. Safe to call any number of times.
    pub async fn ensure_schema(&self) -> Result<(), PollError> {
        // sqlx::query runs a single statement, so feed the DDL one at a time.
        let mut tx = self.pool.begin().await?;
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub fn polls(&self) -> PollRepository {
        PollRepository::new(self.pool.clone())
    }

    pub fn votes(&self) -> VoteRepository {
        VoteRepository::new(self.pool.clone())
    }

    pub fn results(&self) -> ResultsAggregator {
        ResultsAggregator::new(self.pool.clone())
    }
}
