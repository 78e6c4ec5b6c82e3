#![allow(dead_code)]

use pollbox::Storage;
use pollbox::config::Config;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

/// A migrated database in a throwaway SQLite file, removed on drop.
pub struct TestDb {
    pub storage: Storage,
    path: PathBuf,
}

impl TestDb {
    pub async fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "pollbox-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let cfg = Config {
            database_url: format!("sqlite:{}", path.display()),
            max_connections: 4,
            connect_retries: 0,
            ..Config::default()
        };
        let storage = Storage::open(&cfg).await.expect("failed to open test database");
        Self { storage, path }
    }

    pub async fn count(&self, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(self.storage.pool())
            .await
            .expect("count query failed");
        n
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let _ = fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}
