//! SQL DDL for the poll storage.
//! SQLite dialect; every statement is `IF NOT EXISTS` so re-running is a no-op.

/// Tables, in dependency order:
/// - `polls`: one row per poll, `id` assigned by AUTOINCREMENT
/// - `options`: choices of a poll, `poll_id` references `polls(id)`
/// - `votes`: one row per ballot, `option_id` references `options(id)`
///
/// `votes` has no uniqueness constraint; repeat voting is allowed.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS polls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    owner_username TEXT
);

CREATE TABLE IF NOT EXISTS options (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    option_text TEXT,
    poll_id INTEGER,
    FOREIGN KEY (poll_id) REFERENCES polls (id)
);

CREATE TABLE IF NOT EXISTS votes (
    username TEXT,
    option_id INTEGER,
    FOREIGN KEY (option_id) REFERENCES options (id)
);

CREATE INDEX IF NOT EXISTS idx_options_poll_id ON options(poll_id);
CREATE INDEX IF NOT EXISTS idx_votes_option_id ON votes(option_id);
"#;
