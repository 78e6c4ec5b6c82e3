//! Database module: models, schema and repositories for polls, options and votes.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus the computed `PollResult`
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool bootstrap and the `Storage` entry point
//! - `polls.rs`, `votes.rs`, `results.rs`: one repository per concern

pub mod models;
pub mod polls;
pub mod results;
pub mod schema;
pub mod sqlite;
pub mod votes;

pub use models::{OptionId, Poll, PollId, PollOption, PollResult, PollWithOptions, Vote};
pub use polls::PollRepository;
pub use results::ResultsAggregator;
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage, connect};
pub use votes::VoteRepository;
