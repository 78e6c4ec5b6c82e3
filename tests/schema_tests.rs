mod common;

use common::TestDb;

async fn user_tables(db: &TestDb) -> Vec<String> {
    sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(db.storage.pool())
    .await
    .expect("failed to list tables")
}

#[tokio::test]
async fn ensure_schema_creates_the_three_tables() {
    let db = TestDb::new("schema-create").await;
    assert_eq!(user_tables(&db).await, vec!["options", "polls", "votes"]);
}

#[tokio::test]
async fn ensure_schema_is_idempotent_and_keeps_data() {
    let db = TestDb::new("schema-idempotent").await;
    let poll_id = db
        .storage
        .polls()
        .create_poll("Kept?", "alice", &["yes", "no"])
        .await
        .expect("create poll");

    db.storage.ensure_schema().await.expect("second ensure_schema");
    db.storage.ensure_schema().await.expect("third ensure_schema");

    assert_eq!(user_tables(&db).await, vec!["options", "polls", "votes"]);
    assert_eq!(db.count("polls").await, 1);
    assert_eq!(
        db.storage.polls().get_poll_options(poll_id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn foreign_keys_are_enforced_on_pooled_connections() {
    let db = TestDb::new("schema-fk").await;
    let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(db.storage.pool())
        .await
        .expect("pragma");
    assert_eq!(enabled, 1);
}
