use anyhow::{Context, Result};
use sqlx::SqlitePool;

const CREATE_DOGS: &str = r#"
    CREATE TABLE IF NOT EXISTS dogs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        breed TEXT NOT NULL,
        age INTEGER NOT NULL,
        weight REAL NOT NULL DEFAULT 0.0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        deleted_at TEXT
    )
"#;

const CREATE_DELETED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_dogs_deleted_at ON dogs(deleted_at)";

/// Create the `dogs` table and its index when missing. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(CREATE_DOGS)
        .execute(pool)
        .await
        .context("creating table dogs")?;

    sqlx::query(CREATE_DELETED_AT_INDEX)
        .execute(pool)
        .await
        .context("creating index idx_dogs_deleted_at")?;

    Ok(())
}
