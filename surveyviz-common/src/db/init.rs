//! Database initialization
//!
//! Opens (or creates) the SQLite database and brings the schema up
//! idempotently. The application has a single table; there are no
//! migrations beyond the initial create.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc creates the database file on first run
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL mode allows concurrent readers while an upload replaces the table
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    // Set busy timeout so concurrent requests wait instead of erroring
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_survey_responses_table(&pool).await?;

    Ok(pool)
}

async fn create_survey_responses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS survey_responses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            age TEXT NOT NULL,
            gender TEXT NOT NULL,
            listens_while_working TEXT NOT NULL,
            self_rated_productivity TEXT NOT NULL,
            preferred_genre TEXT NOT NULL,
            volume_level TEXT NOT NULL,
            concentration_effect TEXT NOT NULL,
            has_disruptive_genre TEXT NOT NULL,
            disruptive_genre_detail TEXT,
            calms_respondent TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_schema() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("survey.db");

        let pool = init_database(&db_path).await.expect("init database");
        assert!(db_path.exists());

        // Schema accepts a full row, including a NULL detail column
        sqlx::query(
            "INSERT INTO survey_responses
             (age, gender, listens_while_working, self_rated_productivity,
              preferred_genre, volume_level, concentration_effect,
              has_disruptive_genre, disruptive_genre_detail, calms_respondent)
             VALUES ('19', 'V', 'Jā', '7', 'Roks', 'Vidēji', 'Palīdz', 'Nē', NULL, 'Jā')",
        )
        .execute(&pool)
        .await
        .expect("insert row");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM survey_responses")
            .fetch_one(&pool)
            .await
            .expect("count rows");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db_path = dir.path().join("survey.db");

        let pool = init_database(&db_path).await.expect("first init");
        drop(pool);

        // Second init must not fail or drop data
        init_database(&db_path).await.expect("second init");
    }
}
