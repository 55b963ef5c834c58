//! Query layer for survey responses
//!
//! All writes go through full replacement or full deletion; there is no
//! per-row mutation. Filter values are always bound, never interpolated.

use sqlx::SqlitePool;
use surveyviz_common::db::SurveyResponse;
use surveyviz_common::Result;

const SELECT_COLUMNS: &str = "age, gender, listens_while_working, self_rated_productivity, \
     preferred_genre, volume_level, concentration_effect, has_disruptive_genre, \
     disruptive_genre_detail, calms_respondent";

/// Replace the whole table with the given rows, atomically.
///
/// Delete and inserts share one transaction, so a failed upload leaves
/// the previous dataset intact. Last upload wins.
pub async fn replace_all(pool: &SqlitePool, rows: &[SurveyResponse]) -> Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM survey_responses")
        .execute(&mut *tx)
        .await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO survey_responses
             (age, gender, listens_while_working, self_rated_productivity,
              preferred_genre, volume_level, concentration_effect,
              has_disruptive_genre, disruptive_genre_detail, calms_respondent)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.age)
        .bind(&row.gender)
        .bind(&row.listens_while_working)
        .bind(&row.self_rated_productivity)
        .bind(&row.preferred_genre)
        .bind(&row.volume_level)
        .bind(&row.concentration_effect)
        .bind(&row.has_disruptive_genre)
        .bind(&row.disruptive_genre_detail)
        .bind(&row.calms_respondent)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(rows.len() as u64)
}

/// Fetch rows matching the active equality filters (zero, one, or both)
pub async fn fetch_filtered(
    pool: &SqlitePool,
    gender: Option<&str>,
    listens_while_working: Option<&str>,
) -> Result<Vec<SurveyResponse>> {
    let mut sql = format!("SELECT {} FROM survey_responses", SELECT_COLUMNS);

    let mut predicates: Vec<&str> = Vec::new();
    if gender.is_some() {
        predicates.push("gender = ?");
    }
    if listens_while_working.is_some() {
        predicates.push("listens_while_working = ?");
    }
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    let mut query = sqlx::query_as::<_, SurveyResponse>(&sql);
    if let Some(value) = gender {
        query = query.bind(value);
    }
    if let Some(value) = listens_while_working {
        query = query.bind(value);
    }

    Ok(query.fetch_all(pool).await?)
}

/// Distinct gender values over the full (unfiltered) table
pub async fn distinct_genders(pool: &SqlitePool) -> Result<Vec<String>> {
    Ok(
        sqlx::query_scalar("SELECT DISTINCT gender FROM survey_responses")
            .fetch_all(pool)
            .await?,
    )
}

/// Distinct listens-while-working values over the full (unfiltered) table
pub async fn distinct_listening(pool: &SqlitePool) -> Result<Vec<String>> {
    Ok(sqlx::query_scalar(
        "SELECT DISTINCT listens_while_working FROM survey_responses",
    )
    .fetch_all(pool)
    .await?)
}

/// Delete all stored rows, returning how many were removed
pub async fn clear_all(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM survey_responses")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Total stored row count
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM survey_responses")
            .fetch_one(pool)
            .await?,
    )
}
