//! Database models

use serde::{Deserialize, Serialize};

/// One answered survey form: ten free-text/categorical values.
///
/// Values are stored verbatim as uploaded; only `disruptive_genre_detail`
/// may be absent (the follow-up question is skipped unless the respondent
/// answered that some genre disrupts them).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SurveyResponse {
    pub age: String,
    pub gender: String,
    pub listens_while_working: String,
    pub self_rated_productivity: String,
    pub preferred_genre: String,
    pub volume_level: String,
    pub concentration_effect: String,
    pub has_disruptive_genre: String,
    pub disruptive_genre_detail: Option<String>,
    pub calms_respondent: String,
}
