//! Clear stored survey data

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info};

use crate::{db, AppState};

/// POST /clear_data
///
/// Unconditionally deletes all stored rows, then redirects to the report.
pub async fn clear_data(State(state): State<AppState>) -> Result<Redirect, ClearError> {
    match db::clear_all(&state.db).await {
        Ok(deleted) => {
            info!("Cleared {} survey responses", deleted);
            Ok(Redirect::to("/data"))
        }
        Err(e) => {
            error!("Failed to clear survey data: {}", e);
            Err(ClearError::Storage)
        }
    }
}

/// Clear errors - surfaced as a plain-text 400
#[derive(Debug)]
pub enum ClearError {
    Storage,
}

impl IntoResponse for ClearError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, "Failed to clear data.").into_response()
    }
}
