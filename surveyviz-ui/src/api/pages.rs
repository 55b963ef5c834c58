//! Static UI pages
//!
//! The upload form and the conclusions page carry no data, so they are
//! compiled in and served as-is.

use axum::response::Html;

const UPLOAD_HTML: &str = include_str!("../ui/upload.html");
const CONCLUSIONS_HTML: &str = include_str!("../ui/secinajumi.html");

/// GET /
///
/// Serves the upload form
pub async fn upload_form() -> Html<&'static str> {
    Html(UPLOAD_HTML)
}

/// GET/POST /secinajumi
///
/// Serves the static conclusions page; no data interaction
pub async fn conclusions_page() -> Html<&'static str> {
    Html(CONCLUSIONS_HTML)
}
