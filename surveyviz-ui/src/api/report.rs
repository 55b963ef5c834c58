//! Reporting view with aggregate charts
//!
//! GET /data loads the rows matching the optional equality filters and
//! renders two histograms and a pie chart inline as SVG. The filter
//! dropdowns are always populated from the full unfiltered table.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::error;

use crate::{charts, db, AppState};

/// Optional equality filters for the reporting view
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub gender: Option<String>,
    pub listens_while_working: Option<String>,
}

// Empty-state placeholders shown instead of charts when no row matches
const EMPTY_PRODUCTIVITY: &str = "Pameiģini velveinreiz";
const EMPTY_CONCENTRATION: &str = "Pameiģini velveinreiz X2";
const EMPTY_GENRES: &str = "Pameiģini velveinreiz x3";

/// GET /data
pub async fn view_data(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Html<String>, ReportError> {
    // An empty dropdown selection means "no filter"
    let gender = query.gender.as_deref().filter(|v| !v.is_empty());
    let listens = query.listens_while_working.as_deref().filter(|v| !v.is_empty());

    let rows = db::fetch_filtered(&state.db, gender, listens)
        .await
        .map_err(|e| ReportError::database(&e))?;

    let (productivity_plot, concentration_plot, genre_plot) = if rows.is_empty() {
        (
            EMPTY_PRODUCTIVITY.to_string(),
            EMPTY_CONCENTRATION.to_string(),
            EMPTY_GENRES.to_string(),
        )
    } else {
        let productivity: Vec<&str> = rows
            .iter()
            .map(|r| r.self_rated_productivity.as_str())
            .collect();
        let concentration: Vec<&str> = rows
            .iter()
            .map(|r| r.concentration_effect.as_str())
            .collect();
        let genres: Vec<&str> = rows.iter().map(|r| r.preferred_genre.as_str()).collect();

        (
            charts::histogram_svg("Produktivitātes vērtējums", &productivity)
                .map_err(|e| ReportError::chart(&e))?,
            charts::histogram_svg("Koncentrācijas ietekme", &concentration)
                .map_err(|e| ReportError::chart(&e))?,
            charts::pie_svg("Mūzikas žanru sadalījums", &genres)
                .map_err(|e| ReportError::chart(&e))?,
        )
    };

    // Dropdown options reflect the full table, never the filtered subset
    let genders = db::distinct_genders(&state.db)
        .await
        .map_err(|e| ReportError::database(&e))?;
    let listening = db::distinct_listening(&state.db)
        .await
        .map_err(|e| ReportError::database(&e))?;

    Ok(Html(render_page(
        &productivity_plot,
        &concentration_plot,
        &genre_plot,
        &options_markup(&genders, gender),
        &options_markup(&listening, listens),
    )))
}

/// Assemble the report page around the rendered chart fragments
fn render_page(
    productivity_plot: &str,
    concentration_plot: &str,
    genre_plot: &str,
    gender_options: &str,
    listening_options: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="lv">
<head>
  <meta charset="utf-8">
  <title>Aptaujas dati</title>
  <style>
    body {{ font-family: sans-serif; margin: 2em; }}
    .chart {{ margin: 1.5em 0; }}
    form {{ display: inline-block; margin-right: 1em; }}
    nav a {{ margin-right: 1em; }}
  </style>
</head>
<body>
  <nav><a href="/">Augšupielāde</a><a href="/secinajumi">Secinājumi</a></nav>
  <h1>Aptaujas dati</h1>
  <form method="get" action="/data">
    <label>Dzimums
      <select name="gender"><option value="">Visi</option>{gender_options}</select>
    </label>
    <label>Klausās mūziku strādājot
      <select name="listens_while_working"><option value="">Visi</option>{listening_options}</select>
    </label>
    <button type="submit">Filtrēt</button>
  </form>
  <form method="post" action="/clear_data">
    <button type="submit">Dzēst datus</button>
  </form>
  <div class="chart">{productivity_plot}</div>
  <div class="chart">{concentration_plot}</div>
  <div class="chart">{genre_plot}</div>
</body>
</html>
"#
    )
}

/// Build `<option>` markup, marking the active filter value as selected
fn options_markup(values: &[String], selected: Option<&str>) -> String {
    let mut markup = String::new();
    for value in values {
        let escaped = html_escape(value);
        let attr = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        markup.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            escaped, attr, escaped
        ));
    }
    markup
}

/// Minimal HTML escaping for values interpolated into the page
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Report errors
#[derive(Debug)]
pub enum ReportError {
    Database(String),
    Chart(String),
}

impl ReportError {
    fn database(e: &surveyviz_common::Error) -> Self {
        error!("Report query failed: {}", e);
        ReportError::Database(e.to_string())
    }

    fn chart(e: &surveyviz_common::Error) -> Self {
        error!("Chart rendering failed: {}", e);
        ReportError::Chart(e.to_string())
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        let message = match self {
            ReportError::Database(msg) => format!("Database error: {}", msg),
            ReportError::Chart(msg) => format!("Chart error: {}", msg),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"A&B"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_options_markup_marks_selection() {
        let values = vec!["Vīrietis".to_string(), "Sieviete".to_string()];
        let markup = options_markup(&values, Some("Sieviete"));

        assert!(markup.contains("<option value=\"Vīrietis\">Vīrietis</option>"));
        assert!(markup.contains("<option value=\"Sieviete\" selected>Sieviete</option>"));
    }

    #[test]
    fn test_options_markup_escapes_values() {
        let values = vec!["A&B".to_string()];
        let markup = options_markup(&values, None);

        assert!(markup.contains("value=\"A&amp;B\""));
    }
}
