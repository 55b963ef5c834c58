//! CSV ingestion: parsing and header validation
//!
//! The survey export is semicolon-delimited UTF-8 with one header row.
//! Headers are whitespace-trimmed before matching; cell values are kept
//! verbatim. The upload is accepted when the required column set is a
//! subset of the columns present - extra columns are ignored.

use csv::{ReaderBuilder, Trim};
use surveyviz_common::db::SurveyResponse;
use surveyviz_common::{Error, Result};

/// The ten survey columns an upload must contain, verbatim from the
/// exported form (including the form's internal double spaces).
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Kāds ir jūsu vecums?",
    "Kāds ir jūsu dzimums?",
    "Vai tu klausies mūziku, kad mācies vai strādā?",
    "Kā tu vērtē savu produktivitāti mācību/darba laikā (bez mūzikas)?",
    "Kāda veida mūziku tu parasti  klausies mācību/darbu laikā?",
    "Cik skaļi tu klausies mūziku mācību/ darba laikā?",
    "Kā mūzikas klausīšanās ietekmē tavu koncentrēšanos?",
    "Vai ir kāds mūzikas žanrs, kas tev traucē mācībās/darbā?",
    "Ja uz iepriekšējo jautājumu atbildēji jā, tad kāds/kādi?",
    "Vai mūzikas klausīšanās tev palīdz justies mierīgākam?",
];

/// Index into [`REQUIRED_COLUMNS`] of the nullable follow-up column
const DETAIL_SLOT: usize = 8;

/// Parse a semicolon-delimited survey CSV into responses.
///
/// Fails when the content is not parseable CSV/UTF-8, when a required
/// column is missing, or when a data row has the wrong field count.
pub fn parse_survey_csv(data: &[u8]) -> Result<Vec<SurveyResponse>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(Trim::Headers)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| Error::InvalidInput(format!("failed to parse CSV header: {}", e)))?
        .clone();

    // Required set must be a subset of the present columns
    let mut positions = [0usize; 10];
    for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers.iter().position(|h| h == *required) {
            Some(i) => positions[slot] = i,
            None => {
                let found: Vec<&str> = headers.iter().collect();
                return Err(Error::InvalidInput(format!(
                    "invalid CSV format, found columns: {:?}",
                    found
                )));
            }
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| Error::InvalidInput(format!("failed to parse CSV row: {}", e)))?;

        let field = |slot: usize| -> Result<String> {
            record
                .get(positions[slot])
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidInput("row is missing required fields".to_string()))
        };

        // Empty cell in the skippable follow-up question becomes NULL
        let detail = record.get(positions[DETAIL_SLOT]).unwrap_or("");

        rows.push(SurveyResponse {
            age: field(0)?,
            gender: field(1)?,
            listens_while_working: field(2)?,
            self_rated_productivity: field(3)?,
            preferred_genre: field(4)?,
            volume_level: field(5)?,
            concentration_effect: field(6)?,
            has_disruptive_genre: field(7)?,
            disruptive_genre_detail: if detail.is_empty() {
                None
            } else {
                Some(detail.to_string())
            },
            calms_respondent: field(9)?,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_line() -> String {
        REQUIRED_COLUMNS.join(";")
    }

    #[test]
    fn test_parse_valid_csv() {
        let csv = format!(
            "{}\n19;Vīrietis;Jā;7;Roks;Vidēji;Palīdz;Nē;;Jā\n23;Sieviete;Nē;5;Klasika;Klusi;Traucē;Jā;Metāls;Nē\n",
            header_line()
        );

        let rows = parse_survey_csv(csv.as_bytes()).expect("valid CSV should parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].age, "19");
        assert_eq!(rows[0].gender, "Vīrietis");
        assert_eq!(rows[1].preferred_genre, "Klasika");
        assert_eq!(rows[1].disruptive_genre_detail.as_deref(), Some("Metāls"));
    }

    #[test]
    fn test_empty_detail_cell_becomes_none() {
        let csv = format!("{}\n19;Vīrietis;Jā;7;Roks;Vidēji;Palīdz;Nē;;Jā\n", header_line());

        let rows = parse_survey_csv(csv.as_bytes()).expect("valid CSV should parse");
        assert_eq!(rows[0].disruptive_genre_detail, None);
    }

    #[test]
    fn test_missing_required_column_rejected() {
        // Drop the last required column entirely
        let headers: Vec<&str> = REQUIRED_COLUMNS[..9].to_vec();
        let csv = format!("{}\n19;Vīrietis;Jā;7;Roks;Vidēji;Palīdz;Nē;\n", headers.join(";"));

        let err = parse_survey_csv(csv.as_bytes()).expect_err("missing column must be rejected");
        assert!(err.to_string().contains("found columns"));
    }

    #[test]
    fn test_extra_columns_accepted() {
        let csv = format!(
            "{};Laika zīmogs\n19;Vīrietis;Jā;7;Roks;Vidēji;Palīdz;Nē;;Jā;2024-01-01\n",
            header_line()
        );

        let rows = parse_survey_csv(csv.as_bytes()).expect("extra columns are ignored");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].calms_respondent, "Jā");
    }

    #[test]
    fn test_headers_trimmed_values_verbatim() {
        // Header carries stray whitespace, value carries meaningful whitespace
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers[0] = format!("  {}  ", headers[0]);
        let csv = format!(
            "{}\n 19 ;Vīrietis;Jā;7;Roks;Vidēji;Palīdz;Nē;;Jā\n",
            headers.join(";")
        );

        let rows = parse_survey_csv(csv.as_bytes()).expect("trimmed header should match");
        assert_eq!(rows[0].age, " 19 ");
    }

    #[test]
    fn test_ragged_row_rejected() {
        let csv = format!("{}\n19;Vīrietis;Jā\n", header_line());

        assert!(parse_survey_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let data = [0xff, 0xfe, 0x00, 0x41, 0x3b];

        assert!(parse_survey_csv(&data).is_err());
    }
}
