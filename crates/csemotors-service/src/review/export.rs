//! CSV rendering of review listings.

use chrono::{NaiveDate, SecondsFormat};
use serde::Serialize;

use csemotors_core::error::{AppError, ErrorKind};
use csemotors_core::result::AppResult;
use csemotors_entity::review::ReviewListing;

/// Column headings of the export, in order.
pub const CSV_HEADER: [&str; 10] = [
    "ID",
    "Title",
    "Rating",
    "Date",
    "Vehicle Make",
    "Vehicle Model",
    "Vehicle Year",
    "Reviewer Name",
    "Review Text",
    "Approved",
];

/// A rendered export ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvExport {
    /// Suggested download name.
    pub filename: String,
    /// Number of review rows (excluding the header).
    pub row_count: usize,
    /// The CSV document.
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// `reviews-export-YYYY-MM-DD.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("reviews-export-{}.csv", date.format("%Y-%m-%d"))
}

/// Render `rows` as an RFC 4180 document with a header line.
pub fn render_csv(rows: &[ReviewListing]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for row in rows {
        writer
            .write_record([
                row.review_id.to_string(),
                row.review_title.clone(),
                row.review_rating.to_string(),
                row.review_date.to_rfc3339_opts(SecondsFormat::Millis, true),
                row.inv_make.clone(),
                row.inv_model.clone(),
                row.inv_year.to_string(),
                row.reviewer_name(),
                flatten_newlines(&row.review_text),
                row.review_approved.to_string(),
            ])
            .map_err(csv_error)?;
    }

    writer.into_inner().map_err(|e| {
        AppError::serialization(format!("Failed to finish CSV export: {}", e.error()))
    })
}

fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Serialization,
        format!("Failed to write CSV export: {e}"),
        e,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use csemotors_core::types::{AccountId, ReviewId, VehicleId};

    use super::*;

    fn listing() -> ReviewListing {
        ReviewListing {
            review_id: ReviewId(12),
            inv_id: VehicleId(4),
            account_id: AccountId(9),
            review_title: "Loud, but \"fun\"".to_string(),
            review_text: "First line\nsecond line".to_string(),
            review_rating: 4,
            review_date: Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap(),
            review_approved: false,
            account_firstname: "Basic".to_string(),
            account_lastname: "Client".to_string(),
            inv_make: "Jeep".to_string(),
            inv_model: "Wrangler".to_string(),
            inv_year: 2019,
            inv_color: "Yellow".to_string(),
        }
    }

    #[test]
    fn test_header_only_when_no_rows() {
        let csv = String::from_utf8(render_csv(&[]).unwrap()).unwrap();
        assert_eq!(
            csv,
            "ID,Title,Rating,Date,Vehicle Make,Vehicle Model,Vehicle Year,Reviewer Name,Review Text,Approved\n"
        );
    }

    #[test]
    fn test_row_is_quoted_and_flattened() {
        let csv = String::from_utf8(render_csv(&[listing()]).unwrap()).unwrap();
        let line = csv.lines().nth(1).unwrap();
        assert_eq!(
            line,
            "12,\"Loud, but \"\"fun\"\"\",4,2024-03-09T14:30:00.000Z,Jeep,Wrangler,2019,Basic Client,First line second line,false"
        );
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_filename_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        assert_eq!(export_filename(date), "reviews-export-2024-07-04.csv");
    }
}
