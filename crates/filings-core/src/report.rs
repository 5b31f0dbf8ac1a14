//! Annual report metadata — one row per company per fiscal year.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered annual report.
///
/// `id` and `created_at` are assigned by the store on registration and never
/// change afterwards. The (stock_code, report_year) pair is unique across
/// the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualReport {
  pub id:           i64,
  /// Exchange ticker of the listed company.
  pub stock_code:   String,
  pub stock_name:   Option<String>,
  pub report_year:  i32,
  /// The date the report was disclosed, if known.
  pub publish_date: Option<NaiveDate>,
  /// Where the source document was saved, if it was kept.
  pub file_path:    Option<String>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ReportStore::register_report`].
#[derive(Debug, Clone)]
pub struct NewAnnualReport {
  pub stock_code:   String,
  pub stock_name:   Option<String>,
  pub report_year:  i32,
  pub publish_date: Option<NaiveDate>,
  pub file_path:    Option<String>,
}

impl NewAnnualReport {
  /// Convenience constructor with all optional fields unset.
  pub fn new(stock_code: impl Into<String>, report_year: i32) -> Self {
    Self {
      stock_code:   stock_code.into(),
      stock_name:   None,
      report_year,
      publish_date: None,
      file_path:    None,
    }
  }
}
