//! MDA extracts — the text captured from a report's "Management Discussion
//! & Analysis" chapter.
//!
//! Every section is optional: extraction upstream is best-effort and often
//! finds only some of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured set of MDA sections. Several extracts may reference the
/// same report; the archive does not enforce one per report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdaExtract {
  pub id:                    i64,
  /// The [`AnnualReport`](crate::report::AnnualReport) this text belongs to.
  pub report_id:             i64,
  pub industry_section:      Option<String>,
  pub main_business_section: Option<String>,
  pub future_section:        Option<String>,
  /// The full chapter text the sections were cut from.
  pub full_mda:              Option<String>,
  pub created_at:            DateTime<Utc>,
}

/// Input to [`crate::store::ReportStore::record_extract`].
#[derive(Debug, Clone)]
pub struct NewMdaExtract {
  pub report_id:             i64,
  pub industry_section:      Option<String>,
  pub main_business_section: Option<String>,
  pub future_section:        Option<String>,
  pub full_mda:              Option<String>,
}

impl NewMdaExtract {
  /// Convenience constructor with every section unset.
  pub fn new(report_id: i64) -> Self {
    Self {
      report_id,
      industry_section:      None,
      main_business_section: None,
      future_section:        None,
      full_mda:              None,
    }
  }
}
