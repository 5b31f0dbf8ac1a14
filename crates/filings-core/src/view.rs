//! Joined read models over reports and their extracts.

use serde::{Deserialize, Serialize};

use crate::{mda::MdaExtract, report::AnnualReport};

/// A report together with every extract recorded for it, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
  pub report:   AnnualReport,
  pub extracts: Vec<MdaExtract>,
}

/// One report/extract pair, as returned by the windowed digest reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestEntry {
  pub report:  AnnualReport,
  pub extract: MdaExtract,
}
