//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as UTC RFC 3339 strings in the exact shape the
//! schema's `created_at` default emits, so string comparison in SQL stays
//! chronological. Calendar dates are stored as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, Utc};
use filings_core::{mda::MdaExtract, report::AnnualReport};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Matches `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')` in the schema defaults.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from an `annual_reports` row.
pub struct RawReport {
  pub id:           i64,
  pub stock_code:   String,
  pub stock_name:   Option<String>,
  pub report_year:  i32,
  pub publish_date: Option<String>,
  pub file_path:    Option<String>,
  pub created_at:   String,
}

impl RawReport {
  /// Column order: id, stock_code, stock_name, report_year, publish_date,
  /// file_path, created_at.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Self::from_row_at(row, 0)
  }

  /// Same as [`from_row`](Self::from_row), with columns starting at `base`
  /// — used when the row is a join with other tables.
  pub fn from_row_at(row: &rusqlite::Row<'_>, base: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(base)?,
      stock_code:   row.get(base + 1)?,
      stock_name:   row.get(base + 2)?,
      report_year:  row.get(base + 3)?,
      publish_date: row.get(base + 4)?,
      file_path:    row.get(base + 5)?,
      created_at:   row.get(base + 6)?,
    })
  }

  pub fn into_report(self) -> Result<AnnualReport> {
    Ok(AnnualReport {
      id:           self.id,
      stock_code:   self.stock_code,
      stock_name:   self.stock_name,
      report_year:  self.report_year,
      publish_date: self.publish_date.as_deref().map(decode_date).transpose()?,
      file_path:    self.file_path,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw column values read directly from an `annual_report_mda` row.
pub struct RawExtract {
  pub id:                    i64,
  pub report_id:             i64,
  pub industry_section:      Option<String>,
  pub main_business_section: Option<String>,
  pub future_section:        Option<String>,
  pub full_mda:              Option<String>,
  pub created_at:            String,
}

impl RawExtract {
  /// Column order: id, report_id, industry_section, main_business_section,
  /// future_section, full_mda, created_at.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Self::from_row_at(row, 0)
  }

  pub fn from_row_at(row: &rusqlite::Row<'_>, base: usize) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                    row.get(base)?,
      report_id:             row.get(base + 1)?,
      industry_section:      row.get(base + 2)?,
      main_business_section: row.get(base + 3)?,
      future_section:        row.get(base + 4)?,
      full_mda:              row.get(base + 5)?,
      created_at:            row.get(base + 6)?,
    })
  }

  pub fn into_extract(self) -> Result<MdaExtract> {
    Ok(MdaExtract {
      id:                    self.id,
      report_id:             self.report_id,
      industry_section:      self.industry_section,
      main_business_section: self.main_business_section,
      future_section:        self.future_section,
      full_mda:              self.full_mda,
      created_at:            decode_dt(&self.created_at)?,
    })
  }
}
