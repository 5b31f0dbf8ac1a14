//! Error type for `filings-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("report not found: {0}")]
  ReportNotFound(i64),

  #[error("annual report already registered for {stock_code} {report_year}")]
  DuplicateReport {
    stock_code:  String,
    report_year: i32,
  },

  /// Manual deletion refused while MDA extracts still reference the report.
  #[error("report {0} still has MDA extracts attached")]
  ReportInUse(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Constraint classification ───────────────────────────────────────────────

/// The constraint class behind a `SQLITE_CONSTRAINT` failure, recovered
/// from the extended result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
  Unique,
  ForeignKey,
}

pub(crate) fn constraint_kind(err: &tokio_rusqlite::Error) -> Option<ConstraintKind> {
  let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(code, _)) = err
  else {
    return None;
  };
  match code.extended_code {
    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => Some(ConstraintKind::Unique),
    rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(ConstraintKind::ForeignKey),
    _ => None,
  }
}
