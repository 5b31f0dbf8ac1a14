//! The `ReportStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `filings-store-sqlite`). Higher layers (`filings-digest`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
  mda::{MdaExtract, NewMdaExtract},
  report::{AnnualReport, NewAnnualReport},
  view::{DigestEntry, ReportView},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ReportStore::list_reports`].
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
  /// Restrict to a single company.
  pub stock_code:   Option<String>,
  /// Restrict to a single fiscal year.
  pub report_year:  Option<i32>,
  /// Restrict to reports disclosed on a specific date.
  pub published_on: Option<NaiveDate>,
  pub limit:        Option<usize>,
  pub offset:       Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a filings archive backend.
///
/// Reports are written once per (company, year) and extracts appended after
/// ingestion; neither table has update semantics. Deletion is a manual
/// operation, refused while extracts still reference the report.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ReportStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Register an annual report. `id` and `created_at` are assigned by the
  /// store. Registering the same (stock_code, report_year) twice is an
  /// error.
  fn register_report(
    &self,
    input: NewAnnualReport,
  ) -> impl Future<Output = Result<AnnualReport, Self::Error>> + Send + '_;

  /// Retrieve a report by id. Returns `None` if not found.
  fn get_report(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AnnualReport>, Self::Error>> + Send + '_;

  /// Retrieve a report by its natural key.
  fn find_report<'a>(
    &'a self,
    stock_code: &'a str,
    report_year: i32,
  ) -> impl Future<Output = Result<Option<AnnualReport>, Self::Error>> + Send + 'a;

  /// Ingest-side dedupe check: has (stock_code, report_year) already been
  /// registered?
  fn report_exists<'a>(
    &'a self,
    stock_code: &'a str,
    report_year: i32,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// List reports matching `query`, ordered by (stock_code, report_year).
  fn list_reports<'a>(
    &'a self,
    query: &'a ReportQuery,
  ) -> impl Future<Output = Result<Vec<AnnualReport>, Self::Error>> + Send + 'a;

  /// Manually delete a report.
  ///
  /// Fails while extracts still reference it; errors if `id` is unknown.
  fn delete_report(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Extracts ──────────────────────────────────────────────────────────

  /// Record an MDA extract for an existing report. `id` and `created_at`
  /// are assigned by the store.
  fn record_extract(
    &self,
    input: NewMdaExtract,
  ) -> impl Future<Output = Result<MdaExtract, Self::Error>> + Send + '_;

  /// All extracts recorded for a report, oldest first.
  fn extracts_for_report(
    &self,
    report_id: i64,
  ) -> impl Future<Output = Result<Vec<MdaExtract>, Self::Error>> + Send + '_;

  // ── Joined reads ──────────────────────────────────────────────────────

  /// A report together with every extract recorded for it. Returns `None`
  /// if the report does not exist.
  fn report_view(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<ReportView>, Self::Error>> + Send + '_;

  /// Report/extract pairs whose extract was recorded in `(after, until]`,
  /// ordered by extract `created_at` then stock code. Drives the
  /// incremental digest.
  fn extracts_recorded_between(
    &self,
    after: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<DigestEntry>, Self::Error>> + Send + '_;

  /// Report/extract pairs for reports disclosed on `date`, ordered by
  /// stock code.
  fn extracts_published_on(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Vec<DigestEntry>, Self::Error>> + Send + '_;
}
