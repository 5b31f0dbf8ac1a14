//! [`SqliteStore`] — the SQLite implementation of [`ReportStore`].

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;

use filings_core::{
  mda::{MdaExtract, NewMdaExtract},
  report::{AnnualReport, NewAnnualReport},
  store::{ReportQuery, ReportStore},
  view::{DigestEntry, ReportView},
};

use crate::{
  Error, Result,
  encode::{RawExtract, RawReport, encode_date, encode_dt},
  error::{ConstraintKind, constraint_kind},
  schema::SCHEMA,
};

const REPORT_COLUMNS: &str =
  "id, stock_code, stock_name, report_year, publish_date, file_path, created_at";
const EXTRACT_COLUMNS: &str =
  "id, report_id, industry_section, main_business_section, future_section, full_mda, created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A filings archive backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ReportStore impl ────────────────────────────────────────────────────────

impl ReportStore for SqliteStore {
  type Error = Error;

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn register_report(&self, input: NewAnnualReport) -> Result<AnnualReport> {
    let NewAnnualReport {
      stock_code,
      stock_name,
      report_year,
      publish_date,
      file_path,
    } = input;
    let publish_str = publish_date.map(encode_date);
    let code_for_err = stock_code.clone();

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO annual_reports
             (stock_code, stock_name, report_year, publish_date, file_path)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![stock_code, stock_name, report_year, publish_str, file_path],
        )?;

        // Read the row back so the caller sees the engine-assigned id and
        // created_at default.
        let id = conn.last_insert_rowid();
        let raw = conn.query_row(
          &format!("SELECT {REPORT_COLUMNS} FROM annual_reports WHERE id = ?1"),
          rusqlite::params![id],
          RawReport::from_row,
        )?;
        Ok(raw)
      })
      .await
      .map_err(|e| match constraint_kind(&e) {
        Some(ConstraintKind::Unique) => Error::DuplicateReport {
          stock_code: code_for_err,
          report_year,
        },
        _ => Error::Database(e),
      })?;

    raw.into_report()
  }

  async fn get_report(&self, id: i64) -> Result<Option<AnnualReport>> {
    let raw: Option<RawReport> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {REPORT_COLUMNS} FROM annual_reports WHERE id = ?1"),
              rusqlite::params![id],
              RawReport::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReport::into_report).transpose()
  }

  async fn find_report(&self, stock_code: &str, report_year: i32) -> Result<Option<AnnualReport>> {
    let stock_code = stock_code.to_owned();

    let raw: Option<RawReport> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {REPORT_COLUMNS} FROM annual_reports
                 WHERE stock_code = ?1 AND report_year = ?2"
              ),
              rusqlite::params![stock_code, report_year],
              RawReport::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawReport::into_report).transpose()
  }

  async fn report_exists(&self, stock_code: &str, report_year: i32) -> Result<bool> {
    let stock_code = stock_code.to_owned();

    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM annual_reports WHERE stock_code = ?1 AND report_year = ?2",
              rusqlite::params![stock_code, report_year],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;

    Ok(exists)
  }

  async fn list_reports(&self, query: &ReportQuery) -> Result<Vec<AnnualReport>> {
    let stock_code = query.stock_code.clone();
    let report_year = query.report_year;
    let published_str = query.published_on.map(encode_date);
    // LIMIT -1 is SQLite for "unbounded".
    let limit_val = query.limit.map_or(-1, |l| l as i64);
    let offset_val = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawReport> = self
      .conn
      .call(move |conn| {
        let mut conds: Vec<&'static str> = vec![];
        if stock_code.is_some() {
          conds.push("stock_code = ?1");
        }
        if report_year.is_some() {
          conds.push("report_year = ?2");
        }
        if published_str.is_some() {
          conds.push("publish_date = ?3");
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {REPORT_COLUMNS} FROM annual_reports
           {where_clause}
           ORDER BY stock_code, report_year
           LIMIT ?4 OFFSET ?5"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![
              stock_code.as_deref(),
              report_year,
              published_str.as_deref(),
              limit_val,
              offset_val,
            ],
            RawReport::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReport::into_report).collect()
  }

  async fn delete_report(&self, id: i64) -> Result<()> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM annual_reports WHERE id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await
      .map_err(|e| match constraint_kind(&e) {
        Some(ConstraintKind::ForeignKey) => Error::ReportInUse(id),
        _ => Error::Database(e),
      })?;

    if deleted == 0 {
      return Err(Error::ReportNotFound(id));
    }
    Ok(())
  }

  // ── Extracts ──────────────────────────────────────────────────────────────

  async fn record_extract(&self, input: NewMdaExtract) -> Result<MdaExtract> {
    let NewMdaExtract {
      report_id,
      industry_section,
      main_business_section,
      future_section,
      full_mda,
    } = input;

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO annual_report_mda
             (report_id, industry_section, main_business_section, future_section, full_mda)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            report_id,
            industry_section,
            main_business_section,
            future_section,
            full_mda,
          ],
        )?;

        let id = conn.last_insert_rowid();
        let raw = conn.query_row(
          &format!("SELECT {EXTRACT_COLUMNS} FROM annual_report_mda WHERE id = ?1"),
          rusqlite::params![id],
          RawExtract::from_row,
        )?;
        Ok(raw)
      })
      .await
      .map_err(|e| match constraint_kind(&e) {
        Some(ConstraintKind::ForeignKey) => Error::ReportNotFound(report_id),
        _ => Error::Database(e),
      })?;

    raw.into_extract()
  }

  async fn extracts_for_report(&self, report_id: i64) -> Result<Vec<MdaExtract>> {
    let raws: Vec<RawExtract> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EXTRACT_COLUMNS} FROM annual_report_mda
           WHERE report_id = ?1
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![report_id], RawExtract::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawExtract::into_extract).collect()
  }

  // ── Joined reads ──────────────────────────────────────────────────────────

  async fn report_view(&self, id: i64) -> Result<Option<ReportView>> {
    let report = match self.get_report(id).await? {
      Some(r) => r,
      None => return Ok(None),
    };
    let extracts = self.extracts_for_report(id).await?;

    Ok(Some(ReportView { report, extracts }))
  }

  async fn extracts_recorded_between(
    &self,
    after: DateTime<Utc>,
    until: DateTime<Utc>,
  ) -> Result<Vec<DigestEntry>> {
    let after_str = encode_dt(after);
    let until_str = encode_dt(until);

    let raws: Vec<(RawReport, RawExtract)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             r.id, r.stock_code, r.stock_name, r.report_year, r.publish_date,
             r.file_path, r.created_at,
             m.id, m.report_id, m.industry_section, m.main_business_section,
             m.future_section, m.full_mda, m.created_at
           FROM annual_reports r
           JOIN annual_report_mda m ON m.report_id = r.id
           WHERE m.created_at > ?1 AND m.created_at <= ?2
           ORDER BY m.created_at, r.stock_code",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![after_str, until_str], |row| {
            Ok((RawReport::from_row_at(row, 0)?, RawExtract::from_row_at(row, 7)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(r, m)| {
        Ok(DigestEntry {
          report:  r.into_report()?,
          extract: m.into_extract()?,
        })
      })
      .collect()
  }

  async fn extracts_published_on(&self, date: NaiveDate) -> Result<Vec<DigestEntry>> {
    let date_str = encode_date(date);

    let raws: Vec<(RawReport, RawExtract)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT
             r.id, r.stock_code, r.stock_name, r.report_year, r.publish_date,
             r.file_path, r.created_at,
             m.id, m.report_id, m.industry_section, m.main_business_section,
             m.future_section, m.full_mda, m.created_at
           FROM annual_reports r
           JOIN annual_report_mda m ON m.report_id = r.id
           WHERE r.publish_date = ?1
           ORDER BY r.stock_code",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![date_str], |row| {
            Ok((RawReport::from_row_at(row, 0)?, RawExtract::from_row_at(row, 7)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|(r, m)| {
        Ok(DigestEntry {
          report:  r.into_report()?,
          extract: m.into_extract()?,
        })
      })
      .collect()
  }
}
