//! filings-digest binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite archive, fetches the MDA extracts archived since the last run (or
//! published on an explicit date), and writes a plain-text digest file.
//!
//! Incremental runs advance a watermark stored next to the data, so an
//! extract archived between two runs always lands in exactly one digest.

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};
use clap::Parser;
use filings_core::{store::ReportStore, view::DigestEntry};
use filings_digest::{DigestConfig, render::render_digest, state};
use filings_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  author,
  version,
  about = "Daily digest of newly archived annual-report MDA extracts"
)]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Digest reports published on this date instead of the incremental
  /// window. Does not advance the watermark.
  #[arg(long, value_name = "YYYY-MM-DD")]
  date: Option<NaiveDate>,

  /// Start the incremental window at local midnight instead of the stored
  /// watermark.
  #[arg(long, conflicts_with = "date")]
  today_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("FILINGS"))
    .build()
    .context("failed to read config file")?;

  let cfg: DigestConfig = settings
    .try_deserialize()
    .context("failed to deserialise DigestConfig")?;

  // Open the archive.
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  match cli.date {
    Some(date) => run_publish_date(&store, &cfg, date).await,
    None => run_incremental(&store, &cfg, cli.today_only).await,
  }
}

/// Manual mode: digest every report disclosed on `date`. The watermark is
/// left untouched so the next incremental run is unaffected.
async fn run_publish_date(
  store: &SqliteStore,
  cfg: &DigestConfig,
  date: NaiveDate,
) -> anyhow::Result<()> {
  let entries = store.extracts_published_on(date).await?;
  if entries.is_empty() {
    tracing::info!("no reports published on {date}, nothing to render");
    return Ok(());
  }

  let out_path = write_digest(cfg, &date.to_string(), &date.to_string(), &entries)?;
  tracing::info!(
    "wrote digest of {} reports to {}",
    entries.len(),
    out_path.display()
  );
  Ok(())
}

/// Incremental mode: digest extracts archived in `(window start, now]`,
/// then advance the watermark to `now`. The watermark advances even when
/// the window was empty, so the next run does not rescan it.
async fn run_incremental(
  store: &SqliteStore,
  cfg: &DigestConfig,
  today_only: bool,
) -> anyhow::Result<()> {
  let now = Utc::now();
  let watermark = if today_only {
    None
  } else {
    state::load_last_run(&cfg.state_path)
  };
  let start = watermark.unwrap_or_else(start_of_today);

  let entries = store.extracts_recorded_between(start, now).await?;
  if entries.is_empty() {
    tracing::info!("no extracts archived since {start}, nothing to render");
  } else {
    let label = format!(
      "{} ~ {}",
      start.format("%Y-%m-%d %H:%M:%S"),
      now.format("%Y-%m-%d %H:%M:%S")
    );
    let file_date = Local::now().date_naive().to_string();
    let out_path = write_digest(cfg, &file_date, &label, &entries)?;
    tracing::info!(
      "wrote digest of {} extracts to {}",
      entries.len(),
      out_path.display()
    );
  }

  state::save_last_run(&cfg.state_path, now)
    .with_context(|| format!("failed to persist watermark at {:?}", cfg.state_path))?;
  Ok(())
}

fn write_digest(
  cfg: &DigestConfig,
  file_date: &str,
  label: &str,
  entries: &[DigestEntry],
) -> anyhow::Result<PathBuf> {
  fs::create_dir_all(&cfg.output_dir)
    .with_context(|| format!("failed to create output dir {:?}", cfg.output_dir))?;

  let out_path = cfg
    .output_dir
    .join(format!("annual_report_summary_{file_date}.txt"));
  fs::write(&out_path, render_digest(label, entries))
    .with_context(|| format!("failed to write digest to {out_path:?}"))?;
  Ok(out_path)
}

/// Local midnight today, in UTC. Falls back to the current instant in the
/// pathological case of a DST transition removing midnight.
fn start_of_today() -> DateTime<Utc> {
  let midnight = Local::now().date_naive().and_time(NaiveTime::MIN);
  match midnight.and_local_timezone(Local) {
    chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => {
      dt.with_timezone(&Utc)
    }
    chrono::LocalResult::None => Utc::now(),
  }
}

#[cfg(test)]
mod tests {
  use filings_core::{mda::NewMdaExtract, report::NewAnnualReport};

  use super::*;

  fn test_cfg(dir: &std::path::Path) -> DigestConfig {
    DigestConfig {
      store_path: dir.join("filings.db"),
      output_dir: dir.join("report"),
      state_path: dir.join("state/last_run.json"),
    }
  }

  /// One report (published 2025-03-28) with one extract.
  async fn seeded_store(cfg: &DigestConfig) -> SqliteStore {
    let store = SqliteStore::open(&cfg.store_path).await.unwrap();
    let report = store
      .register_report(NewAnnualReport {
        stock_code:   "600519".into(),
        stock_name:   Some("Kweichow Moutai".into()),
        report_year:  2024,
        publish_date: NaiveDate::from_ymd_opt(2025, 3, 28),
        file_path:    None,
      })
      .await
      .unwrap();
    store.record_extract(NewMdaExtract::new(report.id)).await.unwrap();
    store
  }

  #[tokio::test]
  async fn incremental_run_writes_digest_and_advances_watermark() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_cfg(dir.path());
    let store = seeded_store(&cfg).await;

    let before = Utc::now();
    run_incremental(&store, &cfg, false).await.unwrap();

    let watermark = state::load_last_run(&cfg.state_path).unwrap();
    assert!(watermark >= before);

    let files: Vec<_> = fs::read_dir(&cfg.output_dir).unwrap().collect();
    assert_eq!(files.len(), 1);
  }

  #[tokio::test]
  async fn empty_incremental_run_still_advances_watermark() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_cfg(dir.path());
    let store = SqliteStore::open(&cfg.store_path).await.unwrap();

    run_incremental(&store, &cfg, false).await.unwrap();

    assert!(state::load_last_run(&cfg.state_path).is_some());
    // Nothing to render, so no output directory either.
    assert!(!cfg.output_dir.exists());
  }

  #[tokio::test]
  async fn incremental_runs_do_not_repeat_extracts() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_cfg(dir.path());
    let store = seeded_store(&cfg).await;

    run_incremental(&store, &cfg, false).await.unwrap();
    fs::remove_dir_all(&cfg.output_dir).unwrap();

    // The extract now sits below the watermark, so the second run renders
    // nothing.
    run_incremental(&store, &cfg, false).await.unwrap();
    assert!(!cfg.output_dir.exists());
  }

  #[tokio::test]
  async fn publish_date_mode_leaves_watermark_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_cfg(dir.path());
    let store = seeded_store(&cfg).await;

    let date = NaiveDate::from_ymd_opt(2025, 3, 28).unwrap();
    run_publish_date(&store, &cfg, date).await.unwrap();

    assert!(state::load_last_run(&cfg.state_path).is_none());
    assert!(
      cfg
        .output_dir
        .join("annual_report_summary_2025-03-28.txt")
        .exists()
    );
  }

  #[tokio::test]
  async fn publish_date_mode_skips_other_dates() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = test_cfg(dir.path());
    let store = seeded_store(&cfg).await;

    let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    run_publish_date(&store, &cfg, date).await.unwrap();

    assert!(!cfg.output_dir.exists());
  }
}
