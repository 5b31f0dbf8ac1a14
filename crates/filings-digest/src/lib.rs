//! Daily digest generation for the filings archive.
//!
//! Fetches newly archived MDA extracts (by extract `created_at`, or by
//! report `publish_date` in manual mode) and renders them into a plain-text
//! summary file. The incremental window is bounded by a persisted watermark
//! so runs never miss or repeat an extract.

pub mod render;
pub mod state;

use std::path::PathBuf;

use serde::Deserialize;

/// Runtime configuration, deserialised from `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
  /// SQLite database file holding the archive.
  pub store_path: PathBuf,
  /// Directory the digest files are written to.
  pub output_dir: PathBuf,
  /// JSON file holding the incremental watermark.
  pub state_path: PathBuf,
}
