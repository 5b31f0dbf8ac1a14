//! The incremental watermark — when the digest last ran.
//!
//! Stored as a tiny JSON file so a missed day is caught up on the next run:
//! the window always starts where the previous one ended.

use std::{fs, io, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateFile {
  last_run_at: DateTime<Utc>,
}

/// Read the watermark. Returns `None` when the file is missing or does not
/// parse (first run, or a hand-edited file) — the caller falls back to
/// midnight today.
pub fn load_last_run(path: &Path) -> Option<DateTime<Utc>> {
  let text = fs::read_to_string(path).ok()?;
  let state: StateFile = serde_json::from_str(&text).ok()?;
  Some(state.last_run_at)
}

/// Persist the watermark, creating parent directories as needed.
pub fn save_last_run(path: &Path, at: DateTime<Utc>) -> io::Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  let text = serde_json::to_string(&StateFile { last_run_at: at })?;
  fs::write(path, text)
}
