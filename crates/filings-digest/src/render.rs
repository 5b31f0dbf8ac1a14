//! Plain-text rendering of digest entries.
//!
//! One block per report: a header line with the company and filing
//! coordinates, then the management-overview and future-outlook excerpts.

use std::path::Path;

use filings_core::view::DigestEntry;

const RULE_WIDTH: usize = 68;
const NO_CONTENT: &str = "(no content extracted)";

/// Render a digest document: a labelled title line and one block per entry.
pub fn render_digest(range_label: &str, entries: &[DigestEntry]) -> String {
  let mut out = String::new();
  out.push_str(&format!("Annual report MDA digest ({range_label})\n"));
  out.push_str(&"=".repeat(RULE_WIDTH));
  out.push('\n');

  for entry in entries {
    out.push('\n');
    out.push_str(&header_line(entry));
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    push_section(
      &mut out,
      "Management overview (excerpt):",
      entry.extract.main_business_section.as_deref(),
    );
    out.push('\n');
    push_section(
      &mut out,
      "Future outlook (excerpt):",
      entry.extract.future_section.as_deref(),
    );
  }

  out
}

/// `600519 Kweichow Moutai | FY2024 | published 2025-03-28 | file x.pdf`
fn header_line(entry: &DigestEntry) -> String {
  let report = &entry.report;
  let mut header = format!(
    "{} {}",
    report.stock_code,
    report.stock_name.as_deref().unwrap_or("-"),
  );
  header.push_str(&format!(" | FY{}", report.report_year));
  if let Some(date) = report.publish_date {
    header.push_str(&format!(" | published {date}"));
  }
  if let Some(name) = file_name(report.file_path.as_deref()) {
    header.push_str(&format!(" | file {name}"));
  }
  header
}

/// File name component of the stored document path, capped so the header
/// stays on one line.
fn file_name(path: Option<&str>) -> Option<String> {
  let name = Path::new(path?).file_name()?.to_string_lossy().into_owned();
  if name.chars().count() > 42 {
    let head: String = name.chars().take(39).collect();
    Some(format!("{head}..."))
  } else {
    Some(name)
  }
}

fn push_section(out: &mut String, title: &str, text: Option<&str>) {
  out.push_str(title);
  out.push('\n');
  match text {
    Some(t) if !t.trim().is_empty() => {
      out.push_str(t.trim());
      out.push('\n');
    }
    _ => {
      out.push_str(NO_CONTENT);
      out.push('\n');
    }
  }
}
