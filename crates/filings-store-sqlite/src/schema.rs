//! SQL schema for the filings SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS annual_reports (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    stock_code   TEXT NOT NULL,
    stock_name   TEXT,
    report_year  INTEGER NOT NULL,
    publish_date TEXT,    -- YYYY-MM-DD
    file_path    TEXT,
    created_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    UNIQUE (stock_code, report_year)
);

-- The foreign key carries no cascade clause: deleting a report is refused
-- while extracts still reference it.
CREATE TABLE IF NOT EXISTS annual_report_mda (
    id                    INTEGER PRIMARY KEY AUTOINCREMENT,
    report_id             INTEGER NOT NULL REFERENCES annual_reports(id),
    industry_section      TEXT,
    main_business_section TEXT,
    future_section        TEXT,
    full_mda              TEXT,
    created_at            TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

PRAGMA user_version = 1;
";
