//! Core types and trait definitions for the filings archive.
//!
//! This crate is deliberately free of database and CLI dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod mda;
pub mod report;
pub mod store;
pub mod view;
