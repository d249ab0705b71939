//! Folder hygiene reporting for a Downloads-style directory.
//!
//! Three binaries share this library, and all of them run the same
//! pipeline: scan a folder tree into per-file records, aggregate
//! statistics, render a report.
//!
//! - [`core::scanner`] walks the tree and emits [`models::record::FileRecord`]s.
//! - [`core::analyzer`] derives statistics from a record set, pure and
//!   filesystem-free.
//! - [`export`] renders the weekly-review Markdown, the CSV census, and
//!   the census summary.

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod models;
