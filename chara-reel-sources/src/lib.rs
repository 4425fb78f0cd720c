//! Soft data sources for the manifest builder.
//!
//! Each adapter either produces a [`SourceMap`](chara_reel_core::SourceMap)
//! or reports that it has nothing to contribute. Failures are logged, never
//! propagated: a missing spreadsheet must not stop the gallery from building.

pub mod auth;
pub mod client;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod sheets;
pub mod sidecar;
pub mod source;

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod http_tests;

pub use client::http_client;
pub use config::{PublicCsvConfig, ServiceAccountKey, SheetsConfig, SourcePaths};
pub use csv_source::{fetch_csv_text, load_csv_source, records_to_source_map};
pub use error::SourceError;
pub use sheets::{load_service_account_sheet, rows_to_source_map};
pub use sidecar::{load_sidecar, sidecar_candidates};
pub use source::{Adapter, ResolvedSource, SourceContext, SourceKind, resolve_source_map};
