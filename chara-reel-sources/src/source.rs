//! Source precedence.
//!
//! Adapters are tried in a fixed order and the first one that yields a
//! non-empty map wins. Sidecars are not part of this list: they are per-image
//! fallbacks applied underneath whichever map wins here.

use chara_reel_core::SourceMap;

use crate::config::{SHEETS_SA_CONFIG, SourcePaths};
use crate::csv_source::load_csv_source;
use crate::sheets::load_service_account_sheet;

/// Where a source map came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Spreadsheet read with a service account
    ServiceAccountSheet,
    /// CSV fetched from a published URL
    PublishedCsv,
    /// `videos.csv` in the asset directory
    LocalCsv,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::ServiceAccountSheet => write!(f, "spreadsheet (service account)"),
            SourceKind::PublishedCsv => write!(f, "published CSV"),
            SourceKind::LocalCsv => write!(f, "local CSV"),
        }
    }
}

/// One step in the precedence chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adapter {
    ServiceAccountSheet,
    Csv,
}

/// Highest priority first.
pub const PRECEDENCE: [Adapter; 2] = [Adapter::ServiceAccountSheet, Adapter::Csv];

/// Everything an adapter needs: file locations and the shared HTTP client.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub paths: SourcePaths,
    pub http: reqwest::Client,
}

impl SourceContext {
    pub fn new(paths: SourcePaths, http: reqwest::Client) -> Self {
        Self { paths, http }
    }
}

impl Adapter {
    /// Run this adapter. `None` means "nothing to contribute", whatever the
    /// reason; failures are logged here and go no further.
    pub async fn load(self, ctx: &SourceContext) -> Option<(SourceKind, SourceMap)> {
        match self {
            Adapter::ServiceAccountSheet => {
                match load_service_account_sheet(&ctx.http, &ctx.paths).await {
                    Ok(Some(map)) => Some((SourceKind::ServiceAccountSheet, map)),
                    Ok(None) => None,
                    Err(e) if e.is_not_found() => {
                        log::debug!("Service-account sheet skipped: {}", e);
                        None
                    }
                    Err(e) => {
                        log::warn!("Service-account sheet ({}) skipped: {}", SHEETS_SA_CONFIG, e);
                        None
                    }
                }
            }
            Adapter::Csv => load_csv_source(&ctx.http, &ctx.paths).await,
        }
    }
}

/// The map chosen for a build, and where it came from.
#[derive(Debug, Clone, Default)]
pub struct ResolvedSource {
    pub kind: Option<SourceKind>,
    pub map: SourceMap,
}

/// Try each adapter in [`PRECEDENCE`] order and keep the first non-empty map.
pub async fn resolve_source_map(ctx: &SourceContext) -> ResolvedSource {
    for adapter in PRECEDENCE {
        if let Some((kind, map)) = adapter.load(ctx).await {
            if !map.is_empty() {
                log::debug!("Using {} ({} entries)", kind, map.len());
                return ResolvedSource {
                    kind: Some(kind),
                    map,
                };
            }
            log::debug!("{} produced no entries", kind);
        }
    }
    ResolvedSource::default()
}
