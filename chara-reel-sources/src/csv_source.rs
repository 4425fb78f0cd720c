//! Published or local CSV source.
//!
//! A published sheet URL from `sheets.config.json` is preferred and fetched
//! fresh on every build; `videos.csv` in the asset directory is the fallback.

use std::collections::HashMap;

use chara_reel_core::{SourceMap, VideoRef, base_name, parse_table, parse_video_id};

use crate::client::check_status;
use crate::config::{LOCAL_CSV, SourcePaths, public_csv_url};
use crate::error::SourceError;
use crate::source::SourceKind;

/// Columns accepted as an explicit video id, in priority order.
const ID_COLUMNS: &[&str] = &["video_id", "videoid", "id"];
/// Columns accepted as a video link, in priority order.
const LINK_COLUMNS: &[&str] = &["link", "url"];

/// Download CSV text. Any non-2xx status is an error.
pub async fn fetch_csv_text(http: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let resp = http
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await?;
    let resp = check_status(resp).await?;
    Ok(resp.text().await?)
}

/// Load the CSV source: published URL first, then the local file.
///
/// Returns `None` when neither is available.
pub async fn load_csv_source(
    http: &reqwest::Client,
    paths: &SourcePaths,
) -> Option<(SourceKind, SourceMap)> {
    if let Some(url) = public_csv_url(paths) {
        match fetch_csv_text(http, &url).await {
            Ok(text) => {
                let table = parse_table(&text);
                log::debug!("Published CSV returned {} rows", table.records.len());
                return Some((SourceKind::PublishedCsv, records_to_source_map(&table.records)));
            }
            Err(e) => log::warn!("CSV fetch failed: {}", e),
        }
    }

    let path = paths.local_csv();
    match std::fs::read_to_string(&path) {
        Ok(text) if text.trim().is_empty() => {
            log::debug!("{} is empty", LOCAL_CSV);
            None
        }
        Ok(text) => {
            let table = parse_table(&text);
            Some((SourceKind::LocalCsv, records_to_source_map(&table.records)))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            None
        }
    }
}

fn first_non_empty<'a>(record: &'a HashMap<String, String>, columns: &[&str]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|c| record.get(*c))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

/// Build a source map from CSV records (already header-keyed and trimmed).
///
/// The key is the `base` column, or the base name of `image`. Ids come from
/// an explicit id column or are resolved from a link column. A non-empty
/// `alt` overrides earlier ones for the same base.
pub fn records_to_source_map(records: &[HashMap<String, String>]) -> SourceMap {
    let mut map = SourceMap::new();

    for record in records {
        let image = record.get("image").map(String::as_str).unwrap_or("");
        let base = match record.get("base").filter(|b| !b.is_empty()) {
            Some(b) => b.trim().to_string(),
            None => base_name(image).trim().to_string(),
        };
        if base.is_empty() {
            continue;
        }

        let video_id = first_non_empty(record, ID_COLUMNS)
            .map(str::to_string)
            .or_else(|| first_non_empty(record, LINK_COLUMNS).and_then(parse_video_id));
        let title = record.get("title").cloned().unwrap_or_default();

        let entry = map.entry(base).or_default();
        if let Some(alt) = record.get("alt").filter(|a| !a.is_empty()) {
            entry.alt = Some(alt.clone());
        }
        if let Some(id) = video_id {
            entry.videos.push(VideoRef::new(id).with_title(title));
        }
    }

    map
}

#[cfg(test)]
#[path = "tests/csv_source_tests.rs"]
mod tests;
