//! Spreadsheet source authenticated with a service account.
//!
//! Reads two columns (image filename, video link) from a value range and
//! accumulates resolved video ids per base name.

use chara_reel_core::{SourceEntry, SourceMap, VideoRef, base_name, parse_video_id};
use serde::Deserialize;

use crate::auth::{SHEETS_READONLY_SCOPE, fetch_access_token};
use crate::client::check_status;
use crate::config::{SHEETS_SA_CONFIG, ServiceAccountKey, SheetsConfig, SourcePaths, read_json};
use crate::error::SourceError;

/// Response body of `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Fetch the configured range and build a source map from it.
///
/// Returns `Ok(None)` when no spreadsheet is configured.
pub async fn load_service_account_sheet(
    http: &reqwest::Client,
    paths: &SourcePaths,
) -> Result<Option<SourceMap>, SourceError> {
    let config: SheetsConfig = read_json(&paths.sheets_config())?;
    if config.spreadsheet_id.is_empty() {
        log::debug!("{} has no spreadsheetId", SHEETS_SA_CONFIG);
        return Ok(None);
    }

    let key: ServiceAccountKey = read_json(&paths.credentials(&config))?;
    let token = fetch_access_token(http, &key, SHEETS_READONLY_SCOPE).await?;

    let url = values_url(config.api_base(), &config.spreadsheet_id, &config.range())?;
    log::debug!("Fetching spreadsheet range {}", config.range());
    let resp = http.get(url).bearer_auth(token).send().await?;
    let resp = check_status(resp).await?;
    let body: ValueRange = resp.json().await?;

    let rows: Vec<Vec<String>> = body
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect();

    Ok(Some(rows_to_source_map(&rows, config.has_header_row())))
}

/// Build the values endpoint URL, percent-encoding id and range.
fn values_url(
    api_base: &str,
    spreadsheet_id: &str,
    range: &str,
) -> Result<reqwest::Url, SourceError> {
    let mut url = reqwest::Url::parse(api_base)
        .map_err(|e| SourceError::Config(format!("bad API URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| SourceError::Config("API URL cannot have path segments".to_string()))?
        .pop_if_empty()
        .extend([spreadsheet_id, "values", range]);
    url.query_pairs_mut().append_pair("majorDimension", "ROWS");
    Ok(url)
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Turn fetched rows into a source map.
///
/// Column 0 is the image filename and column 1 the video link. Rows with
/// either cell empty are skipped, and links that do not resolve add no video.
/// Every listed base gets its own name as `alt`.
pub fn rows_to_source_map(rows: &[Vec<String>], skip_header: bool) -> SourceMap {
    let mut map = SourceMap::new();
    let start = if skip_header { 1 } else { 0 };

    for row in rows.iter().skip(start) {
        let image = row.first().map(|s| s.trim()).unwrap_or("");
        let link = row.get(1).map(|s| s.trim()).unwrap_or("");
        if image.is_empty() || link.is_empty() {
            continue;
        }
        let base = base_name(image);
        let entry = map.entry(base.to_string()).or_insert_with(|| SourceEntry {
            alt: Some(base.to_string()),
            videos: Vec::new(),
        });
        if let Some(id) = parse_video_id(link) {
            entry.videos.push(VideoRef::new(id));
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_accumulate_per_base() {
        let data = rows(&[
            &["画像ファイル名", "動画リンク"],
            &["kuni_2.png", "https://youtu.be/dQw4w9WgXcQ"],
            &["kuni_2.png", "https://www.youtube.com/watch?v=aaaaaaaaaaa"],
            &["sloth.jpg", "bbbbbbbbbbb"],
        ]);
        let map = rows_to_source_map(&data, true);
        assert_eq!(map.len(), 2);
        let ids: Vec<&str> = map["kuni_2"].videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["dQw4w9WgXcQ", "aaaaaaaaaaa"]);
        assert_eq!(map["sloth"].alt.as_deref(), Some("sloth"));
        assert_eq!(map["kuni_2"].alt.as_deref(), Some("kuni_2"));
    }

    #[test]
    fn test_header_row_disabled() {
        let data = rows(&[&["a.png", "dQw4w9WgXcQ"]]);
        assert!(rows_to_source_map(&data, true).is_empty());
        assert_eq!(rows_to_source_map(&data, false)["a"].videos.len(), 1);
    }

    #[test]
    fn test_incomplete_rows_skipped() {
        let data = rows(&[
            &["header", "header"],
            &["a.png"],
            &["", "dQw4w9WgXcQ"],
            &["b.png", "   "],
            &[],
        ]);
        assert!(rows_to_source_map(&data, true).is_empty());
    }

    #[test]
    fn test_unresolvable_link_adds_no_video() {
        let data = rows(&[&["h", "h"], &["a.png", "not a link"]]);
        let map = rows_to_source_map(&data, true);
        assert!(map["a"].videos.is_empty());
    }

    #[test]
    fn test_values_url_encodes_range() {
        let url = values_url(crate::config::SHEETS_API, "abc123", "キャラ!F:G").unwrap();
        let s = url.as_str();
        assert!(s.starts_with("https://sheets.googleapis.com/v4/spreadsheets/abc123/values/"));
        assert!(s.ends_with("?majorDimension=ROWS"));
        assert!(!s.contains("キャラ"));
    }

    #[test]
    fn test_values_url_custom_base() {
        let url = values_url("http://127.0.0.1:9000/v4/spreadsheets/", "id", "A:B").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/v4/spreadsheets/id/values/A:B?majorDimension=ROWS"
        );
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(serde_json::json!("x")), "x");
        assert_eq!(cell_text(serde_json::json!(42)), "42");
        assert_eq!(cell_text(serde_json::Value::Null), "");
    }
}
