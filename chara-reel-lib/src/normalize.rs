//! Convert a raw sheet export into the `videos.csv` layout.
//!
//! The export has an image column (one filename, or several separated by
//! `,` or `、`) and a link column. Each resolvable link is paired with every
//! image in the current group and written out as `image,link,alt,title`.

use std::path::{Path, PathBuf};

use chara_reel_core::csv::write_rows;
use chara_reel_core::{base_name, parse_rows, parse_video_id};
use serde_json::Value;

use crate::error::NormalizeError;

/// Raw export name inside the asset directory.
pub const SHEET_CSV: &str = "sheet.csv";
/// Optional column layout overrides inside the asset directory.
pub const NORMALIZE_CONFIG: &str = "normalize.config.json";

const OUTPUT_HEADER: [&str; 4] = ["image", "link", "alt", "title"];

/// Column layout of the raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// First row holds column titles
    pub header_row: bool,
    /// 0-based image column
    pub f_index: usize,
    /// 0-based link column
    pub g_index: usize,
    /// Keep the previous image group on rows whose image cell is blank
    pub carry_over: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            header_row: true,
            f_index: 0,
            g_index: 1,
            carry_over: false,
        }
    }
}

impl NormalizeConfig {
    /// Read `normalize.config.json`. Fields with the wrong type are ignored
    /// individually; a missing or unreadable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {}", path.display(), e);
                }
                return Self::default();
            }
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn from_value(value: &Value) -> Self {
        let mut cfg = Self::default();
        if let Some(b) = value.get("headerRow").and_then(Value::as_bool) {
            cfg.header_row = b;
        }
        if let Some(i) = value.get("fIndex").and_then(Value::as_u64) {
            cfg.f_index = i as usize;
        }
        if let Some(i) = value.get("gIndex").and_then(Value::as_u64) {
            cfg.g_index = i as usize;
        }
        if let Some(b) = value.get("carryOver").and_then(Value::as_bool) {
            cfg.carry_over = b;
        }
        cfg
    }
}

/// Outcome of a normalize run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Image/link pairs written
    pub rows: usize,
    /// Distinct images
    pub images: usize,
    pub output: PathBuf,
}

fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.trim()).unwrap_or("")
}

fn split_images(cell: &str) -> Vec<String> {
    cell.split([',', '、'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pair links with images, grouped by image in first-seen order.
///
/// Rows with fewer than two fields are ignored. A blank image cell clears the
/// current group unless `carry_over` is set. Links that do not resolve to a
/// video id are dropped; kept links are returned as written.
pub fn normalize_rows(rows: &[Vec<String>], cfg: &NormalizeConfig) -> Vec<(String, Vec<String>)> {
    let data = if cfg.header_row {
        rows.get(1..).unwrap_or_default()
    } else {
        rows
    };

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for row in data {
        if row.len() < 2 {
            continue;
        }
        let images = cell(row, cfg.f_index);
        let link = cell(row, cfg.g_index);

        if !images.is_empty() {
            current = split_images(images);
        } else if !cfg.carry_over {
            current.clear();
        }
        if current.is_empty() || link.is_empty() || parse_video_id(link).is_none() {
            continue;
        }

        for image in &current {
            match groups.iter_mut().find(|(name, _)| name == image) {
                Some((_, links)) => links.push(link.to_string()),
                None => groups.push((image.clone(), vec![link.to_string()])),
            }
        }
    }

    groups
}

/// Read `input`, normalize it and write `output`.
///
/// Column layout comes from `config_path` when that file exists.
pub fn normalize_sheet_csv(
    input: &Path,
    output: &Path,
    config_path: &Path,
) -> Result<NormalizeReport, NormalizeError> {
    let cfg = NormalizeConfig::load(config_path);
    let text = std::fs::read_to_string(input)?;
    let rows = parse_rows(&text);
    if rows.is_empty() {
        return Err(NormalizeError::EmptyInput(input.to_path_buf()));
    }

    let groups = normalize_rows(&rows, &cfg);
    let mut out_rows: Vec<[String; 4]> = vec![OUTPUT_HEADER.map(str::to_string)];
    for (image, links) in &groups {
        let alt = base_name(image);
        for link in links {
            out_rows.push([image.clone(), link.clone(), alt.to_string(), String::new()]);
        }
    }

    let csv = write_rows(&out_rows)?;
    std::fs::write(output, csv)?;

    Ok(NormalizeReport {
        rows: out_rows.len() - 1,
        images: groups.len(),
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
