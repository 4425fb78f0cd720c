//! Per-image sidecar JSON files.
//!
//! `<base>.videos.json` is tried before `<base>.json`. The first candidate
//! that parses (other than `null`) ends the lookup, even when it is not an
//! object; a non-object sidecar contributes nothing.

use std::path::{Path, PathBuf};

use chara_reel_core::{SourceEntry, VideoRef};
use serde_json::Value;

/// Candidate sidecar paths for a base name, in lookup order.
pub fn sidecar_candidates(dir: &Path, base: &str) -> [PathBuf; 2] {
    [
        dir.join(format!("{base}.videos.json")),
        dir.join(format!("{base}.json")),
    ]
}

/// Load fallback metadata for one image, if a usable sidecar exists.
///
/// Videos are returned exactly as listed (duplicates included); ids and
/// titles that are numbers are stringified, anything else becomes empty.
pub fn load_sidecar(dir: &Path, base: &str) -> Option<SourceEntry> {
    sidecar_candidates(dir, base)
        .iter()
        .find_map(|path| read_sidecar(path))
}

fn read_sidecar(path: &Path) -> Option<SourceEntry> {
    let content = std::fs::read_to_string(path).ok()?;
    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("Ignoring malformed sidecar {}: {}", path.display(), e);
            return None;
        }
    };
    let obj = match value {
        Value::Object(obj) => obj,
        Value::Null => return None,
        _ => {
            log::warn!("Sidecar {} is not a JSON object", path.display());
            return Some(SourceEntry::default());
        }
    };

    let alt = obj
        .get("alt")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let videos = match obj.get("videos") {
        Some(Value::Array(items)) => items.iter().map(sidecar_video).collect(),
        _ => Vec::new(),
    };

    log::debug!("Loaded sidecar {}", path.display());
    Some(SourceEntry { alt, videos })
}

fn sidecar_video(item: &Value) -> VideoRef {
    VideoRef {
        id: scalar_text(item.get("id")),
        title: scalar_text(item.get("title")),
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
