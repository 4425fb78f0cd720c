//! Layering of per-image data from sidecars and the chosen source map.

use std::collections::HashSet;

use chara_reel_core::{SourceEntry, VideoRef};

/// Apply one layer on top of the current values.
///
/// Empty values never replace existing ones, so a layer cannot clear data
/// set by a lower layer.
fn overlay(alt: &mut String, videos: &mut Vec<VideoRef>, layer: &SourceEntry) {
    if let Some(a) = layer.alt.as_deref().filter(|a| !a.is_empty()) {
        *alt = a.to_string();
    }
    if !layer.videos.is_empty() {
        *videos = layer.videos.clone();
    }
}

/// Compute the final alt text and video list for one base name.
///
/// Layers, lowest first: the default (`alt` = base name, no videos), the
/// sidecar, then the source map entry. The result is deduplicated.
pub fn merge_character(
    base: &str,
    sidecar: Option<&SourceEntry>,
    source: Option<&SourceEntry>,
) -> (String, Vec<VideoRef>) {
    let mut alt = base.to_string();
    let mut videos = Vec::new();

    for layer in [sidecar, source].into_iter().flatten() {
        overlay(&mut alt, &mut videos, layer);
    }

    (alt, dedupe_videos(videos))
}

/// Trim ids and titles, drop blank ids, and keep the first occurrence of
/// each id.
pub fn dedupe_videos(videos: Vec<VideoRef>) -> Vec<VideoRef> {
    let mut seen = HashSet::new();
    videos
        .into_iter()
        .filter_map(|v| {
            let id = v.id.trim();
            if id.is_empty() || !seen.insert(id.to_string()) {
                return None;
            }
            Some(VideoRef {
                id: id.to_string(),
                title: v.title.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/merge_tests.rs"]
mod tests;
