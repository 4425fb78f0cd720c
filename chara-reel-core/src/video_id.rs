//! Video link resolution.
//!
//! The gallery page carries its own copy of these rules for the mini player,
//! so any change here must be mirrored there: the same input has to resolve
//! to the same id on both sides.

use url::Url;

/// Length of a bare video id.
const VIDEO_ID_LEN: usize = 11;

/// True if `s` looks like a bare video id (11 chars of `[A-Za-z0-9_-]`).
pub fn is_bare_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Extract a video id from a bare id or a known link shape.
///
/// Accepted inputs:
/// - `dQw4w9WgXcQ`
/// - `https://youtu.be/dQw4w9WgXcQ`
/// - `https://www.youtube.com/watch?v=dQw4w9WgXcQ`
/// - `https://www.youtube.com/shorts/dQw4w9WgXcQ`
/// - `https://www.youtube.com/embed/dQw4w9WgXcQ`
///
/// Returns `None` for anything else, including text that is not a URL.
pub fn parse_video_id(input: &str) -> Option<String> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if is_bare_id(s) {
        return Some(s.to_string());
    }

    let url = Url::parse(s).ok()?;
    let host = url.host_str()?;
    let path = url.path();

    let id = if host == "youtu.be" {
        path.strip_prefix('/')
            .unwrap_or(path)
            .chars()
            .take(VIDEO_ID_LEN)
            .collect::<String>()
    } else if host.contains("youtube.com") {
        if path.starts_with("/watch") {
            url.query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.into_owned())?
        } else if path.starts_with("/shorts/") {
            path.split('/').nth(2)?.to_string()
        } else {
            let mut parts = path.split('/');
            parts.find(|p| *p == "embed")?;
            parts.next()?.to_string()
        }
    } else {
        return None;
    };

    if id.is_empty() { None } else { Some(id) }
}

/// Same as [`parse_video_id`], but with the empty string standing in for
/// "not a video link".
pub fn resolve_video_id(input: &str) -> String {
    parse_video_id(input).unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/video_id_tests.rs"]
mod tests;
