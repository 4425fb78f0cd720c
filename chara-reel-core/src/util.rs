/// Strip the last extension from a filename: `kuni_2.png` -> `kuni_2`.
///
/// This is the join key between scanned images, sidecar files and
/// spreadsheet/CSV rows, so every caller must go through this function.
/// Only the final `.ext` is removed, and a trailing dot is not an extension.
pub fn base_name(file: &str) -> &str {
    match file.rfind('.') {
        Some(idx) if idx + 1 < file.len() => &file[..idx],
        _ => file,
    }
}

/// Lowercased extension of a filename, if it has one.
pub fn extension_lower(file: &str) -> Option<String> {
    match file.rfind('.') {
        Some(idx) if idx + 1 < file.len() => Some(file[idx + 1..].to_lowercase()),
        _ => None,
    }
}
