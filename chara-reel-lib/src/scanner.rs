//! Asset directory scanner.
//!
//! Finds character images in the asset directory, skipping page decoration
//! (banners, backgrounds, logos, footers) that lives in the same folder.

use std::path::Path;

use chara_reel_core::compare_ja;
use chara_reel_core::util::extension_lower;

/// File extensions treated as character images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

/// How an exclusion pattern is matched against a lowercased filename.
#[derive(Debug, Clone, Copy)]
enum Exclusion {
    Contains(&'static str),
    Prefix(&'static str),
}

/// Non-character assets. Patterns are lowercase and matched case-insensitively.
const EXCLUSIONS: &[Exclusion] = &[
    Exclusion::Contains("channels4_banner"),
    Exclusion::Contains("background_yonewaits_3_5"),
    Exclusion::Prefix("background"),
    Exclusion::Prefix("sloth_logo"),
    Exclusion::Contains("footer_img"),
];

/// True if the filename is page decoration rather than a character.
pub fn is_excluded(file: &str) -> bool {
    let lower = file.to_lowercase();
    EXCLUSIONS.iter().any(|rule| match rule {
        Exclusion::Contains(p) => lower.contains(p),
        Exclusion::Prefix(p) => lower.starts_with(p),
    })
}

/// True if the filename has a recognized image extension.
pub fn is_image(file: &str) -> bool {
    extension_lower(file).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List character image filenames in `dir`, sorted for display.
///
/// Only regular files at the top level are considered; names that are not
/// valid UTF-8 are skipped.
pub fn scan_character_images(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut images: Vec<String> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            log::debug!("Skipping non-UTF-8 filename in {}", dir.display());
            continue;
        };
        if is_image(&name) && !is_excluded(&name) {
            images.push(name);
        }
    }

    images.sort_by(|a, b| compare_ja(a, b));
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_excluded() {
        assert!(is_excluded("channels4_banner.png"));
        assert!(is_excluded("my_Channels4_Banner_v2.jpg"));
        assert!(is_excluded("Background.png"));
        assert!(is_excluded("background_yonewaits_3_5.webp"));
        assert!(is_excluded("sloth_logo_white.svg"));
        assert!(is_excluded("site_footer_img.png"));
        assert!(!is_excluded("my_background.png"));
        assert!(!is_excluded("kuni_2.png"));
        assert!(!is_excluded("big_sloth_logo.png"));
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("a.PNG"));
        assert!(is_image("a.jpeg"));
        assert!(is_image("a.svg"));
        assert!(!is_image("a.json"));
        assert!(!is_image("a.videos.json"));
        assert!(!is_image("png"));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "b.jpg",
            "a.png",
            "channels4_banner.png",
            "a.json",
            "videos.csv",
            "background.png",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.png")).unwrap();

        let images = scan_character_images(dir.path()).unwrap();
        assert_eq!(images, vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_character_images(&dir.path().join("missing")).is_err());
    }
}
