//! Manifest build: scan, resolve sources, merge, write.

use std::path::{Path, PathBuf};

use chara_reel_core::{CharacterRecord, Manifest, SourceMap, base_name};
use chara_reel_sources::{SourceContext, SourceKind, http_client, load_sidecar, resolve_source_map};
use chrono::{SecondsFormat, Utc};

use crate::error::ManifestError;
use crate::merge::merge_character;
use crate::scanner::scan_character_images;
use crate::settings::Settings;

/// Summary of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Number of characters written
    pub characters: usize,
    /// Where the manifest landed
    pub output: PathBuf,
    /// Source map that won precedence, if any
    pub source: Option<SourceKind>,
}

/// Build one record per image, in the order given.
///
/// Sidecars are read from the asset directory; `sources` is the map chosen
/// by precedence for this build.
pub fn assemble_characters(
    settings: &Settings,
    images: &[String],
    sources: &SourceMap,
) -> Vec<CharacterRecord> {
    let asset_dir = settings.asset_path();
    images
        .iter()
        .map(|file| {
            let base = base_name(file);
            let sidecar = load_sidecar(&asset_dir, base);
            let (alt, videos) = merge_character(base, sidecar.as_ref(), sources.get(base));
            CharacterRecord {
                image: settings.image_url(file),
                alt,
                videos,
            }
        })
        .collect()
}

/// Run a full build and write the manifest.
pub async fn build_manifest(settings: &Settings) -> Result<BuildReport, ManifestError> {
    let asset_dir = settings.asset_path();
    let images = scan_character_images(&asset_dir).map_err(|source| ManifestError::Scan {
        path: asset_dir.clone(),
        source,
    })?;
    log::debug!("Found {} character images in {}", images.len(), asset_dir.display());

    let http = http_client(settings.http_timeout)?;
    let ctx = SourceContext::new(settings.source_paths(), http);
    let resolved = resolve_source_map(&ctx).await;

    let characters = assemble_characters(settings, &images, &resolved.map);
    let manifest = Manifest {
        generated_at: timestamp(),
        characters,
    };

    let output = settings.output_path();
    write_manifest(&manifest, &output)?;
    log::debug!(
        "Wrote manifest with {} characters -> {}",
        manifest.characters.len(),
        output.display()
    );

    Ok(BuildReport {
        characters: manifest.characters.len(),
        output,
        source: resolved.kind,
    })
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `<path>.tmp`, next to the target so the rename stays on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Serialize `manifest` as 2-space-indented JSON and atomically replace
/// `path` with it. Readers see either the old file or the new one.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<(), ManifestError> {
    let json = serde_json::to_string_pretty(manifest)?;
    let tmp = temp_path(path);

    std::fs::write(&tmp, json).map_err(|source| ManifestError::Write {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| {
        let _ = std::fs::remove_file(&tmp);
        ManifestError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/manifest_tests.rs"]
mod tests;
