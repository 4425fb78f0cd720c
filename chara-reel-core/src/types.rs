//! Manifest data model shared by the builder and the gallery page.
//!
//! Field names serialize in camelCase because the browser reads the manifest
//! as-is; see [`Manifest`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single video attached to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// Video platform identifier (not checked against the platform)
    pub id: String,
    /// Optional display title; empty when unknown
    #[serde(default)]
    pub title: String,
}

impl VideoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// One gallery entry, keyed by the image's base name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Path the page uses to load the image (e.g. `./assets/kuni_2.png`)
    pub image: String,
    /// Display text
    pub alt: String,
    /// Videos in source order, unique by `id`
    #[serde(default)]
    pub videos: Vec<VideoRef>,
}

/// The persisted artifact read by the gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// ISO-8601 UTC timestamp of the build
    pub generated_at: String,
    pub characters: Vec<CharacterRecord>,
}

/// What a single data source knows about one base name.
///
/// `alt` is `None` when the source has nothing to say about display text;
/// an empty `videos` list likewise means "no opinion", never "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceEntry {
    pub alt: Option<String>,
    pub videos: Vec<VideoRef>,
}

impl SourceEntry {
    /// True when overlaying this entry would change nothing.
    pub fn is_empty(&self) -> bool {
        self.alt.as_deref().is_none_or(str::is_empty) && self.videos.is_empty()
    }
}

/// Lookup table from base name to a source's overrides. Built once per
/// manifest build and discarded afterwards.
pub type SourceMap = HashMap<String, SourceEntry>;
