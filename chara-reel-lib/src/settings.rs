//! Project settings (asset directory, output file, timeouts).
//!
//! Resolution order, highest first:
//! 1. CLI flags (applied by the caller on top of the loaded value)
//! 2. an explicit `--config` file, or `chara-reel.toml` in the project root
//! 3. `~/.config/chara-reel/settings.toml`
//! 4. built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::SettingsError;

/// Project-local settings file name.
pub const PROJECT_SETTINGS_FILE: &str = "chara-reel.toml";

const DEFAULT_ASSET_DIR: &str = "SWC_youtube_project";
const DEFAULT_OUTPUT: &str = "manifest.json";

/// Resolved settings for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory relative paths are resolved against
    pub project_root: PathBuf,
    /// Asset directory, relative to `project_root` unless absolute
    pub asset_dir: PathBuf,
    /// Manifest file name inside the asset directory
    pub output_file: String,
    /// Prefix prepended to image filenames in the manifest
    pub image_prefix: String,
    pub http_timeout: Duration,
    pub debounce: Duration,
    pub cooldown: Duration,
    pub poll_interval: Duration,
    /// Set once a settings file names `image_prefix`; the prefix then no
    /// longer follows the asset directory.
    prefix_pinned: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    assets: AssetsSection,
    http: HttpSection,
    watch: WatchSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AssetsSection {
    dir: Option<PathBuf>,
    output: Option<String>,
    image_prefix: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HttpSection {
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WatchSection {
    debounce_ms: Option<u64>,
    cooldown_ms: Option<u64>,
    poll_secs: Option<u64>,
}

impl Settings {
    /// Built-in defaults for a project root.
    pub fn defaults(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            output_file: DEFAULT_OUTPUT.to_string(),
            image_prefix: default_prefix(Path::new(DEFAULT_ASSET_DIR)),
            http_timeout: Duration::from_secs(30),
            debounce: Duration::from_millis(200),
            cooldown: Duration::from_millis(500),
            poll_interval: Duration::from_secs(30),
            prefix_pinned: false,
        }
    }

    /// Load settings for `project_root`, following the resolution order above.
    ///
    /// A missing file is not an error; a file that exists but cannot be
    /// parsed is.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_layers(project_root, global_settings_path().as_deref(), explicit)
    }

    fn load_layers(
        project_root: &Path,
        global: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<Self, SettingsError> {
        let mut settings = Self::defaults(project_root);

        if let Some(global) = global.filter(|g| g.is_file()) {
            settings.apply(read_settings_file(global)?);
        }

        match explicit {
            Some(path) => settings.apply(read_settings_file(path)?),
            None => {
                let local = project_root.join(PROJECT_SETTINGS_FILE);
                if local.is_file() {
                    settings.apply(read_settings_file(&local)?);
                }
            }
        }

        Ok(settings)
    }

    fn apply(&mut self, file: SettingsFile) {
        if let Some(dir) = file.assets.dir {
            self.set_asset_dir(dir);
        }
        if let Some(output) = file.assets.output.filter(|o| !o.is_empty()) {
            self.output_file = output;
        }
        if let Some(prefix) = file.assets.image_prefix {
            self.image_prefix = prefix;
            self.prefix_pinned = true;
        }
        if let Some(secs) = file.http.timeout_secs {
            self.http_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.watch.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = file.watch.cooldown_ms {
            self.cooldown = Duration::from_millis(ms);
        }
        if let Some(secs) = file.watch.poll_secs {
            self.poll_interval = Duration::from_secs(secs.max(1));
        }
    }

    /// Point at a different asset directory. The prefix follows it unless a
    /// settings file set one explicitly.
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.set_asset_dir(dir.into());
        self
    }

    fn set_asset_dir(&mut self, dir: PathBuf) {
        if !self.prefix_pinned {
            self.image_prefix = default_prefix(&dir);
        }
        self.asset_dir = dir;
    }

    /// Absolute (or root-relative) path of the asset directory.
    pub fn asset_path(&self) -> PathBuf {
        self.project_root.join(&self.asset_dir)
    }

    /// Full path of the manifest file.
    pub fn output_path(&self) -> PathBuf {
        self.asset_path().join(&self.output_file)
    }

    /// Temp file the manifest is written to before being renamed into place.
    pub fn temp_output_file(&self) -> String {
        format!("{}.tmp", self.output_file)
    }

    pub fn source_paths(&self) -> chara_reel_sources::SourcePaths {
        chara_reel_sources::SourcePaths::new(&self.project_root, self.asset_path())
    }

    /// Path the page uses for an image: `<prefix>/<file>`.
    pub fn image_url(&self, file: &str) -> String {
        let prefix = self.image_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            file.to_string()
        } else {
            format!("{prefix}/{file}")
        }
    }
}

/// `./<dir>` with forward slashes, as the page sees it from the project root.
fn default_prefix(dir: &Path) -> String {
    let s = dir.to_string_lossy().replace('\\', "/");
    let s = s.trim_start_matches("./").trim_end_matches('/');
    if dir.is_absolute() || s.is_empty() {
        ".".to_string()
    } else {
        format!("./{s}")
    }
}

/// User-level settings file: `~/.config/chara-reel/settings.toml`.
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chara-reel").join("settings.toml"))
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
