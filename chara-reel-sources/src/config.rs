//! On-disk configuration for the soft sources.
//!
//! All files live next to the images in the asset directory. Every one of
//! them is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::SourceError;

/// Service-account spreadsheet settings.
pub const SHEETS_SA_CONFIG: &str = "sheets.sa.json";
/// Default service-account key file.
pub const DEFAULT_CREDENTIALS: &str = "service-account.json";
/// Published-CSV settings.
pub const PUBLIC_CSV_CONFIG: &str = "sheets.config.json";
/// Local normalized CSV.
pub const LOCAL_CSV: &str = "videos.csv";

/// Google Sheets API v4 spreadsheets endpoint.
pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const DEFAULT_SHEET_NAME: &str = "Sheet1";
/// Image filename and video link columns.
const DEFAULT_COLUMNS: &str = "F:G";

/// Resolves source file locations for one project.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    /// Directory relative credential paths are resolved against
    pub project_root: PathBuf,
    /// Directory holding the images, sidecars and source configs
    pub asset_dir: PathBuf,
}

impl SourcePaths {
    pub fn new(project_root: impl Into<PathBuf>, asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            asset_dir: asset_dir.into(),
        }
    }

    pub fn sheets_config(&self) -> PathBuf {
        self.asset_dir.join(SHEETS_SA_CONFIG)
    }

    pub fn public_csv_config(&self) -> PathBuf {
        self.asset_dir.join(PUBLIC_CSV_CONFIG)
    }

    pub fn local_csv(&self) -> PathBuf {
        self.asset_dir.join(LOCAL_CSV)
    }

    /// Where the service-account key lives for a given sheets config.
    ///
    /// Absolute `credentialsPath` values are used as-is; relative ones are
    /// taken from the project root. Without one, the key is expected next to
    /// the images.
    pub fn credentials(&self, config: &SheetsConfig) -> PathBuf {
        match &config.credentials_path {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => self.project_root.join(p),
            None => self.asset_dir.join(DEFAULT_CREDENTIALS),
        }
    }
}

/// Contents of `sheets.sa.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetsConfig {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub header_row: Option<bool>,
    /// Overrides the Sheets API base URL.
    #[serde(default)]
    pub api_base: Option<String>,
}

impl SheetsConfig {
    /// The A1 range to fetch, defaulting to columns F:G of the named sheet.
    pub fn range(&self) -> String {
        match self.range.as_deref().filter(|r| !r.is_empty()) {
            Some(r) => r.to_string(),
            None => {
                let sheet = self
                    .sheet_name
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(DEFAULT_SHEET_NAME);
                format!("{sheet}!{DEFAULT_COLUMNS}")
            }
        }
    }

    /// The Sheets API base URL to fetch values from.
    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(SHEETS_API)
    }

    /// Whether the first returned row is a header. Only an explicit `false`
    /// turns this off.
    pub fn has_header_row(&self) -> bool {
        self.header_row != Some(false)
    }
}

/// Google service-account key file (only the fields we need).
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"****")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.client_email.is_empty() || self.private_key.is_empty() {
            return Err(SourceError::InvalidCredentials(
                "client_email and private_key are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contents of `sheets.config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCsvConfig {
    #[serde(default)]
    pub csv_url: Option<String>,
}

impl PublicCsvConfig {
    /// The configured URL, if it is non-empty.
    pub fn url(&self) -> Option<&str> {
        self.csv_url.as_deref().filter(|u| !u.is_empty())
    }
}

/// Read and deserialize a JSON config file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the published-CSV URL, if one is configured.
pub fn public_csv_url(paths: &SourcePaths) -> Option<String> {
    let config: PublicCsvConfig = match read_json(&paths.public_csv_config()) {
        Ok(c) => c,
        Err(e) => {
            if !e.is_not_found() {
                log::warn!("Ignoring {}: {}", PUBLIC_CSV_CONFIG, e);
            }
            return None;
        }
    };
    config.url().map(str::to_string)
}
