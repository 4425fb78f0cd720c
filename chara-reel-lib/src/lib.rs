pub mod error;
pub mod manifest;
pub mod merge;
pub mod normalize;
pub mod scanner;
pub mod settings;
pub mod watch;

pub use error::{ManifestError, NormalizeError, SettingsError, WatchError};
pub use manifest::{BuildReport, assemble_characters, build_manifest, write_manifest};
pub use merge::{dedupe_videos, merge_character};
pub use normalize::{NormalizeConfig, NormalizeReport, normalize_rows, normalize_sheet_csv};
pub use scanner::{is_excluded, scan_character_images};
pub use settings::Settings;
pub use watch::{BuildGate, ChangeFilter, Debouncer, WatchOptions, watch};

// Re-export the building blocks frontends need
pub use chara_reel_core::{CharacterRecord, Manifest, VideoRef};
pub use chara_reel_sources::SourceKind;
