//! Shared data model and parsing primitives for chara-reel.
//!
//! Everything here is pure: no I/O beyond what the caller hands in. The
//! sources and lib crates build on these types to produce the manifest.

pub mod collate;
pub mod csv;
pub mod error;
pub mod types;
pub mod util;
pub mod video_id;

pub use collate::compare_ja;
pub use csv::{CsvTable, parse_rows, parse_table};
pub use error::CsvError;
pub use types::{CharacterRecord, Manifest, SourceEntry, SourceMap, VideoRef};
pub use util::base_name;
pub use video_id::{parse_video_id, resolve_video_id};
