//! MIDI System Exclusive patch dump scanning.
//!
//! A dump is a stream of `F0 .. F7` frames, one per patch. The scanner finds
//! frames left to right, reads the prefix and name fields at fixed
//! frame-relative offsets (`layout`, `reader`) and tags each patch through a
//! pluggable [`TagClassifier`].

pub mod classify;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use classify::{DEFAULT_GROUPS, KeywordClassifier, KeywordGroup, TagClassifier};
pub use error::SysexError;
pub use parser::{SysexFrame, scan_sysex, scan_sysex_with};
