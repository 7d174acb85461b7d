//! dnprobe core library for inspecting Digitone preset and SysEx dumps.
//!
//! This crate holds the byte-level part of the tool: it never touches the
//! file system or archives. Callers hand it raw payloads (an unwrapped
//! `.dn2pst`/`.dn2prj` entry, a `.syx` dump) and optional manifest JSON.
//!
//! - `hexdump`: offset/hex/ASCII diagnostic rendering.
//! - `field`: bounds-checked little-endian integer reads (the only place
//!   offsets are resolved).
//! - `scale`: raw-to-UI transforms (passthrough, clamp, linear, lookup).
//! - `preset`: offset table and typed parameter record.
//! - `sysex`: `F0 .. F7` frame scanning, name fields and tagging.
//! - `report`/`manifest`: Markdown patch blocks and manifest tags.
//!
//! Invariants:
//! - Decoding is a pure function of its input; repeated calls on the same
//!   buffer give identical records.
//! - Parameters derived from bytes, asserted from the reference preset, and
//!   unknown are kept apart in the record (`preset::Param`).
//! - A failed field read aborts the decode; no default is substituted.
//!
//! # Examples
//! ```
//! use dnprobe_core::hexdump::{HexDumpStyle, format_hex_dump};
//! use dnprobe_core::preset::{Param, decode_preset, layout};
//!
//! let mut payload = vec![0u8; layout::MIN_LEN];
//! payload[layout::ALGO_OFFSET] = 7;
//! let record = decode_preset(&payload)?;
//! assert!(matches!(record.algo, Param::Derived { .. }));
//!
//! let dump = format_hex_dump(&payload[..16], &HexDumpStyle::canonical());
//! assert!(dump.starts_with("00000000  00 00"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod field;
pub mod hexdump;
pub mod manifest;
pub mod preset;
pub mod report;
pub mod scale;
pub mod sysex;

pub use field::{FieldError, FieldReader, FieldSpec, Width, read_int};
pub use hexdump::{HexCase, HexDumpStyle, format_hex_dump};
pub use preset::{ParameterRecord, PresetError, decode_preset};
pub use report::{PatchBlock, render_patch_report};
pub use scale::{Fallback, LinearScale, ScaleRule};
pub use sysex::{SysexError, SysexFrame, TagClassifier, scan_sysex, scan_sysex_with};
