//! Frame markers and frame-relative name fields.

pub const SYSEX_START: u8 = 0xf0;
pub const SYSEX_END: u8 = 0xf7;

/// Short category prefix, e.g. `BD`.
pub const PREFIX_RANGE: std::ops::Range<usize> = 24..26;
/// Patch name, terminated early by a null or non-printable byte.
pub const NAME_RANGE: std::ops::Range<usize> = 28..44;

pub const UNKNOWN_LABEL: &str = "Unknown";
