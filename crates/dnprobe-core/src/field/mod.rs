//! Fixed-width integer extraction.
//!
//! Every raw value read from a preset or SysEx payload goes through
//! [`FieldReader::read_int`]; no other module indexes buffers directly.
//! Fields are little-endian and 1, 2 or 4 bytes wide. Signed fields use
//! two's-complement over their own width, so a 2-byte read of `0x8000`
//! yields `-32768`.

pub mod error;
pub mod reader;

pub use error::FieldError;
pub use reader::{FieldReader, read_int};

/// Width of a fixed-size integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    One,
    Two,
    Four,
}

impl Width {
    pub const fn len(self) -> usize {
        match self {
            Width::One => 1,
            Width::Two => 2,
            Width::Four => 4,
        }
    }
}

/// Location and interpretation of one raw little-endian value.
///
/// # Examples
/// ```
/// use dnprobe_core::field::FieldSpec;
///
/// let spec = FieldSpec::i16(0x3A);
/// assert_eq!(spec.end(), 0x3C);
/// assert!(spec.signed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: usize,
    pub width: Width,
    pub signed: bool,
}

impl FieldSpec {
    pub const fn new(offset: usize, width: Width, signed: bool) -> Self {
        Self {
            offset,
            width,
            signed,
        }
    }

    pub const fn u8(offset: usize) -> Self {
        Self::new(offset, Width::One, false)
    }

    pub const fn i8(offset: usize) -> Self {
        Self::new(offset, Width::One, true)
    }

    pub const fn u16(offset: usize) -> Self {
        Self::new(offset, Width::Two, false)
    }

    pub const fn i16(offset: usize) -> Self {
        Self::new(offset, Width::Two, true)
    }

    pub const fn u32(offset: usize) -> Self {
        Self::new(offset, Width::Four, false)
    }

    pub const fn i32(offset: usize) -> Self {
        Self::new(offset, Width::Four, true)
    }

    /// Exclusive end offset of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.width.len()
    }
}
