use thiserror::Error;

/// Errors returned by fixed-width field reads.
///
/// # Examples
/// ```
/// use dnprobe_core::field::FieldError;
///
/// let err = FieldError::OutOfRange { offset: 4, width: 2, len: 5 };
/// assert!(err.to_string().contains("out of range"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field out of range: offset {offset} + width {width} exceeds buffer length {len}")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
}
