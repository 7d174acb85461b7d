use thiserror::Error;

use crate::field::FieldError;

/// Errors returned by preset decoding.
///
/// # Examples
/// ```
/// use dnprobe_core::preset::PresetError;
///
/// let err = PresetError::Truncated { needed: 128, actual: 12 };
/// assert!(err.to_string().contains("preset too short"));
/// ```
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("preset too short: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("field {name}: {source}")]
    Field {
        name: &'static str,
        #[source]
        source: FieldError,
    },
}
