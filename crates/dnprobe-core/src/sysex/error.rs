use thiserror::Error;

/// Errors returned by SysEx scanning.
///
/// # Examples
/// ```
/// use dnprobe_core::sysex::SysexError;
///
/// let err = SysexError::NoFramesFound { scanned: 3 };
/// assert!(err.to_string().contains("No valid patches found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SysexError {
    #[error("No valid patches found: no terminated F0..F7 frame in {scanned} bytes")]
    NoFramesFound { scanned: usize },
}
