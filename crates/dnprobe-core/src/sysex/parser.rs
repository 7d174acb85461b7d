use serde::Serialize;
use tracing::debug;

use super::classify::{KeywordClassifier, TagClassifier};
use super::error::SysexError;
use super::layout;
use super::reader::SysexReader;
use crate::report::PatchBlock;

/// One `F0 .. F7` frame found in a scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SysexFrame<'a> {
    pub start_offset: usize,
    /// Offset of the terminating `F7` (inclusive).
    pub end_offset: usize,
    #[serde(skip)]
    pub bytes: &'a [u8],
    pub name: String,
    pub tags: Vec<String>,
}

impl<'a> SysexFrame<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn block(&self) -> PatchBlock<'a> {
        PatchBlock {
            name: self.name.clone(),
            tags: self.tags.clone(),
            bytes: self.bytes,
        }
    }
}

/// Scan `buffer` for SysEx frames using the default keyword classifier.
///
/// # Examples
/// ```
/// use dnprobe_core::sysex::scan_sysex;
///
/// let mut buffer = vec![0u8; 40];
/// buffer[0] = 0xf0;
/// buffer[24..26].copy_from_slice(b"BD");
/// buffer[28..32].copy_from_slice(b"TEST");
/// buffer[39] = 0xf7;
///
/// let frames = scan_sysex(&buffer)?;
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].name, "BD. TEST");
/// # Ok::<(), dnprobe_core::sysex::SysexError>(())
/// ```
///
/// # Errors
/// Returns `SysexError::NoFramesFound` when no terminated frame exists.
pub fn scan_sysex(buffer: &[u8]) -> Result<Vec<SysexFrame<'_>>, SysexError> {
    scan_sysex_with(buffer, &KeywordClassifier::default())
}

/// Scan `buffer` for SysEx frames, tagging each with `classifier`.
///
/// A start byte with no later end byte is skipped; trailing garbage never
/// fails the scan on its own.
///
/// # Errors
/// Returns `SysexError::NoFramesFound` when no terminated frame exists.
pub fn scan_sysex_with<'a>(
    buffer: &'a [u8],
    classifier: &dyn TagClassifier,
) -> Result<Vec<SysexFrame<'a>>, SysexError> {
    let mut frames = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_byte(buffer, pos, layout::SYSEX_START) {
        let Some(end) = find_byte(buffer, start + 1, layout::SYSEX_END) else {
            // No end marker after this start, so no later start can close either.
            debug!(offset = start, "unterminated SysEx start skipped");
            break;
        };
        let bytes = &buffer[start..=end];
        let name = SysexReader::new(bytes).read_label();
        let tags = classifier.classify(&name, frames.len());
        debug!(start, end, name = %name, "SysEx frame");
        frames.push(SysexFrame {
            start_offset: start,
            end_offset: end,
            bytes,
            name,
            tags,
        });
        pos = end + 1;
    }

    if frames.is_empty() {
        return Err(SysexError::NoFramesFound {
            scanned: buffer.len(),
        });
    }
    Ok(frames)
}

fn find_byte(buffer: &[u8], from: usize, needle: u8) -> Option<usize> {
    buffer
        .get(from..)?
        .iter()
        .position(|byte| *byte == needle)
        .map(|idx| from + idx)
}
