use super::layout;
use crate::hexdump::is_printable;

/// Name-field access within one frame. Ranges past the frame end are
/// clamped, so short frames yield empty runs instead of errors.
pub struct SysexReader<'a> {
    frame: &'a [u8],
}

impl<'a> SysexReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn read_slice_clamped(&self, range: std::ops::Range<usize>) -> &'a [u8] {
        let end = range.end.min(self.frame.len());
        let start = range.start.min(end);
        &self.frame[start..end]
    }

    /// Leading printable-ASCII run of `range`, trimmed.
    pub fn read_ascii_run(&self, range: std::ops::Range<usize>) -> String {
        let run: String = self
            .read_slice_clamped(range)
            .iter()
            .take_while(|byte| **byte != 0 && is_printable(**byte))
            .map(|byte| *byte as char)
            .collect();
        run.trim().to_string()
    }

    pub fn read_prefix(&self) -> String {
        self.read_ascii_run(layout::PREFIX_RANGE.clone())
    }

    pub fn read_name(&self) -> String {
        self.read_ascii_run(layout::NAME_RANGE.clone())
    }

    /// `"{prefix}. {name}"`, the name alone, or the unknown placeholder.
    pub fn read_label(&self) -> String {
        let prefix = self.read_prefix();
        let name = self.read_name();
        match (prefix.is_empty(), name.is_empty()) {
            (_, true) => layout::UNKNOWN_LABEL.to_string(),
            (true, false) => name,
            (false, false) => format!("{prefix}. {name}"),
        }
    }
}
