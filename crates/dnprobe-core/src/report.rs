//! Markdown patch report blocks.
//!
//! One block per patch: three labelled lines followed by a fenced hex dump.
//! Blocks are separated by a fixed-width rule.

use crate::hexdump::{HexDumpStyle, format_hex_dump};

pub const RULE_WIDTH: usize = 80;

/// Name, tags and payload of one patch, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchBlock<'a> {
    pub name: String,
    pub tags: Vec<String>,
    pub bytes: &'a [u8],
}

impl PatchBlock<'_> {
    pub fn render(&self, style: &HexDumpStyle) -> String {
        format!(
            "- patch name: {}\n- patch tags: {}\n- patch binary:\n\n```text\n{}\n```\n",
            self.name,
            self.tags.join(", "),
            format_hex_dump(self.bytes, style)
        )
    }
}

/// Render blocks separated by rule lines. Empty input renders as nothing.
///
/// # Examples
/// ```
/// use dnprobe_core::hexdump::HexDumpStyle;
/// use dnprobe_core::report::{PatchBlock, render_patch_report};
///
/// let block = PatchBlock {
///     name: "BD. TEST1".to_string(),
///     tags: vec!["Drum".to_string(), "Kick".to_string()],
///     bytes: &[0xf0, 0xf7],
/// };
/// let text = render_patch_report(&[block], &HexDumpStyle::canonical());
/// assert!(text.starts_with("- patch name: BD. TEST1\n- patch tags: Drum, Kick\n"));
/// ```
pub fn render_patch_report(blocks: &[PatchBlock<'_>], style: &HexDumpStyle) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    blocks
        .iter()
        .map(|block| block.render(style))
        .collect::<Vec<_>>()
        .join(&format!("\n{rule}\n\n"))
}
