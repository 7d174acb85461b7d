//! Offset/hex/ASCII diagnostic dumps.
//!
//! Lines follow the `hexdump -C` shape: an 8-digit offset, sixteen hex
//! columns with an extra gap after the eighth, then the ASCII rendering
//! between pipes. Short final lines are padded so the ASCII column stays
//! aligned.

pub const BYTES_PER_LINE: usize = 16;
const GROUP_SPLIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Rendering options for [`format_hex_dump`].
///
/// # Examples
/// ```
/// use dnprobe_core::hexdump::{HexCase, HexDumpStyle};
///
/// let style = HexDumpStyle::table();
/// assert_eq!(style.case, HexCase::Upper);
/// assert!(style.header);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HexDumpStyle {
    pub case: HexCase,
    pub header: bool,
}

impl HexDumpStyle {
    /// Lowercase, no header.
    pub const fn canonical() -> Self {
        Self {
            case: HexCase::Lower,
            header: false,
        }
    }

    /// Uppercase with a column header and rule line.
    pub const fn table() -> Self {
        Self {
            case: HexCase::Upper,
            header: true,
        }
    }
}

/// One rendered row: up to sixteen bytes starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexDumpLine<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl HexDumpLine<'_> {
    pub fn ascii(&self) -> String {
        self.bytes.iter().map(|b| printable_char(*b)).collect()
    }

    pub fn render(&self, case: HexCase) -> String {
        let cells = (0..BYTES_PER_LINE).map(|idx| match self.bytes.get(idx) {
            Some(byte) => match case {
                HexCase::Lower => format!("{byte:02x}"),
                HexCase::Upper => format!("{byte:02X}"),
            },
            None => "  ".to_string(),
        });
        let offset = match case {
            HexCase::Lower => format!("{:08x}", self.offset),
            HexCase::Upper => format!("{:08X}", self.offset),
        };
        format!("{offset}  {}  |{}|", join_columns(cells), self.ascii())
    }
}

/// Split a buffer into dump rows.
pub fn dump_lines(buffer: &[u8]) -> impl Iterator<Item = HexDumpLine<'_>> {
    buffer
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(|(idx, bytes)| HexDumpLine {
            offset: idx * BYTES_PER_LINE,
            bytes,
        })
}

/// Render `buffer` as a newline-joined dump.
///
/// An empty buffer renders as an empty string, or as the header and rule
/// alone when the style requests a header.
///
/// # Examples
/// ```
/// use dnprobe_core::hexdump::{HexDumpStyle, format_hex_dump};
///
/// let dump = format_hex_dump(b"ABCDEFGHIJKLMNOP", &HexDumpStyle::canonical());
/// assert_eq!(
///     dump,
///     "00000000  41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50  |ABCDEFGHIJKLMNOP|"
/// );
/// ```
pub fn format_hex_dump(buffer: &[u8], style: &HexDumpStyle) -> String {
    let mut out = Vec::new();
    if style.header {
        let header = header_line(style.case);
        let rule = "-".repeat(header.len());
        out.push(header);
        out.push(rule);
    }
    out.extend(dump_lines(buffer).map(|line| line.render(style.case)));
    out.join("\n")
}

fn header_line(case: HexCase) -> String {
    let cells = (0..BYTES_PER_LINE).map(|idx| match case {
        HexCase::Lower => format!("{idx:02x}"),
        HexCase::Upper => format!("{idx:02X}"),
    });
    format!("{:<8}  {}  ASCII", "Offset", join_columns(cells))
}

fn join_columns(cells: impl Iterator<Item = String>) -> String {
    let mut out = String::with_capacity(BYTES_PER_LINE * 3 + 1);
    for (idx, cell) in cells.enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        if idx == GROUP_SPLIT {
            out.push(' ');
        }
        out.push_str(&cell);
    }
    out
}

pub(crate) fn printable_char(byte: u8) -> char {
    if is_printable(byte) {
        byte as char
    } else {
        '.'
    }
}

pub(crate) fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

#[cfg(test)]
mod tests {
    use super::{HexDumpStyle, dump_lines, format_hex_dump};

    #[test]
    fn empty_buffer_without_header_is_empty() {
        assert_eq!(format_hex_dump(&[], &HexDumpStyle::canonical()), "");
    }

    #[test]
    fn empty_buffer_with_header_keeps_header_and_rule() {
        let dump = format_hex_dump(&[], &HexDumpStyle::table());
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Offset"));
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn line_counts_follow_sixteen_byte_rows() {
        let style = HexDumpStyle::canonical();
        assert_eq!(format_hex_dump(&[0u8; 16], &style).lines().count(), 1);
        assert_eq!(format_hex_dump(&[0u8; 17], &style).lines().count(), 2);
    }

    #[test]
    fn ascii_column_renders_printable_bytes() {
        let bytes: Vec<u8> = (0x41..=0x50).collect();
        let line = dump_lines(&bytes).next().unwrap();
        assert_eq!(line.ascii(), "ABCDEFGHIJKLMNOP");
    }

    #[test]
    fn non_printable_bytes_render_as_dots() {
        let bytes = [
            0xf0, 0x00, 0x20, 0x3c, 0x0d, 0x00, 0x53, 0x01, 0x01, 0x00, 0x78, 0x3e, 0x6f, 0x3a,
            0x4e, 0x00,
        ];
        let dump = format_hex_dump(&bytes, &HexDumpStyle::canonical());
        assert!(dump.ends_with("|.. <..S...x>o:N.|"));
    }

    #[test]
    fn short_line_keeps_ascii_column_aligned() {
        let dump = format_hex_dump(&[0x41; 17], &HexDumpStyle::canonical());
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines[0].find('|'), lines[1].find('|'));
        assert_eq!(lines[1], format!("00000010  41{}  |A|", " ".repeat(46)));
    }

    #[test]
    fn full_row_has_gap_after_eighth_column() {
        let bytes: Vec<u8> = (0x41..=0x50).collect();
        assert_eq!(
            format_hex_dump(&bytes, &HexDumpStyle::canonical()),
            "00000000  41 42 43 44 45 46 47 48  49 4a 4b 4c 4d 4e 4f 50  |ABCDEFGHIJKLMNOP|"
        );
    }

    #[test]
    fn table_style_uses_uppercase() {
        let dump = format_hex_dump(&[0xab, 0xcd], &HexDumpStyle::table());
        let last = dump.lines().last().unwrap();
        assert!(last.starts_with("00000000  AB CD"));
    }

    #[test]
    fn header_columns_line_up_with_rows() {
        let dump = format_hex_dump(&[0u8; 16], &HexDumpStyle::table());
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines[0].find("0F"), lines[2].rfind("00  |"));
    }
}
