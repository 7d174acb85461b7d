use dnprobe_core::hexdump::HexDumpStyle;
use dnprobe_core::manifest::merge_tags;
use dnprobe_core::report::{PatchBlock, render_patch_report};
use dnprobe_core::sysex::{KeywordClassifier, SysexError, TagClassifier, scan_sysex, scan_sysex_with};

fn hex(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .map(|byte| u8::from_str_radix(byte, 16).unwrap())
        .collect()
}

fn device_frame(prefix: &str, name: &str) -> Vec<u8> {
    let mut frame = hex(
        "F0 00 20 3C 0D 00 53 01 01 00 78 3E 6F 3A 4E 00 \
         00 00 00 01 00 00 00 21 00 00 00 20",
    );
    frame[24..24 + prefix.len()].copy_from_slice(prefix.as_bytes());
    frame.extend(name.as_bytes());
    frame.extend(hex(
        "00 00 20 53 4D 00 00 00 00 02 00 00 55 0B 73 \
         12 12 00 00 13 00 40 00 40 00 00 2A 00 2A 00 03 F7",
    ));
    frame
}

#[test]
fn report_matches_device_dump_layout() {
    let buffer = device_frame("BD", "TEST1");
    let frames = scan_sysex(&buffer).unwrap();
    let blocks: Vec<_> = frames.iter().map(|frame| frame.block()).collect();
    let report = render_patch_report(&blocks, &HexDumpStyle::canonical());

    assert!(report.contains("patch name: BD. TEST1"));
    assert!(report.contains("patch tags: Drum, Kick"));
    assert!(report.contains("00000000"));
    assert!(report.to_uppercase().contains("F0 00 20 3C"));
    assert!(report.contains("|.. <..S...x>o:N.|"));
}

#[test]
fn bank_dump_yields_frames_in_order() {
    let mut buffer = Vec::new();
    for (prefix, name) in [("BD", "DEEP"), ("CY", "JAZZY"), ("", "GLASS")] {
        buffer.extend(device_frame(prefix, name));
    }
    let frames = scan_sysex(&buffer).unwrap();
    let names: Vec<_> = frames.iter().map(|frame| frame.name.as_str()).collect();
    assert_eq!(names, vec!["BD. DEEP", "CY. JAZZY", "GLASS"]);
    assert_eq!(frames[1].tags, vec!["Drum", "Cymbal"]);
    // "GLASS" matches nothing; ordinal 2 picks the third group.
    assert_eq!(frames[2].tags, vec!["Drum", "Cymbal"]);
}

#[test]
fn scanning_is_deterministic() {
    let buffer = [device_frame("", "AAA"), device_frame("", "BBB")].concat();
    let first = scan_sysex(&buffer).unwrap();
    let second = scan_sysex(&buffer).unwrap();
    assert_eq!(first, second);
}

#[test]
fn invalid_dump_reports_no_patches() {
    let err = scan_sysex(&[0x00, 0x01, 0x02]).unwrap_err();
    assert!(matches!(err, SysexError::NoFramesFound { scanned: 3 }));
    assert!(err.to_string().contains("No valid patches found"));
}

#[test]
fn custom_classifier_replaces_keyword_table() {
    struct ByLength;
    impl TagClassifier for ByLength {
        fn classify(&self, label: &str, _ordinal: usize) -> Vec<String> {
            vec![format!("len-{}", label.len())]
        }
    }

    let buffer = device_frame("BD", "TEST1");
    let frames = scan_sysex_with(&buffer, &ByLength).unwrap();
    assert_eq!(frames[0].tags, vec!["len-9"]);
}

#[test]
fn manifest_tags_merge_ahead_of_classifier() {
    let classifier = KeywordClassifier::default();
    let classified = classifier.classify("hidden-tears", 0);
    let merged = merge_tags(&["Pad".to_string()], &classified);
    assert_eq!(merged[0], "Pad");
    assert!(merged.len() > 1);

    let block = PatchBlock {
        name: "hidden-tears".to_string(),
        tags: merged,
        bytes: &[0x00],
    };
    let text = render_patch_report(&[block], &HexDumpStyle::canonical());
    assert!(text.contains("- patch name: hidden-tears"));
    assert!(text.contains("- patch tags: Pad, "));
}
