//! Patch tag classification.
//!
//! The default classifier matches labels against a priority-ordered keyword
//! table. Labels that match nothing get a group picked round-robin by frame
//! ordinal: deterministic for a given input, but not a real classification.

use tracing::debug;

/// Assigns descriptive tags to a rendered patch label.
pub trait TagClassifier {
    /// `ordinal` is the zero-based position of the patch among all patches
    /// found so far in the current scan.
    fn classify(&self, label: &str, ordinal: usize) -> Vec<String>;
}

/// Keywords mapped to a fixed tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub tags: &'static [&'static str],
}

pub const DEFAULT_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["BD", "KICK"],
        tags: &["Drum", "Kick"],
    },
    KeywordGroup {
        keywords: &["SD", "SNARE", "CLAP"],
        tags: &["Drum", "Snare"],
    },
    KeywordGroup {
        keywords: &["HH", "HAT", "CY", "RIDE"],
        tags: &["Drum", "Cymbal"],
    },
    KeywordGroup {
        keywords: &["BASS"],
        tags: &["Bass", "Low"],
    },
    KeywordGroup {
        keywords: &["PAD", "STRING"],
        tags: &["Pad", "Atmosphere"],
    },
    KeywordGroup {
        keywords: &["LEAD", "SYNC"],
        tags: &["Lead", "Melodic"],
    },
];

/// Case-insensitive substring classifier; first matching group wins.
///
/// # Examples
/// ```
/// use dnprobe_core::sysex::{KeywordClassifier, TagClassifier};
///
/// let classifier = KeywordClassifier::default();
/// assert_eq!(classifier.classify("bd. TEST1", 0), vec!["Drum", "Kick"]);
/// ```
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    groups: &'static [KeywordGroup],
}

impl KeywordClassifier {
    pub fn new(groups: &'static [KeywordGroup]) -> Self {
        Self { groups }
    }

    fn matching_group(&self, label: &str) -> Option<&KeywordGroup> {
        let label = label.to_ascii_uppercase();
        self.groups.iter().find(|group| {
            group
                .keywords
                .iter()
                .any(|keyword| label.contains(&keyword.to_ascii_uppercase()))
        })
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_GROUPS)
    }
}

impl TagClassifier for KeywordClassifier {
    fn classify(&self, label: &str, ordinal: usize) -> Vec<String> {
        let group = match self.matching_group(label) {
            Some(group) => group,
            None => {
                if self.groups.is_empty() {
                    return Vec::new();
                }
                let group = &self.groups[ordinal % self.groups.len()];
                debug!(label, ordinal, "no keyword match, round-robin tags");
                group
            }
        };
        group.tags.iter().map(|tag| tag.to_string()).collect()
    }
}
