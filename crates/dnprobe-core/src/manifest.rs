//! Container manifest cooperation.
//!
//! Project and preset containers carry a small JSON manifest next to the
//! binary payload. Only `MetaInfo.Tags` is consumed here; anything absent
//! or malformed reads as no tags.

use serde_json::Value;
use tracing::warn;

/// Read `MetaInfo.Tags` from a parsed manifest. Non-string entries are
/// ignored.
///
/// # Examples
/// ```
/// use dnprobe_core::manifest::manifest_tags;
///
/// let manifest = serde_json::json!({ "MetaInfo": { "Tags": ["bass", 3, "dark"] } });
/// assert_eq!(manifest_tags(&manifest), vec!["bass", "dark"]);
/// assert!(manifest_tags(&serde_json::json!({})).is_empty());
/// ```
pub fn manifest_tags(manifest: &Value) -> Vec<String> {
    manifest
        .get("MetaInfo")
        .and_then(|meta| meta.get("Tags"))
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Parse manifest text and read its tags; invalid JSON yields no tags.
pub fn manifest_tags_from_str(text: &str) -> Vec<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(manifest) => manifest_tags(&manifest),
        Err(err) => {
            warn!(error = %err, "ignoring malformed manifest");
            Vec::new()
        }
    }
}

/// Manifest tags first, then classifier tags, without case-insensitive
/// duplicates.
pub fn merge_tags(manifest: &[String], classified: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(manifest.len() + classified.len());
    for tag in manifest.iter().chain(classified) {
        let tag = tag.trim();
        if tag.is_empty() || merged.iter().any(|seen| seen.eq_ignore_ascii_case(tag)) {
            continue;
        }
        merged.push(tag.to_string());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{manifest_tags, manifest_tags_from_str, merge_tags};
    use serde_json::json;

    #[test]
    fn tags_not_an_array_reads_empty() {
        let manifest = json!({ "MetaInfo": { "Tags": "bass" } });
        assert!(manifest_tags(&manifest).is_empty());
    }

    #[test]
    fn malformed_text_reads_empty() {
        assert!(manifest_tags_from_str("{ not json").is_empty());
    }

    #[test]
    fn text_with_tags_is_read() {
        let text = r#"{"MetaInfo":{"Tags":["Pad","Evolving"]},"Version":1}"#;
        assert_eq!(manifest_tags_from_str(text), vec!["Pad", "Evolving"]);
    }

    #[test]
    fn merge_keeps_manifest_first_and_dedups() {
        let manifest = vec!["Bass".to_string(), "Dark".to_string()];
        let classified = vec!["bass".to_string(), "Low".to_string()];
        assert_eq!(merge_tags(&manifest, &classified), vec!["Bass", "Dark", "Low"]);
    }
}
