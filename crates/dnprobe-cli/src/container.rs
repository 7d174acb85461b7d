//! `.dn2pst` / `.dn2prj` container unwrapping.
//!
//! A container is a zip archive holding one preset payload entry and an
//! optional `manifest.json`. Inputs that do not start with the zip local
//! header signature are treated as already-unwrapped payloads.

use std::io::{Cursor, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;
use zip::ZipArchive;

use dnprobe_core::manifest::manifest_tags_from_str;

pub const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Payload and manifest tags pulled out of a container.
#[derive(Debug)]
pub struct Unwrapped {
    pub entry: String,
    pub payload: Vec<u8>,
    /// `None` when the archive has no manifest entry.
    pub manifest_tags: Option<Vec<String>>,
}

pub fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_SIGNATURE)
}

/// Extract the preset payload from a zip container.
///
/// With more than one non-manifest entry, the entry whose file name equals
/// `stem` (the container's file stem) is chosen.
pub fn unwrap_container(bytes: &[u8], stem: Option<&str>) -> Result<Unwrapped> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("unreadable zip container")?;
    let mut manifest_tags = None;
    let mut payloads: Vec<(String, Vec<u8>)> = Vec::new();

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .with_context(|| format!("unreadable container entry #{}", index))?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .with_context(|| format!("failed to extract container entry {}", name))?;

        if entry_file_name(&name) == Some(MANIFEST_FILE) {
            manifest_tags = Some(manifest_tags_from_str(&String::from_utf8_lossy(&data)));
        } else {
            debug!(entry = %name, bytes = data.len(), "container entry");
            payloads.push((name, data));
        }
    }

    let chosen = match payloads.len() {
        0 => bail!("container holds no preset payload"),
        1 => 0,
        count => {
            let matching = stem.and_then(|stem| {
                payloads
                    .iter()
                    .position(|(name, _)| entry_file_name(name) == Some(stem))
            });
            match matching {
                Some(position) => position,
                None => bail!(
                    "container holds {} payload entries and none is named after the file",
                    count
                ),
            }
        }
    };
    let (entry, payload) = payloads.swap_remove(chosen);
    Ok(Unwrapped {
        entry,
        payload,
        manifest_tags,
    })
}

fn entry_file_name(name: &str) -> Option<&str> {
    Path::new(name).file_name().and_then(|name| name.to_str())
}
