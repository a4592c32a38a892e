//! Index File Parsing
//!
//! Crawl index files are newline-delimited pseudo-JSON: every line carries a
//! sort-key prefix before the first `{` that must be discarded before
//! parsing. Both plain and gzip-compressed files are supported. Entries
//! with a non-200 status are dropped; malformed lines are skipped and
//! logged, never fatal.

use super::types::IndexDescriptor;
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::io::Read;
use std::path::Path;

/// Parses one local index file, dispatching on the `.gz` extension.
pub fn descriptors_from_file(path: &Path) -> Result<Vec<IndexDescriptor>> {
    let content = if path.extension().is_some_and(|ext| ext == "gz") {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening index file {}", path.display()))?;
        let mut decoder = MultiGzDecoder::new(file);
        let mut text = String::new();
        decoder
            .read_to_string(&mut text)
            .with_context(|| format!("decompressing index file {}", path.display()))?;
        text
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading index file {}", path.display()))?
    };

    Ok(parse_index_lines(&content))
}

/// Parses newline-delimited index entries from already-loaded content.
/// Used for local files and for remote index query responses alike.
pub fn parse_index_lines(content: &str) -> Vec<IndexDescriptor> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_index_line)
        .filter(IndexDescriptor::usable)
        .collect()
}

fn parse_index_line(line: &str) -> Option<IndexDescriptor> {
    // Everything before the first brace is the index sort key.
    let json = match line.find('{') {
        Some(start) => &line[start..],
        None => {
            tracing::warn!("Index line without JSON payload, skipping");
            return None;
        }
    };

    match serde_json::from_str::<IndexDescriptor>(json) {
        Ok(descriptor) => Some(descriptor),
        Err(err) => {
            tracing::warn!("Malformed index line, skipping: {}", err);
            None
        }
    }
}
