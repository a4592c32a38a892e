//! Gathering Data Types
//!
//! `IndexDescriptor` is the immutable record locating one archived page's
//! byte range. Index files store `offset` and `length` as quoted strings;
//! the deserializer accepts both quoted and bare numbers so descriptors
//! round-trip through their serialized form unchanged.

use serde::{Deserialize, Deserializer, Serialize};

/// Locates one archived page inside a crawl archive file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescriptor {
    /// Content digest of the archived page, when the index provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    /// Archive file holding the page, relative to the data prefix.
    pub filename: String,
    /// Byte offset of the page's compressed record inside the archive.
    #[serde(deserialize_with = "number_or_quoted")]
    pub offset: u64,
    /// Length in bytes of the compressed record.
    #[serde(deserialize_with = "number_or_quoted")]
    pub length: u64,
    /// HTTP status recorded at crawl time; only "200" entries are usable.
    #[serde(deserialize_with = "string_or_number")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl IndexDescriptor {
    pub fn usable(&self) -> bool {
        self.status == "200"
    }

    /// Stable storage key. Falls back to the archive coordinates when the
    /// index carries no digest.
    pub fn digest_key(&self) -> String {
        match &self.digest {
            Some(digest) => digest.clone(),
            None => format!("{}:{}", self.filename, self.offset),
        }
    }
}

fn number_or_quoted<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Quoted(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Quoted(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(value) => value.to_string(),
        Raw::Text(text) => text,
    })
}
