//! Gathering Module
//!
//! The data intake layer. Turns crawl-index descriptors into plain page
//! text ready for matching and classification.
//!
//! ## Workflow
//! 1. **Index parsing**: local index files (plain or gzip, line-delimited
//!    pseudo-JSON) are parsed into `IndexDescriptor` records; entries whose
//!    status is not 200 are dropped, malformed lines are skipped.
//! 2. **Fetch**: the descriptor's byte range is downloaded from the archive
//!    host with a bounded timeout, gzip-decompressed, and stripped of
//!    archive headers and markup.
//! 3. **Filtering**: `RelevanceFilter` combines the downloader with the
//!    place matcher to keep only descriptors whose page mentions at least
//!    two places.
//!
//! Network failures never propagate out of the fetch path; a failed item
//! degrades to empty text and is treated as not relevant.

pub mod downloader;
pub mod indices;
pub mod prefetch;
pub mod selector;
pub mod types;

pub use downloader::PageDownloader;
pub use selector::RelevanceFilter;
pub use types::IndexDescriptor;

#[cfg(test)]
mod tests;
