use super::downloader::PageDownloader;
use super::indices;
use super::types::IndexDescriptor;
use crate::matching::{Occurrence, PlaceMatcher};
use std::path::Path;
use std::sync::Arc;

/// Combines the downloader with the place matcher to decide which index
/// entries are worth keeping: a descriptor is relevant when its page text
/// mentions at least two distinct places.
pub struct RelevanceFilter {
    downloader: Arc<PageDownloader>,
    matcher: Arc<PlaceMatcher>,
}

impl RelevanceFilter {
    pub fn new(downloader: Arc<PageDownloader>, matcher: Arc<PlaceMatcher>) -> Self {
        Self { downloader, matcher }
    }

    pub fn downloader(&self) -> &Arc<PageDownloader> {
        &self.downloader
    }

    pub fn matcher(&self) -> &Arc<PlaceMatcher> {
        &self.matcher
    }

    /// Fetches the descriptor's page and checks it for co-occurring places.
    /// Empty text (fetch failure) is simply not relevant.
    pub async fn check(&self, descriptor: &IndexDescriptor) -> Option<Occurrence> {
        let text = self.downloader.fetch_text(descriptor).await;
        if text.is_empty() {
            return None;
        }
        self.matcher.find(&text)
    }

    /// Parses one index file and returns the descriptors whose pages are
    /// relevant, with the places found in them.
    pub async fn relevant_descriptors_from_file(
        &self,
        path: &Path,
    ) -> Vec<(IndexDescriptor, Occurrence)> {
        let descriptors = match indices::descriptors_from_file(path) {
            Ok(descriptors) => descriptors,
            Err(err) => {
                tracing::error!("File {} doesn't contain usable indices: {}", path.display(), err);
                return Vec::new();
            }
        };

        let mut relevant = Vec::new();
        for descriptor in descriptors {
            if let Some(occurrence) = self.check(&descriptor).await {
                relevant.push((descriptor, occurrence));
            }
        }

        tracing::debug!(
            "{} relevant descriptors in {}",
            relevant.len(),
            path.display()
        );
        relevant
    }

    /// Checks every file in a directory. Subdirectories are ignored.
    pub async fn relevant_descriptors_from_dir(
        &self,
        directory: &Path,
    ) -> Vec<(IndexDescriptor, Occurrence)> {
        let files = files_in_dir(directory);

        let mut relevant = Vec::new();
        for file in files {
            relevant.extend(self.relevant_descriptors_from_file(&file).await);
        }
        relevant
    }
}

/// Lists the plain files of a directory in name order. Name order keeps
/// partitioning deterministic across runs.
pub fn files_in_dir(directory: &Path) -> Vec<std::path::PathBuf> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!("Cannot read directory {}: {}", directory.display(), err);
            return Vec::new();
        }
    };

    let mut files: Vec<std::path::PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}
