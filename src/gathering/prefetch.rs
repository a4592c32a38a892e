//! Pre-Fetched Page Files
//!
//! The file pipeline variant works from pages downloaded ahead of time: one
//! file per page, first line the descriptor serialized as JSON, remaining
//! lines the page text. This module reads and writes that format and runs
//! the export workers that produce such files from index directories.

use super::selector::{files_in_dir, RelevanceFilter};
use super::types::IndexDescriptor;
use crate::pipeline::partitioner::divide_work;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Splits pre-fetched file content into its descriptor and page text.
pub fn parse_prefetched(content: &str) -> Result<(IndexDescriptor, String)> {
    let (first_line, text) = content.split_once('\n').unwrap_or((content, ""));
    let descriptor: IndexDescriptor =
        serde_json::from_str(first_line.trim()).context("parsing descriptor line")?;
    Ok((descriptor, text.trim_end().to_string()))
}

pub fn prefetched_from_file(path: &Path) -> Result<(IndexDescriptor, String)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading page file {}", path.display()))?;
    parse_prefetched(&content)
}

/// Serializes a page into the pre-fetched file format.
pub fn write_prefetched_file(
    descriptor: &IndexDescriptor,
    text: &str,
    path: &Path,
) -> Result<()> {
    let line = serde_json::to_string(descriptor).context("serializing descriptor")?;
    std::fs::write(path, format!("{}\n{}\n", line, text))
        .with_context(|| format!("writing page file {}", path.display()))?;
    Ok(())
}

/// Spawns export workers that download every relevant page referenced by an
/// index directory into `output_dir`, one `W<worker>-<n>.txt` file per page.
/// The produced files feed the file pipeline variant later. The caller
/// awaits the returned handles.
pub fn run_export_workers(
    filter: Arc<RelevanceFilter>,
    num_workers: usize,
    directory: &Path,
    output_dir: &Path,
) -> Vec<JoinHandle<usize>> {
    let files = files_in_dir(directory);
    let partitions = match divide_work(&files, num_workers) {
        Some(partitions) => partitions,
        None => {
            tracing::warn!("Nothing to export from {}", directory.display());
            return Vec::new();
        }
    };

    partitions
        .into_iter()
        .enumerate()
        .map(|(worker_id, partition)| {
            let filter = filter.clone();
            let output_dir = output_dir.to_path_buf();
            tokio::spawn(async move {
                export_worker(filter, worker_id, partition, output_dir).await
            })
        })
        .collect()
}

async fn export_worker(
    filter: Arc<RelevanceFilter>,
    worker_id: usize,
    files: Vec<PathBuf>,
    output_dir: PathBuf,
) -> usize {
    let mut written = 0usize;

    for file in files {
        for (descriptor, _occurrence) in filter.relevant_descriptors_from_file(&file).await {
            let text = filter.downloader().fetch_text(&descriptor).await;
            if text.is_empty() {
                continue;
            }

            let target = output_dir.join(format!("W{}-{}.txt", worker_id, written));
            match write_prefetched_file(&descriptor, &text, &target) {
                Ok(()) => written += 1,
                Err(err) => tracing::error!("Failed to write {}: {}", target.display(), err),
            }
        }
    }

    tracing::info!("Export worker {} wrote {} pages", worker_id, written);
    written
}
