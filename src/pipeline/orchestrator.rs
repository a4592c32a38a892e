//! Pipeline Orchestrator
//!
//! Spawns and joins the producer and consumer workers and owns the
//! completion signals. The shutdown ordering is the heart of the at-least-
//! once guarantee: producers are joined before the done signal is raised,
//! and consumers never exit on a single empty queue observation, since an empty
//! queue while the signal is down only means a producer is still mid-flight.

use super::batch::ResultBatch;
use super::partitioner::divide_work;
use super::queue::WorkQueue;
use super::types::WorkItem;
use crate::classify::{categories_above, ClassificationResult, Classifier};
use crate::config::PipelineConfig;
use crate::gathering::downloader::PageDownloader;
use crate::gathering::prefetch::prefetched_from_file;
use crate::gathering::selector::files_in_dir;
use crate::gathering::indices;
use crate::matching::PlaceMatcher;
use crate::storage::RelationStore;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Which producer family feeds the consumers of a run. The two families
/// complete independently, through separate signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Index producers: descriptors from index files, text fetched twice.
    Index,
    /// The file reader: pre-fetched page files streamed onto the queue.
    Prefetched,
}

/// The two cross-worker completion flags, owned by the orchestrator
/// instance. Kept as explicit shared state (not globals) so a finished run
/// can clear them and the instance stays reusable.
#[derive(Debug, Default)]
pub struct CompletionSignals {
    producers_done: AtomicBool,
    file_producers_done: AtomicBool,
}

impl CompletionSignals {
    pub fn producers_done(&self) -> bool {
        self.producers_done.load(Ordering::SeqCst)
    }

    pub fn set_producers_done(&self) {
        self.producers_done.store(true, Ordering::SeqCst);
    }

    pub fn clear_producers_done(&self) {
        self.producers_done.store(false, Ordering::SeqCst);
    }

    pub fn file_producers_done(&self) -> bool {
        self.file_producers_done.load(Ordering::SeqCst)
    }

    pub fn set_file_producers_done(&self) {
        self.file_producers_done.store(true, Ordering::SeqCst);
    }

    pub fn clear_file_producers_done(&self) {
        self.file_producers_done.store(false, Ordering::SeqCst);
    }

    fn done_for(&self, source: SourceMode) -> bool {
        match source {
            SourceMode::Index => self.producers_done(),
            SourceMode::Prefetched => self.file_producers_done(),
        }
    }
}

/// The engine driving a crawl-filter-classify run.
pub struct PipelineOrchestrator {
    downloader: Arc<PageDownloader>,
    matcher: Arc<PlaceMatcher>,
    classifier: Arc<dyn Classifier>,
    config: PipelineConfig,
    signals: CompletionSignals,
}

impl PipelineOrchestrator {
    pub fn new(
        downloader: Arc<PageDownloader>,
        matcher: Arc<PlaceMatcher>,
        classifier: Arc<dyn Classifier>,
        config: PipelineConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            downloader,
            matcher,
            classifier,
            config,
            signals: CompletionSignals::default(),
        })
    }

    pub fn signals(&self) -> &CompletionSignals {
        &self.signals
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Spawns `count` producers over the index files of `directory`. The
    /// files are divided evenly; a producer exits when its partition is
    /// exhausted. An empty directory or a zero count spawns nothing.
    pub fn run_producers(
        self: &Arc<Self>,
        count: usize,
        directory: &Path,
        queue: &Arc<WorkQueue>,
    ) -> Vec<JoinHandle<()>> {
        let files = files_in_dir(directory);
        let partitions = match divide_work(&files, count) {
            Some(partitions) => partitions,
            None => {
                tracing::warn!(
                    "No producers started for {} ({} files, {} workers)",
                    directory.display(),
                    files.len(),
                    count
                );
                return Vec::new();
            }
        };

        tracing::info!(
            "Starting {} producers over {} index files",
            count,
            files.len()
        );

        partitions
            .into_iter()
            .enumerate()
            .map(|(worker_id, partition)| {
                let orchestrator = self.clone();
                let queue = queue.clone();
                tokio::spawn(async move {
                    orchestrator.index_producer(worker_id, partition, queue).await;
                })
            })
            .collect()
    }

    /// Spawns `count` classifying consumers against the queue. Consumers
    /// poll with a bounded wait and exit only when the queue is empty and
    /// the matching done signal is set.
    pub fn run_consumers(
        self: &Arc<Self>,
        count: usize,
        queue: &Arc<WorkQueue>,
        threshold: f64,
        store: Arc<dyn RelationStore>,
        source: SourceMode,
    ) -> Vec<JoinHandle<()>> {
        tracing::info!("Starting {} consumers", count);

        (0..count)
            .map(|worker_id| {
                let orchestrator = self.clone();
                let queue = queue.clone();
                let store = store.clone();
                tokio::spawn(async move {
                    orchestrator
                        .classifying_worker(worker_id, queue, threshold, store, source)
                        .await;
                })
            })
            .collect()
    }

    /// Spawns the single reader streaming pre-fetched page files onto the
    /// queue. Completion is reported through the file-producers signal.
    pub fn run_file_reader(
        self: &Arc<Self>,
        directory: &Path,
        queue: &Arc<WorkQueue>,
    ) -> Vec<JoinHandle<()>> {
        let files = files_in_dir(directory);
        if files.is_empty() {
            tracing::warn!("No page files in {}", directory.display());
            return Vec::new();
        }

        tracing::info!("Starting file reader over {} page files", files.len());

        let orchestrator = self.clone();
        let queue = queue.clone();
        vec![tokio::spawn(async move {
            orchestrator.file_reader(files, queue).await;
        })]
    }

    /// The two-phase shutdown for index runs. Joining producers *before*
    /// raising the signal is mandatory: raised early, a consumer could see
    /// an empty queue and exit while a producer still holds items in
    /// flight. The signal is cleared afterwards so the instance is
    /// reusable.
    pub async fn join_and_signal(
        &self,
        producers: Vec<JoinHandle<()>>,
        consumers: Vec<JoinHandle<()>>,
    ) {
        for producer in producers {
            if let Err(err) = producer.await {
                tracing::error!("Producer worker crashed: {}", err);
            }
        }
        self.signals.set_producers_done();

        for consumer in consumers {
            if let Err(err) = consumer.await {
                tracing::error!("Consumer worker crashed: {}", err);
            }
        }
        self.signals.clear_producers_done();
    }

    /// The same join protocol for the file pipeline, over its own signal.
    pub async fn join_file_workers(
        &self,
        producers: Vec<JoinHandle<()>>,
        consumers: Vec<JoinHandle<()>>,
    ) {
        for producer in producers {
            if let Err(err) = producer.await {
                tracing::error!("File reader crashed: {}", err);
            }
        }
        self.signals.set_file_producers_done();

        for consumer in consumers {
            if let Err(err) = consumer.await {
                tracing::error!("Consumer worker crashed: {}", err);
            }
        }
        self.signals.clear_file_producers_done();
    }

    /// One producer: walk the partition's index files, fetch each usable
    /// descriptor's page, and enqueue the relevant ones. Fetch failures
    /// degrade single items and never end the worker.
    async fn index_producer(&self, worker_id: usize, files: Vec<PathBuf>, queue: Arc<WorkQueue>) {
        let mut accepted = 0usize;

        for file in files {
            let descriptors = match indices::descriptors_from_file(&file) {
                Ok(descriptors) => descriptors,
                Err(err) => {
                    tracing::error!(
                        "Producer {}: file {} doesn't contain usable indices: {}",
                        worker_id,
                        file.display(),
                        err
                    );
                    continue;
                }
            };

            for descriptor in descriptors {
                let text = self.downloader.fetch_text(&descriptor).await;
                if text.is_empty() {
                    continue;
                }

                if let Some(occurrence) = self.matcher.find(&text) {
                    tracing::debug!(
                        "Producer {}: {} is relevant ({} places)",
                        worker_id,
                        descriptor.digest_key(),
                        occurrence.len()
                    );
                    queue.push(WorkItem::Indexed {
                        descriptor,
                        occurrence,
                    });
                    accepted += 1;
                }
            }
        }

        tracing::info!("Producer {} done, {} relevant pages", worker_id, accepted);
    }

    /// The single reader of the file pipeline variant.
    async fn file_reader(&self, files: Vec<PathBuf>, queue: Arc<WorkQueue>) {
        let mut streamed = 0usize;

        for file in files {
            match prefetched_from_file(&file) {
                Ok((descriptor, text)) => {
                    queue.push(WorkItem::Prefetched { descriptor, text });
                    streamed += 1;
                }
                Err(err) => {
                    tracing::warn!("Skipping page file {}: {}", file.display(), err);
                }
            }
        }

        tracing::info!("File reader done, {} pages streamed", streamed);
    }

    /// One consumer: bounded-wait pop, classify, accumulate, flush at the
    /// commit threshold. Exit requires the queue empty *and* the done
    /// signal; a single empty pop only triggers the next poll. One final
    /// unconditional flush delivers whatever the batch still holds.
    async fn classifying_worker(
        &self,
        worker_id: usize,
        queue: Arc<WorkQueue>,
        threshold: f64,
        store: Arc<dyn RelationStore>,
        source: SourceMode,
    ) {
        let mut batch = ResultBatch::new();
        let mut handled = 0usize;

        loop {
            match queue.try_pop() {
                Some(item) => {
                    self.classify_item(item, threshold, &mut batch).await;
                    handled += 1;

                    if batch.len() >= self.config.commit_threshold {
                        batch.flush(store.as_ref());
                    }
                }
                None => {
                    if queue.is_empty() && self.signals.done_for(source) {
                        break;
                    }
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }

        batch.flush(store.as_ref());
        tracing::info!("Consumer {} done, {} pages classified", worker_id, handled);
    }

    /// Turns one dequeued item into a batch entry. Index items are fetched
    /// again for their text; pre-fetched items re-derive their occurrence
    /// locally.
    async fn classify_item(&self, item: WorkItem, threshold: f64, batch: &mut ResultBatch) {
        let (descriptor, places, text) = match item {
            WorkItem::Indexed {
                descriptor,
                occurrence,
            } => {
                let text = self.downloader.fetch_text(&descriptor).await;
                if text.is_empty() {
                    tracing::warn!(
                        "No text for {} at classification time",
                        descriptor.digest_key()
                    );
                }
                (descriptor, occurrence.places, text)
            }
            WorkItem::Prefetched { descriptor, text } => {
                let places = self
                    .matcher
                    .find(&text)
                    .map(|occurrence| occurrence.places)
                    .unwrap_or_default();
                (descriptor, places, text)
            }
        };

        let probabilities = self.classifier.probabilities(&text);
        let categories = categories_above(&probabilities, threshold);

        batch.push(
            descriptor,
            places,
            ClassificationResult {
                probabilities,
                categories,
            },
        );
    }
}
