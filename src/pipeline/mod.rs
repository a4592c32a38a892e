//! Pipeline Orchestration Module
//!
//! The producer/consumer engine that drives index retrieval, relevance
//! filtering, classification and batched persistence.
//!
//! ## Architecture Overview
//! 1. **Partitioning**: the index files of a directory are divided evenly
//!    across P producer workers (`partitioner`).
//! 2. **Production**: each producer lists descriptors per file, fetches page
//!    text, runs the place matcher, and pushes a `WorkItem` for every
//!    relevant page onto the shared FIFO `WorkQueue`. A producer exits when
//!    its partition is exhausted.
//! 3. **Consumption**: C consumer workers pop items with a short bounded
//!    wait, classify the page, and accumulate results in private batches
//!    flushed to storage at the commit threshold.
//! 4. **Two-phase shutdown**: the orchestrator joins all producers, only
//!    then raises the producers-done signal, then joins all consumers. A
//!    consumer exits only when the queue is empty *and* the signal is set,
//!    so an item in flight inside a slow producer can never be stranded.
//!    One unconditional flush at consumer exit delivers the tail batch.
//!
//! The file pipeline variant replaces step 1-2 with a single reader that
//! streams pre-fetched page files onto the queue; it signals completion
//! through a separate flag so the two variants cannot deadlock each other
//! if combined.
//!
//! ## Submodules
//! - **`queue`**: The shared multi-producer/multi-consumer FIFO.
//! - **`partitioner`**: Even division of work units across workers.
//! - **`batch`**: Per-consumer result accumulators and the flush rule.
//! - **`orchestrator`**: Worker lifecycles, completion signals, shutdown.
//! - **`types`**: The `WorkItem` queue payload.

pub mod batch;
pub mod orchestrator;
pub mod partitioner;
pub mod queue;
pub mod types;

pub use orchestrator::{CompletionSignals, PipelineOrchestrator, SourceMode};
pub use queue::WorkQueue;
pub use types::WorkItem;
