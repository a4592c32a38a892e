//! Storage Module
//!
//! The persistence boundary of the pipeline. Consumers hand over batches of
//! descriptors, place occurrences, category probabilities and selected
//! topics; implementations turn them into weighted place-pair relations.
//!
//! ## Core Concepts
//! - **Batched upserts**: the four store operations are called together per
//!   flush so a descriptor is never visible without its occurrence and
//!   classification data.
//! - **Boolean contract**: each operation reports success as a plain bool;
//!   the pipeline logs failures and drops the batch rather than retrying.
//! - **Gating**: `connected()` decides whether a persisting run may start.
//!
//! The remote graph database lives behind the `RelationStore` trait; this
//! crate ships an in-memory implementation used by tests, dry runs and the
//! relations API, plus a log-only sink for pure filtering runs.

pub mod graph;
pub mod memory;

pub use graph::{LogOnlyStore, RelationStore};
pub use memory::InMemoryRelationStore;
