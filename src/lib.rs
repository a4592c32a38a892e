//! Citygraph Pipeline Library
//!
//! This library crate defines the core modules of the crawl-filter-classify
//! system. It serves as the foundation for the server binary (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of six loosely coupled subsystems:
//!
//! - **`matching`**: The co-occurrence detector. A multi-pattern string
//!   automaton built from the place-name vocabulary that finds pages
//!   mentioning at least two distinct places.
//! - **`gathering`**: The data intake layer. Parses crawl-index files,
//!   downloads archived page slices over HTTP, and reduces them to plain
//!   text ready for matching and classification.
//! - **`pipeline`**: The producer/consumer orchestration engine. Partitions
//!   index files across producer workers, routes relevant pages through a
//!   shared queue to classifying consumers, and enforces the two-phase
//!   shutdown that guarantees every accepted page is flushed to storage.
//! - **`classify`**: The classifier boundary. Defines the category
//!   probability interface and threshold selection, plus a keyword-frequency
//!   implementation for runs without an external model service.
//! - **`storage`**: The persistence boundary. Batched upserts of descriptors,
//!   occurrences, probabilities and topics into a place-relation graph, with
//!   an in-memory reference implementation.
//! - **`server`**: The thin HTTP API exposing pipeline runs and prediction.

pub mod classify;
pub mod config;
pub mod gathering;
pub mod matching;
pub mod pipeline;
pub mod server;
pub mod storage;
