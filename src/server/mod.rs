//! HTTP API Module
//!
//! Thin axum layer over the pipeline. The handlers translate query
//! parameters into orchestrator runs and report success once the join
//! protocol completes; individual pages failing softly underneath does not
//! change the outcome of a run.

pub mod handlers;
pub mod types;
