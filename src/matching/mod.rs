//! Place Matching Module
//!
//! The co-occurrence detector. A page is relevant to the relation graph when
//! its text mentions at least two distinct places from the controlled
//! vocabulary; this module decides that, fast, for full page bodies against
//! thousands of candidate names.
//!
//! ## Overview
//! The vocabulary is compiled once into a multi-pattern automaton
//! (`automaton`), linear in total vocabulary length. Scanning a page is a
//! single forward pass producing every raw match, including overlaps; a
//! resolution pass (`matcher`) then drops mentions embedded in larger words,
//! collapses overlapping matches to the longer place name, and de-duplicates
//! while preserving first-seen order.
//!
//! ## Submodules
//! - **`automaton`**: The trie-with-failure-links pattern automaton.
//! - **`matcher`**: The `PlaceMatcher` facade with the resolution pass.
//! - **`types`**: `Occurrence` and the raw match representation.

pub mod automaton;
pub mod matcher;
pub mod types;

pub use matcher::PlaceMatcher;
pub use types::Occurrence;

#[cfg(test)]
mod tests;
