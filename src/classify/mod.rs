//! Classification Module
//!
//! Boundary to the topical classifier. The trained model itself is an
//! external collaborator; this module defines the probability interface the
//! pipeline consumes, the threshold rule selecting categories from a
//! probability map, and a keyword-frequency implementation so the pipeline
//! can run without an external model service.

pub mod classifier;
pub mod keyword;
pub mod types;

pub use classifier::{categories_above, Classifier, FALLBACK_CATEGORY};
pub use keyword::KeywordClassifier;
pub use types::{CategoryProbabilities, ClassificationResult};
