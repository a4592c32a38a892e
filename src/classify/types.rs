use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category name mapped to a probability in `[0, 1]`.
pub type CategoryProbabilities = HashMap<String, f64>;

/// The classifier output kept for one page: the full probability map plus
/// the categories that cleared the selection threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub probabilities: CategoryProbabilities,
    pub categories: Vec<String>,
}
