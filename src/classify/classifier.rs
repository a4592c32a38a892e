use super::types::CategoryProbabilities;

/// Category reported when no probability clears the threshold.
pub const FALLBACK_CATEGORY: &str = "Other";

/// The external classifier boundary. Implementations map page text to a
/// probability per relation category. They must be cheap to share across
/// consumer workers.
pub trait Classifier: Send + Sync {
    fn probabilities(&self, text: &str) -> CategoryProbabilities;
}

/// Selects every category whose probability is at least `threshold`,
/// strongest first. When nothing qualifies the page is filed under
/// [`FALLBACK_CATEGORY`].
pub fn categories_above(probabilities: &CategoryProbabilities, threshold: f64) -> Vec<String> {
    let mut selected: Vec<(&String, f64)> = probabilities
        .iter()
        .filter(|(_, &probability)| probability >= threshold)
        .map(|(category, &probability)| (category, probability))
        .collect();

    if selected.is_empty() {
        return vec![FALLBACK_CATEGORY.to_string()];
    }

    // Strongest first; names break ties so the output is deterministic.
    selected.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    selected
        .into_iter()
        .map(|(category, _)| category.clone())
        .collect()
}
