use crate::classify::CategoryProbabilities;
use crate::gathering::IndexDescriptor;

/// Boundary to the place-relation graph store.
///
/// The four store operations are batched upserts; digests are the join key
/// between them. All slices passed to a digest-keyed operation must have
/// equal length; implementations reject mismatched batches instead of
/// guessing an alignment.
pub trait RelationStore: Send + Sync {
    /// Whether a persisting run may start.
    fn connected(&self) -> bool;

    fn store_indices(&self, descriptors: &[IndexDescriptor]) -> bool;

    fn store_occurrences(&self, digests: &[String], occurrences: &[Vec<String>]) -> bool;

    fn store_probabilities(
        &self,
        digests: &[String],
        probabilities: &[CategoryProbabilities],
    ) -> bool;

    fn store_topics(&self, digests: &[String], topics: &[Vec<String>]) -> bool;
}

/// Sink for log-only runs: reports what would be stored and succeeds.
#[derive(Debug, Default)]
pub struct LogOnlyStore;

impl RelationStore for LogOnlyStore {
    fn connected(&self) -> bool {
        true
    }

    fn store_indices(&self, descriptors: &[IndexDescriptor]) -> bool {
        tracing::info!("Would store {} descriptors", descriptors.len());
        true
    }

    fn store_occurrences(&self, digests: &[String], occurrences: &[Vec<String>]) -> bool {
        for (digest, places) in digests.iter().zip(occurrences) {
            tracing::info!("Document {} mentions {:?}", digest, places);
        }
        true
    }

    fn store_probabilities(
        &self,
        digests: &[String],
        probabilities: &[CategoryProbabilities],
    ) -> bool {
        tracing::info!(
            "Would store probabilities for {} documents ({} maps)",
            digests.len(),
            probabilities.len()
        );
        true
    }

    fn store_topics(&self, digests: &[String], topics: &[Vec<String>]) -> bool {
        for (digest, categories) in digests.iter().zip(topics) {
            tracing::info!("Document {} filed under {:?}", digest, categories);
        }
        true
    }
}
