use crate::classify::ClassificationResult;
use crate::gathering::IndexDescriptor;
use crate::storage::RelationStore;

/// Private result accumulators of one consumer. The four lists grow in
/// lockstep (one entry per accepted page) and flush together, so a
/// descriptor is never visible in storage without its occurrence and
/// classification data.
#[derive(Debug, Default)]
pub struct ResultBatch {
    descriptors: Vec<IndexDescriptor>,
    digests: Vec<String>,
    occurrences: Vec<Vec<String>>,
    classifications: Vec<ClassificationResult>,
}

impl ResultBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn push(
        &mut self,
        descriptor: IndexDescriptor,
        places: Vec<String>,
        classification: ClassificationResult,
    ) {
        self.digests.push(descriptor.digest_key());
        self.descriptors.push(descriptor);
        self.occurrences.push(places);
        self.classifications.push(classification);
    }

    /// Delivers the batch and clears the accumulators. A storage failure is
    /// logged and the batch is dropped all the same; there is no retry
    /// queue, a documented throughput trade-off.
    pub fn flush(&mut self, store: &dyn RelationStore) {
        let probabilities: Vec<_> = self
            .classifications
            .iter()
            .map(|classification| classification.probabilities.clone())
            .collect();
        let topics: Vec<_> = self
            .classifications
            .iter()
            .map(|classification| classification.categories.clone())
            .collect();

        let delivered = store.store_indices(&self.descriptors)
            && store.store_occurrences(&self.digests, &self.occurrences)
            && store.store_probabilities(&self.digests, &probabilities)
            && store.store_topics(&self.digests, &topics);

        if !delivered {
            tracing::error!("Storage flush failed, dropping batch of {}", self.len());
        } else if !self.is_empty() {
            tracing::debug!("Flushed batch of {}", self.len());
        }

        self.descriptors.clear();
        self.digests.clear();
        self.occurrences.clear();
        self.classifications.clear();
    }
}
