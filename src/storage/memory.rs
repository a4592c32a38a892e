use super::graph::RelationStore;
use crate::classify::CategoryProbabilities;
use crate::gathering::IndexDescriptor;
use crate::matching::Occurrence;
use dashmap::DashMap;

/// One stored document, assembled across the batched store calls. The
/// digest is the map key; fields fill in as the matching batch operations
/// arrive.
#[derive(Debug, Clone, Default)]
pub struct DocumentRecord {
    pub descriptor: Option<IndexDescriptor>,
    pub places: Vec<String>,
    pub probabilities: CategoryProbabilities,
    pub topics: Vec<String>,
}

/// One weighted place-pair relation. Weight counts the documents in which
/// the pair co-occurred.
#[derive(Debug, Clone, Default)]
pub struct RelationEntry {
    pub weight: usize,
    pub documents: Vec<String>,
}

/// In-memory relation graph used by tests, dry runs and the relations API.
/// `DashMap` keeps the per-consumer flushes lock-free against each other.
#[derive(Debug, Default)]
pub struct InMemoryRelationStore {
    documents: DashMap<String, DocumentRecord>,
    relations: DashMap<(String, String), RelationEntry>,
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    pub fn document(&self, digest: &str) -> Option<DocumentRecord> {
        self.documents.get(digest).map(|entry| entry.value().clone())
    }

    /// Weight of the relation between two places, in either order.
    pub fn relation_weight(&self, place_a: &str, place_b: &str) -> usize {
        self.relations
            .get(&relation_key(place_a, place_b))
            .map(|entry| entry.weight)
            .unwrap_or(0)
    }

    /// Digests of documents supporting the relation between two places.
    pub fn related_documents(&self, place_a: &str, place_b: &str, limit: usize) -> Vec<String> {
        self.relations
            .get(&relation_key(place_a, place_b))
            .map(|entry| entry.documents.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

impl RelationStore for InMemoryRelationStore {
    fn connected(&self) -> bool {
        true
    }

    fn store_indices(&self, descriptors: &[IndexDescriptor]) -> bool {
        for descriptor in descriptors {
            let mut record = self.documents.entry(descriptor.digest_key()).or_default();
            record.descriptor = Some(descriptor.clone());
        }
        true
    }

    fn store_occurrences(&self, digests: &[String], occurrences: &[Vec<String>]) -> bool {
        if digests.len() != occurrences.len() {
            tracing::error!(
                "Occurrence batch mismatch: {} digests, {} occurrences",
                digests.len(),
                occurrences.len()
            );
            return false;
        }

        for (digest, places) in digests.iter().zip(occurrences) {
            {
                let mut record = self.documents.entry(digest.clone()).or_default();
                record.places = places.clone();
            }

            for (place_a, place_b) in Occurrence::new(places.clone()).pairs() {
                let mut relation = self
                    .relations
                    .entry(relation_key(&place_a, &place_b))
                    .or_default();
                relation.weight += 1;
                relation.documents.push(digest.clone());
            }
        }
        true
    }

    fn store_probabilities(
        &self,
        digests: &[String],
        probabilities: &[CategoryProbabilities],
    ) -> bool {
        if digests.len() != probabilities.len() {
            tracing::error!(
                "Probability batch mismatch: {} digests, {} maps",
                digests.len(),
                probabilities.len()
            );
            return false;
        }

        for (digest, map) in digests.iter().zip(probabilities) {
            let mut record = self.documents.entry(digest.clone()).or_default();
            record.probabilities = map.clone();
        }
        true
    }

    fn store_topics(&self, digests: &[String], topics: &[Vec<String>]) -> bool {
        if digests.len() != topics.len() {
            tracing::error!(
                "Topic batch mismatch: {} digests, {} topic lists",
                digests.len(),
                topics.len()
            );
            return false;
        }

        for (digest, categories) in digests.iter().zip(topics) {
            let mut record = self.documents.entry(digest.clone()).or_default();
            record.topics = categories.clone();
        }
        true
    }
}

/// Relations are undirected; the key is the pair in lexical order.
fn relation_key(place_a: &str, place_b: &str) -> (String, String) {
    if place_a <= place_b {
        (place_a.to_string(), place_b.to_string())
    } else {
        (place_b.to_string(), place_a.to_string())
    }
}
