use crate::gathering::IndexDescriptor;
use crate::matching::Occurrence;

/// One unit of work on the shared queue. Pushed by exactly one producer,
/// consumed by exactly one consumer.
#[derive(Debug, Clone)]
pub enum WorkItem {
    /// Produced by an index producer: the page was fetched once to establish
    /// relevance; the consumer fetches it again for classification.
    Indexed {
        descriptor: IndexDescriptor,
        occurrence: Occurrence,
    },
    /// Produced by the file reader: page text is already local, the
    /// consumer re-derives the occurrence from it.
    Prefetched {
        descriptor: IndexDescriptor,
        text: String,
    },
}

impl WorkItem {
    pub fn descriptor(&self) -> &IndexDescriptor {
        match self {
            WorkItem::Indexed { descriptor, .. } => descriptor,
            WorkItem::Prefetched { descriptor, .. } => descriptor,
        }
    }
}
