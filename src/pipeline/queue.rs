use super::types::WorkItem;
use std::collections::VecDeque;
use std::sync::Mutex;

/// The shared FIFO between producers and consumers. The only shared mutable
/// resource in the pipeline; safe for concurrent multi-producer and
/// multi-consumer access. Pushes never block; consumers combine `try_pop`
/// with a short sleep instead of blocking indefinitely, so they can
/// re-check the completion signal between polls.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<WorkItem>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: WorkItem) {
        self.items.lock().expect("queue lock").push_back(item);
    }

    pub fn try_pop(&self) -> Option<WorkItem> {
        self.items.lock().expect("queue lock").pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.lock().expect("queue lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().expect("queue lock").is_empty()
    }
}
