use serde::{Deserialize, Serialize};

/// The resolved set of place names found in one page.
///
/// Order-preserving (first mention first), de-duplicated and overlap-free.
/// A page is relevant only when at least two places survive resolution, so
/// an `Occurrence` held by a `WorkItem` always has length >= 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub places: Vec<String>,
}

impl Occurrence {
    pub fn new(places: Vec<String>) -> Self {
        Self { places }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// All unordered distinct pairs in first-seen order. These are the
    /// relation edges a page contributes to the graph.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, a) in self.places.iter().enumerate() {
            for b in self.places.iter().skip(i + 1) {
                pairs.push((a.clone(), b.clone()));
            }
        }
        pairs
    }
}

/// One raw automaton hit before resolution. Byte offsets into the scanned
/// text; `end` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
    /// Index into the vocabulary the automaton was built from.
    pub pattern: usize,
}
