//! Co-Occurrence Matcher
//!
//! `PlaceMatcher` wraps the compiled automaton with the resolution pass that
//! turns raw overlapping hits into a clean `Occurrence`:
//! 1. A hit embedded in a larger ordinary word is dropped (the adjacent
//!    character is a lowercase letter, e.g. "Amsterdam" inside
//!    "Amsterdammers").
//! 2. Two consecutive hits overlapping in span collapse to the longer place
//!    name ("Amsterdam Zuidoost" wins over "Amsterdam").
//! 3. Survivors are de-duplicated preserving first-seen order.
//!
//! Pages with fewer than two surviving places, or more than the configured
//! cap (directory-style pages mentioning everything), yield no result.

use super::automaton::Automaton;
use super::types::{Occurrence, PatternMatch};

pub const DEFAULT_MAX_OCCURRENCES: usize = 25;

#[derive(Debug)]
pub struct PlaceMatcher {
    automaton: Automaton,
    max_occurrences: usize,
}

impl PlaceMatcher {
    /// Compiles the vocabulary with the default low-signal cap.
    pub fn new(places: Vec<String>) -> Self {
        Self::new_with_cap(places, DEFAULT_MAX_OCCURRENCES)
    }

    pub fn new_with_cap(places: Vec<String>, max_occurrences: usize) -> Self {
        Self {
            automaton: Automaton::build(places),
            max_occurrences,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.automaton.pattern_count()
    }

    /// Scans `text` and returns the resolved occurrence, or `None` when the
    /// page is not relevant: fewer than 2 distinct places, or more than the
    /// cap (low-signal page). Matching is case-sensitive.
    pub fn find(&self, text: &str) -> Option<Occurrence> {
        let raw = self.automaton.find_matches(text);
        let places = self.resolve(text, raw);

        if places.len() < 2 || places.len() > self.max_occurrences {
            return None;
        }

        Some(Occurrence::new(places))
    }

    /// The forward resolution pass. Walks matches pairwise; an overlapping
    /// pair is consumed together and only the longer name kept. The
    /// one-step lookahead means a three-way overlap can retain an already
    /// superseded shorter match; that behavior is intentional and kept.
    fn resolve(&self, text: &str, raw: Vec<PatternMatch>) -> Vec<String> {
        let survivors: Vec<PatternMatch> = raw
            .into_iter()
            .filter(|hit| !embedded_in_word(text, hit))
            .collect();

        let mut places: Vec<String> = Vec::new();
        let mut index = 0;
        while index < survivors.len() {
            let current = &survivors[index];
            let next = survivors.get(index + 1);

            match next {
                // Overlapping pair: keep the longer name, consume both.
                Some(following) if following.start < current.end => {
                    let longer = if span(following) > span(current) {
                        following
                    } else {
                        current
                    };
                    push_unique(&mut places, self.automaton.pattern(longer.pattern));
                    index += 2;
                }
                _ => {
                    push_unique(&mut places, self.automaton.pattern(current.pattern));
                    index += 1;
                }
            }
        }

        places
    }
}

fn span(hit: &PatternMatch) -> usize {
    hit.end - hit.start
}

/// A place name is only a real mention when it stands on a word boundary.
/// A lowercase letter on either side means the name is a substring of a
/// larger ordinary word ("Amsterdamse", "Rotterdammers").
fn embedded_in_word(text: &str, hit: &PatternMatch) -> bool {
    let before = text[..hit.start].chars().next_back();
    let after = text[hit.end..].chars().next();
    before.is_some_and(|ch| ch.is_lowercase()) || after.is_some_and(|ch| ch.is_lowercase())
}

fn push_unique(places: &mut Vec<String>, name: &str) {
    if !places.iter().any(|existing| existing == name) {
        places.push(name.to_string());
    }
}
