//! Multi-Pattern Automaton
//!
//! Aho-Corasick style automaton over the place-name vocabulary: a trie with
//! failure links, built once in time linear in the total vocabulary length.
//! Scanning visits each character of the input exactly once and reports
//! every pattern ending at that position, overlaps included. The structure
//! is immutable after `build` and safe to share across workers.

use super::types::PatternMatch;
use std::collections::{HashMap, VecDeque};

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    fail: usize,
    /// Pattern indices terminating at this state. The node's own pattern
    /// comes first, followed by patterns that are proper suffixes of it.
    outputs: Vec<usize>,
}

#[derive(Debug)]
pub struct Automaton {
    patterns: Vec<String>,
    nodes: Vec<Node>,
}

impl Automaton {
    /// Compiles the vocabulary. Empty patterns are ignored.
    pub fn build(patterns: Vec<String>) -> Self {
        let patterns: Vec<String> = patterns.into_iter().filter(|p| !p.is_empty()).collect();
        let mut nodes = vec![Node::default()];

        // Trie insertion
        for (index, pattern) in patterns.iter().enumerate() {
            let mut state = 0;
            for ch in pattern.chars() {
                state = match nodes[state].children.get(&ch) {
                    Some(&next) => next,
                    None => {
                        nodes.push(Node::default());
                        let next = nodes.len() - 1;
                        nodes[state].children.insert(ch, next);
                        next
                    }
                };
            }
            nodes[state].outputs.push(index);
        }

        // Failure links via BFS. Processing in breadth order means a node's
        // failure target is already finalized when its outputs are merged.
        let mut queue = VecDeque::new();
        let root_children: Vec<usize> = nodes[0].children.values().copied().collect();
        for child in root_children {
            nodes[child].fail = 0;
            queue.push_back(child);
        }

        while let Some(state) = queue.pop_front() {
            let children: Vec<(char, usize)> = nodes[state]
                .children
                .iter()
                .map(|(&ch, &next)| (ch, next))
                .collect();

            for (ch, next) in children {
                let mut fall = nodes[state].fail;
                let fail_target = loop {
                    if let Some(&candidate) = nodes[fall].children.get(&ch) {
                        break candidate;
                    }
                    if fall == 0 {
                        break 0;
                    }
                    fall = nodes[fall].fail;
                };

                nodes[next].fail = fail_target;
                let inherited = nodes[fail_target].outputs.clone();
                nodes[next].outputs.extend(inherited);
                queue.push_back(next);
            }
        }

        Self { patterns, nodes }
    }

    /// Scans `text` once and returns every raw match in left-to-right order
    /// of end position. Matches ending at the same position are reported
    /// longest first.
    pub fn find_matches(&self, text: &str) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut state = 0;

        for (position, ch) in text.char_indices() {
            state = self.step(state, ch);
            if self.nodes[state].outputs.is_empty() {
                continue;
            }
            let end = position + ch.len_utf8();
            for &pattern in &self.nodes[state].outputs {
                matches.push(PatternMatch {
                    start: end - self.patterns[pattern].len(),
                    end,
                    pattern,
                });
            }
        }

        matches
    }

    fn step(&self, mut state: usize, ch: char) -> usize {
        loop {
            if let Some(&next) = self.nodes[state].children.get(&ch) {
                return next;
            }
            if state == 0 {
                return 0;
            }
            state = self.nodes[state].fail;
        }
    }

    pub fn pattern(&self, index: usize) -> &str {
        &self.patterns[index]
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
