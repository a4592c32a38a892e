//! Keyword-Frequency Classifier
//!
//! Fallback classifier used when no external model service is configured.
//! Each category owns a keyword list; a page's probability per category is
//! that category's share of all keyword hits in the text. Not a trained
//! model, but it keeps the full pipeline runnable and is deterministic,
//! which the tests rely on.

use super::classifier::Classifier;
use super::types::CategoryProbabilities;
use regex::Regex;
use std::collections::HashMap;

pub struct KeywordClassifier {
    keyword_sets: HashMap<String, Vec<String>>,
    words: Regex,
}

impl KeywordClassifier {
    pub fn new(keyword_sets: HashMap<String, Vec<String>>) -> Self {
        let keyword_sets = keyword_sets
            .into_iter()
            .map(|(category, keywords)| {
                let keywords = keywords
                    .into_iter()
                    .map(|keyword| keyword.to_lowercase())
                    .collect();
                (category, keywords)
            })
            .collect();

        Self {
            keyword_sets,
            words: Regex::new(r"\b[a-zA-Z]+\b").expect("static pattern"),
        }
    }

    pub fn with_default_vocabulary() -> Self {
        Self::new(default_keyword_sets())
    }

    pub fn categories(&self) -> Vec<String> {
        self.keyword_sets.keys().cloned().collect()
    }
}

impl Classifier for KeywordClassifier {
    fn probabilities(&self, text: &str) -> CategoryProbabilities {
        let lowered = text.to_lowercase();
        let mut hits: HashMap<&String, usize> = HashMap::new();
        let mut total = 0usize;

        for token in self.words.find_iter(&lowered) {
            for (category, keywords) in &self.keyword_sets {
                if keywords.iter().any(|keyword| keyword == token.as_str()) {
                    *hits.entry(category).or_insert(0) += 1;
                    total += 1;
                }
            }
        }

        self.keyword_sets
            .keys()
            .map(|category| {
                let count = hits.get(category).copied().unwrap_or(0);
                let probability = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                };
                (category.clone(), probability)
            })
            .collect()
    }
}

/// Relation categories with a starter keyword list each, Dutch-leaning to
/// match the default place vocabulary.
pub fn default_keyword_sets() -> HashMap<String, Vec<String>> {
    let sets: [(&str, &[&str]); 6] = [
        (
            "commuting",
            &["forens", "forenzen", "woonwerkverkeer", "commute", "pendelen"],
        ),
        (
            "shopping",
            &["winkel", "winkelen", "markt", "kopen", "shopping"],
        ),
        (
            "leisure",
            &["recreatie", "festival", "museum", "concert", "vakantie"],
        ),
        (
            "education",
            &["universiteit", "school", "student", "onderwijs", "hogeschool"],
        ),
        (
            "collaboration",
            &["samenwerking", "gemeente", "overeenkomst", "akkoord", "partners"],
        ),
        (
            "transportation",
            &["trein", "bus", "spoor", "station", "snelweg", "vervoer"],
        ),
    ];

    sets.iter()
        .map(|(category, keywords)| {
            (
                category.to_string(),
                keywords.iter().map(|keyword| keyword.to_string()).collect(),
            )
        })
        .collect()
}
