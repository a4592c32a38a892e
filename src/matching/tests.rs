//! Matching Module Tests
//!
//! Covers the automaton scan, the resolution pass (embedded substrings,
//! overlap collapsing, ordering, de-duplication) and the relevance
//! thresholds of `PlaceMatcher::find`.

#[cfg(test)]
mod tests {
    use crate::matching::automaton::Automaton;
    use crate::matching::matcher::PlaceMatcher;
    use crate::matching::types::Occurrence;

    fn dutch_matcher() -> PlaceMatcher {
        PlaceMatcher::new(vec![
            "Amsterdam".to_string(),
            "Amsterdam Zuidoost".to_string(),
            "Den Haag".to_string(),
            "Rotterdam".to_string(),
        ])
    }

    // ============================================================
    // TEST 1: Automaton - raw matches
    // ============================================================

    #[test]
    fn test_automaton_reports_overlapping_matches() {
        let automaton = Automaton::build(vec!["Ee".to_string(), "Een".to_string()]);

        let matches = automaton.find_matches("Een dorp");

        // Both the short and the long pattern are reported.
        assert_eq!(matches.len(), 2);
        assert_eq!(automaton.pattern(matches[0].pattern), "Ee");
        assert_eq!(automaton.pattern(matches[1].pattern), "Een");
    }

    #[test]
    fn test_automaton_matches_are_ordered_by_end() {
        let automaton = Automaton::build(vec![
            "Amsterdam".to_string(),
            "Rotterdam".to_string(),
        ]);

        let matches = automaton.find_matches("Rotterdam ligt onder Amsterdam");

        assert_eq!(matches.len(), 2);
        assert!(matches[0].end < matches[1].end);
        assert_eq!(automaton.pattern(matches[0].pattern), "Rotterdam");
        assert_eq!(automaton.pattern(matches[1].pattern), "Amsterdam");
    }

    #[test]
    fn test_automaton_ignores_empty_patterns() {
        let automaton = Automaton::build(vec![String::new(), "Delft".to_string()]);

        assert_eq!(automaton.pattern_count(), 1);
        assert_eq!(automaton.find_matches("Delft").len(), 1);
    }

    // ============================================================
    // TEST 2: Relevance thresholds
    // ============================================================

    #[test]
    fn test_no_mention_is_not_relevant() {
        let matcher = dutch_matcher();
        assert_eq!(matcher.find("Er is hier niets te zien"), None);
    }

    #[test]
    fn test_single_occurrence_is_not_relevant() {
        let matcher = dutch_matcher();
        assert_eq!(matcher.find("Amsterdam"), None);
    }

    #[test]
    fn test_too_many_occurrences_is_low_signal() {
        // A directory-style page mentioning more places than the cap.
        let places: Vec<String> = (0..30).map(|i| format!("Stad{}", i)).collect();
        let text = places.join(" en ");
        let matcher = PlaceMatcher::new_with_cap(places, 25);

        assert_eq!(matcher.find(&text), None);
    }

    // ============================================================
    // TEST 3: Co-occurrences and ordering
    // ============================================================

    #[test]
    fn test_single_cooccurrence() {
        let matcher = dutch_matcher();

        let result = matcher.find("Amsterdam and Rotterdam are Dutch cities");

        assert_eq!(
            result,
            Some(Occurrence::new(vec![
                "Amsterdam".to_string(),
                "Rotterdam".to_string(),
            ]))
        );
    }

    #[test]
    fn test_multi_cooccurrence_preserves_order() {
        let matcher = dutch_matcher();

        let result = matcher
            .find("Rotterdam, Amsterdam and Den Haag are the three largest cities")
            .expect("three distinct places");

        assert_eq!(
            result.places,
            vec!["Rotterdam", "Amsterdam", "Den Haag"]
        );
    }

    #[test]
    fn test_duplicate_mentions_are_collapsed() {
        let matcher = dutch_matcher();

        let result = matcher
            .find("Amsterdam en Rotterdam en Amsterdam en Rotterdam")
            .expect("two distinct places");

        assert_eq!(result.places, vec!["Amsterdam", "Rotterdam"]);
    }

    // ============================================================
    // TEST 4: Overlap resolution
    // ============================================================

    #[test]
    fn test_leading_overlap_keeps_longer_name_only() {
        let matcher = dutch_matcher();

        // "Amsterdam" is part of "Amsterdam Zuidoost" and must not be
        // reported separately; one surviving place is not relevant.
        assert_eq!(matcher.find("Amsterdam Zuidoost is a city"), None);
    }

    #[test]
    fn test_trailing_overlap() {
        let matcher = dutch_matcher();

        let result = matcher
            .find("Rotterdam and Amsterdam Zuidoost are cities")
            .expect("two distinct places");

        assert_eq!(result.places, vec!["Rotterdam", "Amsterdam Zuidoost"]);
    }

    #[test]
    fn test_overlap_in_longer_enumeration() {
        let matcher = dutch_matcher();

        let result = matcher
            .find(
                "The following cities are related: Rotterdam, Den Haag, \
                 Amsterdam and Amsterdam Zuidoost.",
            )
            .expect("four distinct places");

        assert_eq!(
            result.places,
            vec!["Rotterdam", "Den Haag", "Amsterdam", "Amsterdam Zuidoost"]
        );
    }

    // ============================================================
    // TEST 5: Embedded substrings
    // ============================================================

    #[test]
    fn test_exclude_embedded_substrings() {
        let matcher = dutch_matcher();

        // Both names only appear inside larger words; the final standalone
        // "Amsterdam" is a single mention and not relevant on its own.
        assert_eq!(
            matcher.find("Amsterdamse Rotterdammers werken in Amsterdam"),
            None
        );
    }

    #[test]
    fn test_exclude_embedded_substrings_multi() {
        let matcher = dutch_matcher();
        assert_eq!(matcher.find("Rotterdammers zijn zeldzaam in Amsterdam"), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let matcher = dutch_matcher();
        assert_eq!(
            matcher.find("amsterdam en rotterdam zijn zo verkeerd geschreven"),
            None
        );
    }

    // ============================================================
    // TEST 6: Determinism
    // ============================================================

    #[test]
    fn test_find_is_idempotent() {
        let matcher = dutch_matcher();
        let text = "Rotterdam and Amsterdam Zuidoost are cities";

        let first = matcher.find(text);
        let second = matcher.find(text);

        assert_eq!(first, second);
    }

    // ============================================================
    // TEST 7: Occurrence pairs
    // ============================================================

    #[test]
    fn test_occurrence_pairs() {
        let occurrence = Occurrence::new(vec![
            "Rotterdam".to_string(),
            "Amsterdam".to_string(),
            "Den Haag".to_string(),
        ]);

        let pairs = occurrence.pairs();

        assert_eq!(
            pairs,
            vec![
                ("Rotterdam".to_string(), "Amsterdam".to_string()),
                ("Rotterdam".to_string(), "Den Haag".to_string()),
                ("Amsterdam".to_string(), "Den Haag".to_string()),
            ]
        );
    }
}
