// crates/sincer-core/src/matcher.rs - Glob lookup over record names
//
// TWO-PASS MATCHING:
// Every lookup first tries the pattern exactly as given. Only when that pass
// finds nothing at all is the same pattern retried with both the pattern and
// the names lower-cased. An exact-case hit therefore always wins, and
// "Coffee" still finds "coffee" when nothing else matches.

use glob::{MatchOptions, Pattern};

use crate::record::Record;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled name pattern together with its lower-cased twin
#[derive(Debug, Clone)]
pub struct NamePattern {
    exact: Option<Pattern>,
    folded: Option<Pattern>,
}

impl NamePattern {
    /// Compile a pattern; an invalid glob simply matches nothing
    pub fn new(pattern: &str) -> Self {
        Self {
            exact: Pattern::new(pattern).ok(),
            folded: Pattern::new(&pattern.to_lowercase()).ok(),
        }
    }

    /// First pass: the pattern as given
    pub fn matches_exact(&self, name: &str) -> bool {
        self.exact
            .as_ref()
            .is_some_and(|p| p.matches_with(name, MATCH_OPTIONS))
    }

    /// Second pass: pattern and name both lower-cased
    pub fn matches_folded(&self, name: &str) -> bool {
        self.folded
            .as_ref()
            .is_some_and(|p| p.matches_with(&name.to_lowercase(), MATCH_OPTIONS))
    }
}

/// Indices of every record matching `pattern`, skipping `exclude`
///
/// Falls back to the case-insensitive pass when the exact pass is empty.
pub fn match_indices(records: &[Record], pattern: &str, exclude: Option<usize>) -> Vec<usize> {
    let compiled = NamePattern::new(pattern);
    let candidates = || {
        records
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != exclude)
    };

    let exact: Vec<usize> = candidates()
        .filter(|(_, record)| compiled.matches_exact(&record.name))
        .map(|(index, _)| index)
        .collect();
    if !exact.is_empty() {
        return exact;
    }

    candidates()
        .filter(|(_, record)| compiled.matches_folded(&record.name))
        .map(|(index, _)| index)
        .collect()
}

/// Index of the first record matching `pattern`, skipping `exclude`
pub fn match_first_index(records: &[Record], pattern: &str, exclude: Option<usize>) -> Option<usize> {
    let compiled = NamePattern::new(pattern);
    let mut candidates = records
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude);

    candidates
        .clone()
        .find(|(_, record)| compiled.matches_exact(&record.name))
        .or_else(|| candidates.find(|(_, record)| compiled.matches_folded(&record.name)))
        .map(|(index, _)| index)
}

/// Whether `name` collides with an existing record, ignoring `exclude`
///
/// Only the exact pass is consulted: a literal duplicate, or an existing
/// name the new name matches as a case-sensitive glob.
pub fn name_taken(records: &[Record], name: &str, exclude: Option<usize>) -> bool {
    let compiled = NamePattern::new(name);
    records
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude)
        .any(|(_, record)| record.name == name || compiled.matches_exact(&record.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<Record> {
        names.iter().map(|name| Record::starting_now(*name)).collect()
    }

    #[test]
    fn test_exact_pass_wins() {
        let list = records(&["coffee", "Coffee", "tea"]);
        assert_eq!(match_indices(&list, "Coffee", None), vec![1]);
        assert_eq!(match_first_index(&list, "Coffee", None), Some(1));
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let list = records(&["coffee", "tea", "COFFEE-break"]);
        assert_eq!(match_indices(&list, "Coffee*", None), vec![0, 2]);
        assert_eq!(match_first_index(&list, "TEA", None), Some(1));
    }

    #[test]
    fn test_glob_patterns() {
        let list = records(&["timer-1", "timer-2", "walk"]);
        assert_eq!(match_indices(&list, "timer-*", None), vec![0, 1]);
        assert_eq!(match_indices(&list, "timer-?", None), vec![0, 1]);
        assert_eq!(match_indices(&list, "[wx]alk", None), vec![2]);
        assert!(match_indices(&list, "nothing", None).is_empty());
    }

    #[test]
    fn test_exclude_skips_index() {
        let list = records(&["a", "a2"]);
        assert_eq!(match_first_index(&list, "a*", Some(0)), Some(1));
        assert_eq!(match_first_index(&list, "a", Some(0)), None);
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        let list = records(&["[x"]);
        assert!(match_indices(&list, "[x", None).is_empty());
    }

    #[test]
    fn test_name_taken() {
        let list = records(&["walk", "Run"]);
        assert!(name_taken(&list, "walk", None));
        assert!(name_taken(&list, "w*", None));
        assert!(!name_taken(&list, "run", None));
        assert!(!name_taken(&list, "walk", Some(0)));
    }
}
