//! Insertion-ordered frequency counting.

use std::collections::HashMap;

/// Counts string values while remembering the order they were first seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value`.
    pub fn record(&mut self, value: &str) {
        let slot = match self.index.get(value) {
            Some(&slot) => slot,
            None => {
                self.counts.push((value.to_string(), 0));
                let slot = self.counts.len() - 1;
                self.index.insert(value.to_string(), slot);
                slot
            }
        };
        self.counts[slot].1 += 1;
    }

    pub fn get(&self, value: &str) -> usize {
        self.index
            .get(value)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of recorded occurrences.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// The most frequent value; ties go to the one seen first.
    pub fn most_common(&self) -> Option<(&str, usize)> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.counts {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, count)| (value.as_str(), *count))
    }

    /// All values by descending count, ties kept in first-seen order.
    pub fn sorted(&self) -> Vec<(String, usize)> {
        let mut sorted = self.counts.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Values seen more than once, by descending count then first-seen.
    pub fn repeated(&self) -> Vec<(String, usize)> {
        self.sorted().into_iter().filter(|(_, c)| *c > 1).collect()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let table: FrequencyTable = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(table.get("a"), 3);
        assert_eq!(table.get("b"), 1);
        assert_eq!(table.get("z"), 0);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_most_common_empty() {
        assert!(FrequencyTable::new().most_common().is_none());
    }

    #[test]
    fn test_most_common_ties_first_seen() {
        // B reaches 2 first, but A was seen first
        let table: FrequencyTable = ["A", "B", "B", "A"].into_iter().collect();
        assert_eq!(table.most_common(), Some(("A", 2)));

        let table: FrequencyTable = ["A", "B", "A", "B"].into_iter().collect();
        assert_eq!(table.most_common(), Some(("A", 2)));

        let table: FrequencyTable = ["X", "Y", "Z"].into_iter().collect();
        assert_eq!(table.most_common(), Some(("X", 1)));
    }

    #[test]
    fn test_most_common_overtaken() {
        let table: FrequencyTable = ["A", "A", "B", "B", "B"].into_iter().collect();
        assert_eq!(table.most_common(), Some(("B", 3)));
    }

    #[test]
    fn test_most_common_agrees_with_sorted() {
        let table: FrequencyTable = ["To Do", "Done", "Done", "To Do"].into_iter().collect();
        let first = table.sorted().into_iter().next();
        assert_eq!(table.most_common().map(|(v, c)| (v.to_string(), c)), first);
    }

    #[test]
    fn test_len_counts_distinct_values() {
        let table: FrequencyTable = ["a", "b", "a"].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        assert!(FrequencyTable::new().is_empty());
    }

    #[test]
    fn test_sorted_ties_first_seen() {
        let table: FrequencyTable = ["c", "b", "a", "b", "a", "d", "d", "d"]
            .into_iter()
            .collect();
        assert_eq!(
            table.sorted(),
            vec![
                ("d".to_string(), 3),
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
            ]
        );
        assert_eq!(
            table.repeated(),
            vec![
                ("d".to_string(), 3),
                ("b".to_string(), 2),
                ("a".to_string(), 2),
            ]
        );
    }
}
