//! Accumulation and ordering of match records.

use serde::Serialize;

use super::MatchRecord;

/// Sort key for a result set. Traversal order is filesystem-dependent, so
/// presentation order is entirely determined by the post-hoc sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortKey {
    /// Ascending, case-insensitive on the base filename.
    Name,
    /// Descending on modification time, newest first.
    Date,
    /// Descending on byte size, largest first.
    Size,
    /// Arrival order, untouched.
    None,
}

/// Ordered collection of [`MatchRecord`]s, filled from the engine's event
/// stream by the caller.
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Vec<MatchRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<MatchRecord> {
        self.records
    }

    /// Re-orders the set by `key`. All sorts are stable, so ties keep their
    /// prior relative order and re-sorting by the same key is idempotent.
    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Name => self
                .records
                .sort_by_key(|r| r.name.to_lowercase()),
            SortKey::Date => self.records.sort_by(|a, b| b.modified.cmp(&a.modified)),
            SortKey::Size => self.records.sort_by(|a, b| b.size.cmp(&a.size)),
            SortKey::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn record(name: &str, size: u64, modified_secs: i64) -> MatchRecord {
        MatchRecord {
            name: name.to_string(),
            path: PathBuf::from(format!("/tmp/{name}")),
            size,
            modified: Local.timestamp_opt(modified_secs, 0).unwrap(),
            extension: "txt".to_string(),
            snippet: String::new(),
        }
    }

    fn sample() -> ResultSet {
        let mut set = ResultSet::new();
        set.push(record("beta.txt", 10, 300));
        set.push(record("Alpha.txt", 30, 100));
        set.push(record("gamma.txt", 20, 200));
        set
    }

    #[test]
    fn name_sort_is_case_insensitive_ascending() {
        let mut set = sample();
        set.sort_by(SortKey::Name);
        let names: Vec<_> = set.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha.txt", "beta.txt", "gamma.txt"]);
    }

    #[test]
    fn date_sort_is_newest_first() {
        let mut set = sample();
        set.sort_by(SortKey::Date);
        let names: Vec<_> = set.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["beta.txt", "gamma.txt", "Alpha.txt"]);
    }

    #[test]
    fn size_sort_is_largest_first() {
        let mut set = sample();
        set.sort_by(SortKey::Size);
        let sizes: Vec<_> = set.records().iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![30, 20, 10]);
    }

    #[test]
    fn none_preserves_arrival_order() {
        let mut set = sample();
        set.sort_by(SortKey::None);
        let names: Vec<_> = set.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["beta.txt", "Alpha.txt", "gamma.txt"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut set = sample();
        set.sort_by(SortKey::Size);
        let first: Vec<_> = set.records().iter().map(|r| r.name.clone()).collect();
        set.sort_by(SortKey::Size);
        let second: Vec<_> = set.records().iter().map(|r| r.name.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn size_sort_result_is_order_independent() {
        let mut forward = sample();
        forward.sort_by(SortKey::Size);

        let mut reversed = ResultSet::new();
        for r in sample().into_records().into_iter().rev() {
            reversed.push(r);
        }
        reversed.sort_by(SortKey::Size);

        let a: Vec<_> = forward.records().iter().map(|r| r.size).collect();
        let b: Vec<_> = reversed.records().iter().map(|r| r.size).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_names_sort_newest_first_by_date() {
        let mut set = ResultSet::new();
        set.push(record("same.txt", 1, 100));
        set.push(record("same.txt", 2, 500));
        set.sort_by(SortKey::Date);
        assert_eq!(set.records()[0].size, 2);
        assert_eq!(set.records()[1].size, 1);
    }
}
