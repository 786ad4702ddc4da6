//! Occurrence counting into ranked tables.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyRow<T> {
    pub value: T,
    pub count: u64,
}

/// Distinct values with their counts, sorted by count descending.
///
/// Ties keep the order in which values were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T> {
    rows: Vec<FrequencyRow<T>>,
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    /// Counts each occurrence of every value.
    pub fn count<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::count_weighted(values.into_iter().map(|value| (value, 1)))
    }

    /// Flattens nested sequences (e.g. token lists per document) and counts.
    pub fn count_flat<I, J>(groups: I) -> Self
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = T>,
    {
        Self::count(groups.into_iter().flatten())
    }

    /// Accumulates pre-counted `(value, n)` buckets.
    ///
    /// A bucket with `n == 0` still yields a row, so a fixed label set fed in
    /// here always comes back complete.
    pub fn count_weighted<I>(buckets: I) -> Self
    where
        I: IntoIterator<Item = (T, u64)>,
    {
        let mut position: HashMap<T, usize> = HashMap::new();
        let mut rows: Vec<FrequencyRow<T>> = Vec::new();

        for (value, n) in buckets {
            if let Some(&idx) = position.get(&value) {
                rows[idx].count += n;
            } else {
                position.insert(value.clone(), rows.len());
                rows.push(FrequencyRow { value, count: n });
            }
        }

        // Stable sort keeps first-seen order among equal counts.
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        Self { rows }
    }

    /// Count for `value`, `0` when it never occurred.
    pub fn get(&self, value: &T) -> u64 {
        self.rows
            .iter()
            .find(|row| &row.value == value)
            .map_or(0, |row| row.count)
    }
}

impl<T> FrequencyTable<T> {
    #[must_use]
    pub fn rows(&self) -> &[FrequencyRow<T>] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<FrequencyRow<T>> {
        self.rows
    }

    /// Keeps only the `limit` highest-ranked rows.
    pub fn truncate(&mut self, limit: usize) {
        self.rows.truncate(limit);
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
