//! Ordinal bookkeeping for the columns of a table being altered.

use crate::schema::ColumnSnapshot;

/// Column name to ordinal mapping.
///
/// Ordinals are unique but may have gaps after removals. Iteration order of the
/// backing storage carries no meaning; [`ColumnOrder::names_in_order`] sorts by
/// ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnOrder {
    entries: Vec<(String, usize)>,
    next_ordinal: usize,
}

impl ColumnOrder {
    /// Number the snapshot's columns `0..n` in snapshot order
    pub fn from_snapshot(snapshot: &ColumnSnapshot) -> Self {
        let entries: Vec<(String, usize)> = snapshot
            .iter()
            .enumerate()
            .map(|(ordinal, column)| (column.name.clone(), ordinal))
            .collect();

        Self {
            next_ordinal: entries.len(),
            entries,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.position(name).map(|idx| self.entries[idx].1)
    }

    /// Remove a column, returning the ordinal it held
    pub fn remove(&mut self, name: &str) -> Option<usize> {
        self.position(name)
            .map(|idx| self.entries.swap_remove(idx).1)
    }

    /// Place a column at a specific ordinal, typically one freed by [`ColumnOrder::remove`]
    pub fn insert(&mut self, name: impl Into<String>, ordinal: usize) {
        self.entries.push((name.into(), ordinal));
        self.next_ordinal = self.next_ordinal.max(ordinal + 1);
    }

    /// Append a column after every existing one
    pub fn push(&mut self, name: impl Into<String>) -> usize {
        let ordinal = self.next_ordinal;
        self.insert(name, ordinal);
        ordinal
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names sorted by ascending ordinal
    pub fn names_in_order(&self) -> Vec<&str> {
        let mut sorted: Vec<&(String, usize)> = self.entries.iter().collect();
        sorted.sort_by_key(|(_, ordinal)| *ordinal);
        sorted.into_iter().map(|(name, _)| name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}
