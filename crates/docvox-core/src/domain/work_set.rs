//! Index sets targeted by a synthesis round.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of chunk indices.
///
/// Iteration is always ascending, which is the order invalid indices are
/// reported in and the order a round's work is submitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkSet(BTreeSet<usize>);

impl WorkSet {
    /// Empty work set.
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Every index in `0..len`.
    pub fn full(len: usize) -> Self {
        (0..len).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending iterator over the indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Whether every index here is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Split into indices below `bound` and indices at or above it.
    pub fn split_at_bound(&self, bound: usize) -> (Self, Self) {
        let (inside, outside): (BTreeSet<_>, BTreeSet<_>) =
            self.0.iter().partition(|&&index| index < bound);
        (Self(inside), Self(outside))
    }

    /// Indices as a vector, ascending.
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl FromIterator<usize> for WorkSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a WorkSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

impl fmt::Display for WorkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, index) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_sorted_and_deduplicated() {
        let set: WorkSet = [7, 0, 5, 0, 7].into_iter().collect();
        assert_eq!(set.to_vec(), vec![0, 5, 7]);
        assert_eq!(set.to_string(), "[0, 5, 7]");
    }

    #[test]
    fn full_covers_range() {
        assert_eq!(WorkSet::full(3).to_vec(), vec![0, 1, 2]);
        assert!(WorkSet::full(0).is_empty());
    }

    #[test]
    fn split_at_bound_partitions() {
        let set: WorkSet = [1, 4, 9, 12].into_iter().collect();
        let (inside, outside) = set.split_at_bound(9);
        assert_eq!(inside.to_vec(), vec![1, 4]);
        assert_eq!(outside.to_vec(), vec![9, 12]);
    }
}
