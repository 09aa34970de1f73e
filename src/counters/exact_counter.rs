use crate::counters::{FrequencyCounter, checked_quantity};
use crate::error::Result;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;

/// Exact frequency counter keeping one entry per distinct key.
///
/// Memory grows with the number of distinct keys; useful as ground truth when
/// measuring how far a sketch overestimates.
pub struct ExactCounter<S: BuildHasher + Default = RandomState> {
    counts: HashMap<Vec<u8>, u64, S>,
}

impl<S: BuildHasher + Default> ExactCounter<S> {
    pub fn new() -> Self {
        ExactCounter {
            counts: HashMap::with_hasher(S::default()),
        }
    }

    pub fn increment<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        let count = self.counts.entry(key.as_ref().to_vec()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Number of distinct keys seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.counts.iter().map(|(key, &count)| (key.as_slice(), count))
    }
}

impl<S: BuildHasher + Default> Default for ExactCounter<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher + Default> FrequencyCounter for ExactCounter<S> {
    fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, quantity: i64) -> Result<()> {
        let quantity = checked_quantity(quantity)?;
        let count = self.counts.entry(key.as_ref().to_vec()).or_insert(0);
        *count = count.saturating_add(quantity);
        Ok(())
    }

    fn estimate<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u64 {
        self.counts.get(key.as_ref()).copied().unwrap_or(0)
    }
}
