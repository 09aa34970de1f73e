use crate::config::SketchConfig;
use crate::counters::{allocate_table, checked_quantity, row_column};
use crate::error::Result;
use std::fmt;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use xxhash_rust::xxh64::Xxh64Builder;

/// Count-min sketch that can be updated through a shared reference.
///
/// Each counter is an `AtomicU64`, so concurrent `add` calls never lose an
/// increment and `estimate` never observes a torn counter. An `estimate` that
/// races an `add` of the same key may see the new value in some rows and the
/// old value in others; the result is still at least the count of every `add`
/// that completed before the `estimate` started.
///
/// Users sharing the sketch across threads wrap it in an `Arc` or borrow it
/// from a scope.
pub struct AtomicCountMinSketch<S = Xxh64Builder> {
    width: usize,
    depth: usize,
    table: Box<[AtomicU64]>,
    total_count: AtomicU64,
    hasher: S,
}

impl<S: BuildHasher + Default> AtomicCountMinSketch<S> {
    pub fn new(width: usize, depth: usize) -> Result<Self> {
        Self::with_config(&SketchConfig::new(width, depth))
    }

    pub fn with_config(config: &SketchConfig) -> Result<Self> {
        let table = allocate_table(config, || AtomicU64::new(0))?;
        Ok(AtomicCountMinSketch {
            width: config.width,
            depth: config.depth,
            table,
            total_count: AtomicU64::new(0),
            hasher: S::default(),
        })
    }
}

impl<S: BuildHasher> AtomicCountMinSketch<S> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn total_count(&self) -> u64 {
        self.total_count.load(Ordering::Relaxed)
    }

    pub fn add<K: AsRef<[u8]> + ?Sized>(&self, key: &K, quantity: i64) -> Result<()> {
        let quantity = checked_quantity(quantity)?;
        let key = key.as_ref();

        saturating_fetch_add(&self.total_count, quantity);
        for row in 0..self.depth {
            let index = row * self.width + row_column(&self.hasher, key, row, self.width);
            saturating_fetch_add(&self.table[index], quantity);
        }
        Ok(())
    }

    pub fn increment<K: AsRef<[u8]> + ?Sized>(&self, key: &K) {
        let key = key.as_ref();
        saturating_fetch_add(&self.total_count, 1);
        for row in 0..self.depth {
            let index = row * self.width + row_column(&self.hasher, key, row, self.width);
            saturating_fetch_add(&self.table[index], 1);
        }
    }

    pub fn estimate<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u64 {
        let key = key.as_ref();
        (0..self.depth)
            .map(|row| {
                let index = row * self.width + row_column(&self.hasher, key, row, self.width);
                self.table[index].load(Ordering::Relaxed)
            })
            .min()
            .unwrap_or(0)
    }
}

#[inline]
fn saturating_fetch_add(counter: &AtomicU64, quantity: u64) {
    // fetch_update only fails when the closure returns None
    let _ = counter.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
        Some(current.saturating_add(quantity))
    });
}

impl<S> fmt::Debug for AtomicCountMinSketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicCountMinSketch")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("total_count", &self.total_count.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
