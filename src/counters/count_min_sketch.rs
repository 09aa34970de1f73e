use crate::config::SketchConfig;
use crate::counters::{FrequencyCounter, allocate_table, checked_quantity, row_column};
use crate::error::Result;
use std::fmt;
use std::hash::BuildHasher;
use xxhash_rust::xxh64::Xxh64Builder;

/// Count-min sketch over a flat `depth x width` table of `u64` counters.
///
/// Every key touches one counter per row. Collisions only ever add to a
/// counter, so the smallest of a key's `depth` counters is an overestimate of
/// its true count, or exact.
///
/// The sketch is single-owner: `add` needs `&mut self`. Use
/// [`AtomicCountMinSketch`](crate::AtomicCountMinSketch) to share one sketch
/// between threads.
///
/// ```
/// use cms_rust::{CountMinSketch, FrequencyCounter};
///
/// let mut cms: CountMinSketch = CountMinSketch::new(1000, 10).unwrap();
/// cms.add("apple", 5).unwrap();
/// cms.increment("apple");
/// assert!(cms.estimate("apple") >= 6);
/// ```
#[derive(Clone)]
pub struct CountMinSketch<S = Xxh64Builder> {
    width: usize,
    depth: usize,
    table: Box<[u64]>,
    total_count: u64,
    hasher: S,
}

impl<S: BuildHasher + Default> CountMinSketch<S> {
    /// Allocates a zeroed sketch with `width` counters in each of `depth` rows.
    pub fn new(width: usize, depth: usize) -> Result<Self> {
        Self::with_config(&SketchConfig::new(width, depth))
    }

    pub fn with_config(config: &SketchConfig) -> Result<Self> {
        let table = allocate_table(config, || 0u64)?;
        Ok(CountMinSketch {
            width: config.width,
            depth: config.depth,
            table,
            total_count: 0,
            hasher: S::default(),
        })
    }
}

impl<S: BuildHasher> CountMinSketch<S> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sum of all quantities added so far.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Column of `key` in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= depth`.
    pub fn row_hash<K: AsRef<[u8]> + ?Sized>(&self, key: &K, row: usize) -> usize {
        assert!(row < self.depth, "row {} out of range for depth {}", row, self.depth);
        row_column(&self.hasher, key.as_ref(), row, self.width)
    }

    /// Infallible `add(key, 1)`.
    pub fn increment<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        self.add_unchecked(key.as_ref(), 1);
    }

    /// Additive overestimate `ceil(e / width * total_count)`.
    ///
    /// An estimate exceeds the true count by more than this with probability at
    /// most `e^-depth`.
    pub fn error_bound(&self) -> u64 {
        let epsilon = std::f64::consts::E / self.width as f64;
        (epsilon * self.total_count as f64).ceil() as u64
    }

    fn add_unchecked(&mut self, key: &[u8], quantity: u64) {
        self.total_count = self.total_count.saturating_add(quantity);
        for row in 0..self.depth {
            let index = row * self.width + row_column(&self.hasher, key, row, self.width);
            self.table[index] = self.table[index].saturating_add(quantity);
        }
    }
}

impl<S: BuildHasher> FrequencyCounter for CountMinSketch<S> {
    fn add<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, quantity: i64) -> Result<()> {
        let quantity = checked_quantity(quantity)?;
        self.add_unchecked(key.as_ref(), quantity);
        Ok(())
    }

    fn estimate<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u64 {
        let key = key.as_ref();
        // depth is at least 1, so the minimum always exists
        (0..self.depth)
            .map(|row| self.table[row * self.width + row_column(&self.hasher, key, row, self.width)])
            .min()
            .unwrap_or(0)
    }
}

impl<S: BuildHasher + Default> Default for CountMinSketch<S> {
    fn default() -> Self {
        let config = SketchConfig::default();
        CountMinSketch {
            width: config.width,
            depth: config.depth,
            table: vec![0; config.width * config.depth].into_boxed_slice(),
            total_count: 0,
            hasher: S::default(),
        }
    }
}

impl<S> fmt::Debug for CountMinSketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountMinSketch")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("total_count", &self.total_count)
            .finish_non_exhaustive()
    }
}
