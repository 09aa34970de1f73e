pub mod atomic_count_min_sketch;
pub mod count_min_sketch;
pub mod counter_base;
pub mod exact_counter;

pub use atomic_count_min_sketch::AtomicCountMinSketch;
pub use count_min_sketch::CountMinSketch;
pub use counter_base::FrequencyCounter;
pub use exact_counter::ExactCounter;

use crate::config::SketchConfig;
use crate::error::{Result, SketchError};
use std::hash::{BuildHasher, Hasher};

/// Converts a caller-supplied quantity to a counter increment.
#[inline]
pub(crate) fn checked_quantity(quantity: i64) -> Result<u64> {
    u64::try_from(quantity).map_err(|_| SketchError::InvalidQuantity(quantity))
}

/// Allocates a zeroed `depth x width` counter table as one flat buffer.
///
/// Counter `(row, column)` lives at `row * width + column`.
pub(crate) fn allocate_table<T>(config: &SketchConfig, zero: impl FnMut() -> T) -> Result<Box<[T]>> {
    config.validate()?;
    let SketchConfig { width, depth } = *config;
    let cells = config
        .cells()
        .ok_or(SketchError::TableTooLarge { width, depth })?;

    let mut table = Vec::new();
    table
        .try_reserve_exact(cells)
        .map_err(|source| SketchError::Allocation {
            width,
            depth,
            source,
        })?;
    table.extend(std::iter::repeat_with(zero).take(cells));

    Ok(table.into_boxed_slice())
}

/// Maps `key` to a column of `row`: the hasher is seeded with the row index
/// before the key bytes, so every row behaves as an independent hash function.
#[inline(always)]
pub(crate) fn row_column<S: BuildHasher>(hasher: &S, key: &[u8], row: usize, width: usize) -> usize {
    let mut state = hasher.build_hasher();
    state.write(&(row as u64).to_le_bytes());
    state.write(key);
    (state.finish() % width as u64) as usize
}
