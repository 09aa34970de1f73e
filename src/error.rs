use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SketchError {
    #[error("Invalid sketch dimensions {width}x{depth}: width and depth must be positive")]
    InvalidDimension { width: usize, depth: usize },
    #[error("Invalid quantity {0}: quantities must be non-negative")]
    InvalidQuantity(i64),
    #[error("Sketch of {width}x{depth} counters does not fit in memory")]
    TableTooLarge { width: usize, depth: usize },
    #[error("Failed to allocate counter table of {width}x{depth}: {source}")]
    Allocation {
        width: usize,
        depth: usize,
        #[source]
        source: TryReserveError,
    },
    #[error("Invalid error bound (epsilon={epsilon}, delta={delta}): both must be in (0, 1)")]
    InvalidErrorBound { epsilon: f64, delta: f64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SketchError>;
