//! Count-min sketch frequency estimation.
//!
//! A [`CountMinSketch`] keeps `depth` rows of `width` counters. Adding a key
//! bumps one counter per row, chosen by a per-row seeded hash; the estimate is
//! the smallest of those counters. Estimates never undercount, and overcount
//! only through hash collisions.
//!
//! ```
//! use cms_rust::{CountMinSketch, FrequencyCounter};
//!
//! let mut cms: CountMinSketch = CountMinSketch::new(1000, 10)?;
//! cms.add("apple", 5)?;
//! cms.add("banana", 3)?;
//! assert!(cms.estimate("apple") >= 5);
//! # Ok::<(), cms_rust::SketchError>(())
//! ```

pub mod config;
pub mod counters;
pub mod error;
pub mod shell;
pub mod tokens;

pub use config::SketchConfig;
pub use counters::AtomicCountMinSketch;
pub use counters::CountMinSketch;
pub use counters::ExactCounter;
pub use counters::FrequencyCounter;
pub use error::SketchError;
