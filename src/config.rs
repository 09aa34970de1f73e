use crate::error::{Result, SketchError};

pub const DEFAULT_WIDTH: usize = 1000;
pub const DEFAULT_DEPTH: usize = 10;

/// Dimensions of a count-min sketch, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchConfig {
    /// Counters per row.
    pub width: usize,
    /// Number of rows, one hash function each.
    pub depth: usize,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl SketchConfig {
    pub fn new(width: usize, depth: usize) -> Self {
        SketchConfig { width, depth }
    }

    /// Derives dimensions from the classic error parameters.
    ///
    /// With `width = ceil(e / epsilon)` and `depth = ceil(ln(1 / delta))`, an
    /// estimate exceeds the true count by more than `epsilon * N` with
    /// probability at most `delta`, where `N` is the total quantity added.
    pub fn from_error_bounds(epsilon: f64, delta: f64) -> Result<Self> {
        let in_unit_interval = |x: f64| x > 0.0 && x < 1.0;
        if !in_unit_interval(epsilon) || !in_unit_interval(delta) {
            return Err(SketchError::InvalidErrorBound { epsilon, delta });
        }

        let width = (std::f64::consts::E / epsilon).ceil() as usize;
        let depth = (1.0 / delta).ln().ceil() as usize;

        Ok(SketchConfig {
            width,
            depth: depth.max(1),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(SketchError::InvalidDimension {
                width: self.width,
                depth: self.depth,
            });
        }
        Ok(())
    }

    /// Total number of counters, or `None` if it overflows `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.width.checked_mul(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let config = SketchConfig::default();
        assert_eq!(config.width, 1000);
        assert_eq!(config.depth, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            SketchConfig::new(0, 10).validate(),
            Err(SketchError::InvalidDimension { width: 0, depth: 10 })
        ));
        assert!(matches!(
            SketchConfig::new(10, 0).validate(),
            Err(SketchError::InvalidDimension { width: 10, depth: 0 })
        ));
    }

    #[test]
    fn test_from_error_bounds() {
        let config = SketchConfig::from_error_bounds(0.01, 0.001).unwrap();
        // ceil(2.718.. / 0.01) and ceil(ln(1000))
        assert_eq!(config.width, 272);
        assert_eq!(config.depth, 7);
    }

    #[test]
    fn test_from_error_bounds_rejects_out_of_range() {
        for (epsilon, delta) in [(0.0, 0.1), (1.0, 0.1), (0.1, 0.0), (0.1, 1.5), (f64::NAN, 0.1)] {
            assert!(matches!(
                SketchConfig::from_error_bounds(epsilon, delta),
                Err(SketchError::InvalidErrorBound { .. })
            ));
        }
    }

    #[test]
    fn test_cells_overflow() {
        assert_eq!(SketchConfig::new(1000, 10).cells(), Some(10_000));
        assert_eq!(SketchConfig::new(usize::MAX, 2).cells(), None);
    }
}
