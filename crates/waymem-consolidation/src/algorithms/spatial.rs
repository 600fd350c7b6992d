//! Grid bucketing: continuous position → discrete cell key.
//!
//! Two records in the same cell are "the same place". Points a unit apart on
//! either side of a cell boundary land in different cells and are never merged;
//! that boundary artifact is accepted in exchange for O(1) lookups.

use waymem_core::config::defaults::DEFAULT_CELL_SIZE;
use waymem_core::errors::ConfigError;
use waymem_core::models::Position;
use waymem_core::traits::Located;

/// Integer cell coordinates. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Floor-divide each coordinate by `cell_size`.
///
/// `cell_size` must be positive; coordinates must be finite (callers filter
/// non-finite input before bucketing).
pub fn bucket_key(position: &Position, cell_size: f64) -> BucketKey {
    BucketKey {
        x: (position.x / cell_size).floor() as i64,
        y: (position.y / cell_size).floor() as i64,
        z: (position.z / cell_size).floor() as i64,
    }
}

/// A bucketing function with a cell size fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialBucketIndex {
    cell_size: f64,
}

impl SpatialBucketIndex {
    pub fn new(cell_size: f64) -> Result<Self, ConfigError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "merge.cell_size".to_string(),
                message: format!("must be a positive finite number, got {cell_size}"),
            });
        }
        Ok(Self { cell_size })
    }

    /// Unchecked; only for the free-function contract where the caller vouches.
    pub(crate) fn unchecked(cell_size: f64) -> Self {
        Self { cell_size }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn key(&self, position: &Position) -> BucketKey {
        bucket_key(position, self.cell_size)
    }

    pub fn key_of<T: Located>(&self, item: &T) -> BucketKey {
        self.key(item.position())
    }
}

impl Default for SpatialBucketIndex {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: f64, y: f64, z: f64) -> BucketKey {
        SpatialBucketIndex::default().key(&Position::new(x, y, z))
    }

    #[test]
    fn origin_cell_spans_zero_to_cell_size() {
        assert_eq!(key(0.0, 0.0, 0.0), BucketKey { x: 0, y: 0, z: 0 });
        assert_eq!(key(1.0, 1.0, 1.0), BucketKey { x: 0, y: 0, z: 0 });
        assert_eq!(key(31.999, 0.0, 0.0), BucketKey { x: 0, y: 0, z: 0 });
        assert_eq!(key(32.0, 0.0, 0.0), BucketKey { x: 1, y: 0, z: 0 });
    }

    #[test]
    fn negative_coordinates_floor_toward_negative_infinity() {
        assert_eq!(key(-0.5, -32.0, -32.5), BucketKey { x: -1, y: -1, z: -2 });
    }

    #[test]
    fn boundary_straddlers_are_not_merged() {
        assert_ne!(key(31.5, 0.0, 0.0), key(32.5, 0.0, 0.0));
    }

    #[test]
    fn same_input_same_key() {
        let p = Position::new(123.4, -567.8, 9.1);
        assert_eq!(bucket_key(&p, 32.0), bucket_key(&p, 32.0));
    }

    #[test]
    fn rejects_bad_cell_sizes() {
        assert!(SpatialBucketIndex::new(0.0).is_err());
        assert!(SpatialBucketIndex::new(-1.0).is_err());
        assert!(SpatialBucketIndex::new(f64::NAN).is_err());
        assert!(SpatialBucketIndex::new(f64::INFINITY).is_err());
        assert_eq!(SpatialBucketIndex::new(16.0).unwrap().cell_size(), 16.0);
    }
}
