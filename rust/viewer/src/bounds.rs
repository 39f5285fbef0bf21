// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding volumes for loaded geometry
//!
//! Bounds are derived values: they are recomputed from the scene whenever
//! the loaded model set changes and carry no identity of their own.

use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box in f64 precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Create the empty box (contains no points)
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create a box from two corners
    pub fn from_corners(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// A box is empty when any max component lies below its min component
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand_point(&mut self, x: f64, y: f64, z: f64) {
        self.min.x = self.min.x.min(x);
        self.min.y = self.min.y.min(y);
        self.min.z = self.min.z.min(z);
        self.max.x = self.max.x.max(x);
        self.max.y = self.max.y.max(y);
        self.max.z = self.max.z.max(z);
    }

    /// Expand bounds by a flat `[x, y, z, x, y, z, ...]` position buffer.
    /// A trailing partial triple is ignored.
    pub fn expand_positions(&mut self, positions: &[f32]) {
        positions.chunks_exact(3).for_each(|chunk| {
            self.expand_point(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
        });
    }

    /// Build bounds from a flat position buffer
    pub fn from_positions(positions: &[f32]) -> Self {
        let mut bounds = Self::empty();
        bounds.expand_positions(positions);
        bounds
    }

    /// Smallest box enclosing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        BoundingBox {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Center of the box (origin for an empty box)
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent along each axis (zero for an empty box)
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Largest extent across the three axes
    #[inline]
    pub fn max_dimension(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
