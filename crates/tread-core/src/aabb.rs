//! Axis-aligned bounding boxes for static level geometry

use crate::error::{Result, TreadError};
use crate::types::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world coordinates.
///
/// Invariant: every component of `min` is less than or equal to its
/// counterpart in `max`. Zero-extent boxes are allowed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Construct from minimum and maximum corners, rejecting inverted boxes
    pub fn new(min: Vec3, max: Vec3) -> Result<Self> {
        // NaN fails every comparison, so it is rejected here too
        let ordered = min.x <= max.x && min.y <= max.y && min.z <= max.z;
        if !ordered {
            return Err(TreadError::InvalidBox {
                min: min.to_array(),
                max: max.to_array(),
            });
        }
        Ok(Self { min, max })
    }

    /// Construct a box of the given full `size` centered at `center`
    pub fn from_center_size(center: Vec3, size: Vec3) -> Result<Self> {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when any extent is zero
    pub fn is_degenerate(&self) -> bool {
        let s = self.size();
        s.x == 0.0 || s.y == 0.0 || s.z == 0.0
    }

    /// Open-interval overlap between the box's Y range and `[bottom, top]`
    pub fn overlaps_vertical(&self, bottom: f32, top: f32) -> bool {
        bottom < self.max.y && top > self.min.y
    }
}
