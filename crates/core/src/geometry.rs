//! Points and axis-aligned bounding boxes in model space.
//!
//! The presentation layer supplies world-space pick coordinates in the same
//! coordinate space the corpus bounding boxes are authored in; no other
//! geometry (meshes, transforms) is known to this engine.

use serde::{Deserialize, Serialize};

/// A point in the 3D body-model coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Axis-aligned bounding box with inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Returns true if `point` lies inside the box, inclusive on both ends
    /// of every axis. A point exactly on a face, edge, or corner is inside.
    pub fn contains(&self, point: Point3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Component-wise midpoint of the box.
    pub fn centroid(&self) -> Point3 {
        Point3 {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
            z: (self.min.z + self.max.z) / 2.0,
        }
    }

    /// Volume of the box. Zero for degenerate (flat) boxes.
    pub fn volume(&self) -> f32 {
        (self.max.x - self.min.x) * (self.max.y - self.min.y) * (self.max.z - self.min.z)
    }

    /// Returns the first axis on which `min` exceeds `max`, if any.
    ///
    /// A well-formed box satisfies `min <= max` component-wise; equality is
    /// allowed, so flat boxes are well-formed.
    pub fn invalid_axis(&self) -> Option<char> {
        if self.min.x > self.max.x {
            Some('x')
        } else if self.min.y > self.max.y {
            Some('y')
        } else if self.min.z > self.max.z {
            Some('z')
        } else {
            None
        }
    }

    /// Returns true if the two boxes share any point, inclusive of faces.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
