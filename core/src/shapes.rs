//! Bounding volumes.

use crate::math::{self, Mat4, Vec3};

/// Axis-aligned bounding box described by its centre and full size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub origin: Vec3,
    pub size: Vec3,
}

impl Aabb {
    pub fn new(origin: Vec3, size: Vec3) -> Self {
        Self { origin, size }
    }

    /// Smallest box containing both corners.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self {
            origin: (min + max) * 0.5,
            size: max - min,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.origin - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.origin + self.size * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size * 0.5
    }
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub position: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Sphere enclosing the given box.
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.origin, aabb.half_extents().norm())
    }

    /// Move the sphere into the space described by `matrix`, scaling the
    /// radius by the matrix's largest axis scale.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::new(
            math::transform_point(matrix, &self.position),
            self.radius * math::max_axis_scale(matrix),
        )
    }

    /// True if the two spheres overlap or touch.
    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        (self.position - other.position).norm_squared() <= reach * reach
    }
}
