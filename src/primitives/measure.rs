//! Content measurement for auto-sized items.
//!
//! Bounds are axis-aligned in some local space. To size an item from its
//! content, the bounds are carried into a reference frame (usually the
//! container's) and re-boxed there, so rotation relative to the world does
//! not inflate the result.

use glam::{Mat4, Vec3};

use crate::error::{FlexError, Result};

/// Largest allowed difference between world scale components.
pub const SCALE_TOLERANCE: f32 = 0.001;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on the origin with the given extent.
    pub fn from_size(size: Vec3) -> Self {
        Self::new(-size / 2.0, size / 2.0)
    }

    pub fn size(&self) -> Vec3 {
        (self.max - self.min).max(Vec3::ZERO)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box around this box after `transform`.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        let corners = self.corners().map(|c| transform.transform_point3(c));
        let (min, max) = corners
            .iter()
            .fold((Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            });
        Self { min, max }
    }
}

/// Scale of `world`, which must be the same on all three axes.
pub fn uniform_world_scale(world: &Mat4) -> Result<f32> {
    let (scale, _, _) = world.to_scale_rotation_translation();
    if (scale.x - scale.y).abs() > SCALE_TOLERANCE || (scale.y - scale.z).abs() > SCALE_TOLERANCE {
        return Err(FlexError::NonUniformScale {
            x: scale.x,
            y: scale.y,
            z: scale.z,
        });
    }
    Ok(scale.x)
}

/// Extent of content `bounds` (local to `content_world`) as seen from the
/// frame `reference_world`.
pub fn obb_extent(bounds: &Aabb, content_world: &Mat4, reference_world: &Mat4) -> Vec3 {
    let into_reference = reference_world.inverse() * *content_world;
    bounds.transformed(&into_reference).size()
}
