/// Bounding volumes for visibility tests.
///
/// AABBs describe drawable extents (local or world space). The oracle only
/// ever sees bounding spheres, which are derived from world-space AABBs.

use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build an AABB from its center and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half size along each axis.
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Smallest sphere around this box: (center, extent magnitude).
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.center(), self.extents().length())
    }
}

// ===== BOUNDING SPHERE =====

/// World-space bounding sphere consumed by the visibility oracle.
///
/// A negative radius marks an *excluded* slot (entity pending removal).
/// Oracles must treat excluded slots as never visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Placeholder for slots that must never be reported visible.
    pub const EXCLUDED: BoundingSphere = BoundingSphere {
        center: Vec3::ZERO,
        radius: -1.0,
    };

    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Degenerate sphere at a point.
    pub fn point(center: Vec3) -> Self {
        Self { center, radius: 0.0 }
    }

    pub fn is_excluded(&self) -> bool {
        self.radius < 0.0
    }

    /// Distance from `point` to the sphere surface, 0 when inside.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        (self.center.distance(point) - self.radius.max(0.0)).max(0.0)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
