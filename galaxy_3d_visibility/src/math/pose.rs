/// Sampled spatial pose of a transform node.

use glam::{Mat4, Quat, Vec3};

/// Position, orientation and scale of a node in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, orientation: Quat, scale: Vec3) -> Self {
        Self { position, orientation, scale }
    }

    /// Pose at `position` with no rotation and unit scale.
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// World matrix (scale, then rotation, then translation).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }

    /// How far `current` moved away from this pose.
    pub fn drift_to(&self, current: &Pose) -> PoseDrift {
        PoseDrift {
            position: self.position.distance(current.position),
            rotation_degrees: self.orientation.angle_between(current.orientation).to_degrees(),
            scale: self.scale.distance(current.scale),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-axis drift between two poses.
///
/// Rotation is the angle between the two orientations, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDrift {
    pub position: f32,
    pub rotation_degrees: f32,
    pub scale: f32,
}

impl PoseDrift {
    /// True when any axis is at or above `threshold`.
    pub fn reaches(&self, threshold: f32) -> bool {
        self.position >= threshold
            || self.rotation_degrees >= threshold
            || self.scale >= threshold
    }
}

#[cfg(test)]
#[path = "pose_tests.rs"]
mod tests;
