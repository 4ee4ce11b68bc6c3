/// Camera — low-level passive data container.
///
/// The caller (game engine) is responsible for computing and setting the
/// view matrix, projection matrix and frustum. The visibility system only
/// reads them to configure the oracle (frustum test, distance origin).

use glam::{Mat4, Vec3};
use super::frustum::Frustum;

/// Low-level camera. A passive data container.
#[derive(Debug, Clone)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a new camera with the given parameters.
    pub fn new(view: Mat4, projection: Mat4, frustum: Frustum) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
            frustum,
        }
    }

    /// Create a camera whose frustum is extracted from `projection * view`.
    pub fn from_matrices(view: Mat4, projection: Mat4) -> Self {
        let frustum = Frustum::from_view_projection(&(projection * view));
        Self::new(view, projection, frustum)
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum planes for culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// World-space eye position, the origin of distance bands.
    pub fn position(&self) -> Vec3 {
        self.view_matrix.inverse().col(3).truncate()
    }

    /// World-space viewing direction (-Z of the camera transform).
    pub fn forward(&self) -> Vec3 {
        -self.view_matrix.inverse().col(2).truncate().normalize_or_zero()
    }

    /// A camera is usable when its matrices are finite and the view is invertible.
    pub fn is_usable(&self) -> bool {
        self.view_matrix.is_finite()
            && self.projection_matrix.is_finite()
            && self.view_matrix.determinant().abs() > f32::EPSILON
    }

    // ===== SETTERS — store, compute nothing =====

    /// Set the view matrix.
    pub fn set_view(&mut self, matrix: Mat4) {
        self.view_matrix = matrix;
    }

    /// Set the projection matrix.
    pub fn set_projection(&mut self, matrix: Mat4) {
        self.projection_matrix = matrix;
    }

    /// Set the frustum.
    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
