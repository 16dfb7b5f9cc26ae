use glam::{Mat4, Vec3};

use crate::math::{orthographic, rotation_degrees};

/// Near/far planes used by the orthographic projection.
const NEAR: f32 = -1.0;
const FAR: f32 = 100.0;

/// Orthographic camera.
///
/// Owns the projection and view matrices and their combined product. Every
/// property mutation recomputes the view and projection-view matrices, so
/// `projection_view()` is always current.
///
/// Rotation is XYZ Euler angles in degrees. The view matrix is the inverse of
/// the camera's world transform: moving the camera right moves the world left.
#[derive(Debug, Clone)]
pub struct Camera {
    projection: Mat4,
    view: Mat4,
    projection_view: Mat4,

    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Camera {
    /// Creates an orthographic camera for the given view box.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        let mut camera = Self {
            projection: orthographic(left, right, bottom, top, NEAR, FAR),
            view: Mat4::IDENTITY,
            projection_view: Mat4::IDENTITY,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        };
        camera.recalculate_view();
        camera
    }

    /// Replaces the projection, e.g. after a window resize.
    pub fn reset_projection(&mut self, left: f32, right: f32, bottom: f32, top: f32) {
        self.projection = orthographic(left, right, bottom, top, NEAR, FAR);
        self.recalculate_view();
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// The combined `projection * view` matrix uploaded to shaders.
    #[inline]
    pub fn projection_view(&self) -> Mat4 {
        self.projection_view
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recalculate_view();
    }

    /// Sets the camera rotation (XYZ Euler angles, degrees).
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.recalculate_view();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recalculate_view();
    }

    fn recalculate_view(&mut self) {
        let world = Mat4::from_scale_rotation_translation(
            self.scale,
            rotation_degrees(self.rotation),
            self.position,
        );
        self.view = world.inverse();
        self.projection_view = self.projection * self.view;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn view_is_identity_at_origin() {
        let camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0);
        assert!(camera.view_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn moving_camera_right_moves_world_left() {
        let mut camera = Camera::orthographic(-10.0, 10.0, -10.0, 10.0);
        camera.set_position(Vec3::new(5.0, 0.0, 0.0));

        // A point at the camera's new position lands at clip-space x = 0.
        let p = camera.projection_view() * Vec4::new(5.0, 0.0, 0.0, 1.0);
        assert!((p.x).abs() < 1e-6);

        // A point at the world origin lands left of center.
        let origin = camera.projection_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(origin.x < 0.0);
    }

    #[test]
    fn projection_view_is_the_product_of_its_parts() {
        let mut camera = Camera::orthographic(0.0, 8.0, 0.0, 6.0);
        camera.set_position(Vec3::new(1.0, 2.0, 0.0));
        camera.set_rotation(Vec3::new(0.0, 0.0, 30.0));

        let expected = camera.projection_matrix() * camera.view_matrix();
        assert!(camera.projection_view().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn reset_projection_keeps_camera_pose() {
        let mut camera = Camera::orthographic(-1.0, 1.0, -1.0, 1.0);
        camera.set_position(Vec3::new(3.0, 0.0, 0.0));

        camera.reset_projection(-2.0, 2.0, -2.0, 2.0);
        assert_eq!(camera.position(), Vec3::new(3.0, 0.0, 0.0));

        // View still reflects the camera position after the projection swap.
        let p = camera.projection_view() * Vec4::new(3.0, 0.0, 0.0, 1.0);
        assert!((p.x).abs() < 1e-6);
    }
}
