use glam::{Mat4, Vec3};

use crate::math::rotation_degrees;

/// Position, rotation and scale of a scene object.
///
/// Rotation is XYZ Euler angles in degrees. The model matrix is recomputed
/// eagerly on every mutation, so reads are always consistent and free.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    model: Mat4,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let mut t = Self {
            position,
            rotation,
            scale,
            model: Mat4::IDENTITY,
        };
        t.recalculate();
        t
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, Vec3::ONE)
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
        self.recalculate();
    }

    /// Sets the rotation (XYZ Euler angles, degrees).
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.recalculate();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.recalculate();
    }

    /// The model matrix: translation * rotation * scale.
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    fn recalculate(&mut self) {
        self.model = Mat4::from_scale_rotation_translation(
            self.scale,
            rotation_degrees(self.rotation),
            self.position,
        );
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn default_transform_is_identity() {
        let t = Transform::default();
        assert!(t.model_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn translation_moves_the_origin() {
        let mut t = Transform::default();
        t.set_position(Vec3::new(3.0, -2.0, 1.0));

        let p = t.model_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(p.abs_diff_eq(Vec4::new(3.0, -2.0, 1.0, 1.0), 1e-6));
    }

    #[test]
    fn scale_applies_before_rotation() {
        // Scale x by 2, then rotate 90 degrees about z: the stretched x axis
        // must end up along +y.
        let t = Transform::new(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 90.0),
            Vec3::new(2.0, 1.0, 1.0),
        );

        let p = t.model_matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.abs_diff_eq(Vec4::new(0.0, 2.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn mutation_refreshes_the_matrix() {
        let mut t = Transform::default();
        let before = t.model_matrix();
        t.set_scale(Vec3::splat(4.0));
        assert!(!t.model_matrix().abs_diff_eq(before, 1e-6));
    }
}
