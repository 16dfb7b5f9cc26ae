//! Math helpers shared by the camera and transforms.
//!
//! Vector/matrix types come from `glam`; this module only adds the angle
//! conventions (rotations are specified in degrees throughout the engine)
//! and the projection used by the orthographic camera.
//!
//! Clip-space convention is wgpu's: x/y in [-1, 1], depth in [0, 1].

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Converts an angle in radians to degrees.
#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Converts an angle in degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Builds a rotation from XYZ Euler angles given in degrees.
#[inline]
pub fn rotation_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        degrees_to_radians(angles.x),
        degrees_to_radians(angles.y),
        degrees_to_radians(angles.z),
    )
}

/// Orthographic projection mapping the given box to wgpu clip space.
///
/// `(left, bottom)` maps to `(-1, -1)`, `(right, top)` to `(1, 1)`, and the
/// near/far planes to depth 0 and 1 respectively.
#[inline]
pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::orthographic_rh(left, right, bottom, top, near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::PI;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    fn vec4_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    // ── angle conversions ─────────────────────────────────────────────────

    #[test]
    fn degrees_radians_round_trip() {
        for deg in [-360.0, -90.0, 0.0, 45.0, 180.0, 720.0] {
            assert!(approx_eq(radians_to_degrees(degrees_to_radians(deg)), deg));
        }
    }

    #[test]
    fn half_turn_is_pi() {
        assert!(approx_eq(degrees_to_radians(180.0), PI));
        assert!(approx_eq(radians_to_degrees(PI), 180.0));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn rotation_by_zero_is_identity() {
        let q = rotation_degrees(Vec3::ZERO);
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let q = rotation_degrees(Vec3::new(0.0, 0.0, 90.0));
        let rotated = q * Vec3::X;
        assert!(rotated.abs_diff_eq(Vec3::Y, 1e-6));
    }

    // ── orthographic projection ───────────────────────────────────────────

    #[test]
    fn orthographic_maps_corners_to_clip_space() {
        let m = orthographic(-2.0, 6.0, -1.0, 3.0, -1.0, 100.0);

        let low = m * Vec4::new(-2.0, -1.0, 1.0, 1.0); // z = -near
        assert!(vec4_approx_eq(low, Vec4::new(-1.0, -1.0, 0.0, 1.0)));

        let high = m * Vec4::new(6.0, 3.0, -100.0, 1.0); // z = -far
        assert!(vec4_approx_eq(high, Vec4::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn orthographic_center_maps_to_origin() {
        let m = orthographic(0.0, 10.0, 0.0, 10.0, -1.0, 1.0);
        let c = m * Vec4::new(5.0, 5.0, 0.0, 1.0);
        assert!(approx_eq(c.x, 0.0) && approx_eq(c.y, 0.0));
    }

    // ── matrix algebra sanity ─────────────────────────────────────────────

    #[test]
    fn matrix_multiply_is_associative_within_tolerance() {
        let a = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let b = Mat4::from_quat(rotation_degrees(Vec3::new(30.0, 45.0, 60.0)));
        let c = Mat4::from_scale(Vec3::new(2.0, 0.5, 1.5));

        let lhs = (a * b) * c;
        let rhs = a * (b * c);
        assert!(lhs.abs_diff_eq(rhs, 1e-5));
    }
}
