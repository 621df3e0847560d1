//! Quaternion algebra over (x, y, z, w) 4-vectors
//!
//! Quaternions are plain `Vec4`s so scaling, addition and normalization come
//! from glam. Everything here is a pure function with no hidden state.
//! Producing operations normalize their result, except [`multiply`] and
//! [`conjugate`], which are exact algebraic operations.

use crate::core::{Quat, Vec3, Vec4};
use super::rotation_order::RotationOrder;

/// A quaternion in (x, y, z, w) layout
pub type Quaternion = Vec4;

/// The identity rotation
pub const IDENTITY: Quaternion = Vec4::W;

/// [`slerp`] treats inputs with `|w|` within this of 1 as coincident or
/// antipodal
const SLERP_DEGENERATE_EPSILON: f32 = 1e-6;

/// Hamilton product `q1 * q2`. Not commutative, not normalized.
#[inline]
pub fn multiply(q1: Quaternion, q2: Quaternion) -> Quaternion {
    Vec4::new(
        q1.w * q2.x + q1.x * q2.w + q1.y * q2.z - q1.z * q2.y,
        q1.w * q2.y + q1.y * q2.w + q1.z * q2.x - q1.x * q2.z,
        q1.w * q2.z + q1.z * q2.w + q1.x * q2.y - q1.y * q2.x,
        q1.w * q2.w - q1.x * q2.x - q1.y * q2.y - q1.z * q2.z,
    )
}

/// Negate the vector part
#[inline]
pub fn conjugate(q: Quaternion) -> Quaternion {
    Vec4::new(-q.x, -q.y, -q.z, q.w)
}

/// Sandwich product `q * v * conjugate(q)`: rotates the quaternion-encoded
/// vector `v` by `q`.
#[inline]
pub fn hamilton_product(q: Quaternion, v: Quaternion) -> Quaternion {
    multiply(q, multiply(v, conjugate(q)))
}

/// Rotate a 3D vector by a unit quaternion
pub fn rotate_vector(q: Quaternion, v: Vec3) -> Vec3 {
    hamilton_product(q, v.extend(0.0)).truncate()
}

/// Rotation of `theta_degrees` about `axis`.
///
/// `axis` must have non-zero length; it is normalized here.
pub fn axis_angle(axis: Vec3, theta_degrees: f32) -> Quaternion {
    debug_assert!(
        axis.length_squared() > 0.0,
        "axis_angle requires a non-zero axis"
    );
    let axis = axis.normalize();
    let half = theta_degrees.to_radians() * 0.5;
    (axis * half.sin()).extend(half.cos()).normalize()
}

/// Compose Euler angles (degrees, indexed by axis) in the given order.
///
/// The first axis of `order` is the outermost factor, so for `Xyz` the
/// result is `Rx * Ry * Rz`.
pub fn from_euler(euler_degrees: Vec3, order: RotationOrder) -> Quaternion {
    let [first, second, third] = order
        .composition_sequence()
        .map(|axis| axis_angle(axis.unit(), euler_degrees[axis.index()]));
    multiply(first, multiply(second, third)).normalize()
}

/// Spherical interpolation from `q1` (t = 0) to `q2` (t = 1).
///
/// The inputs are normalized first. Coincident or antipodal inputs
/// (`|w| = 1`, where `sin(θ)` is zero) return `q1`. `t` outside `[0, 1]`
/// extrapolates.
pub fn slerp(q1: Quaternion, q2: Quaternion, t: f32) -> Quaternion {
    let q1 = q1.normalize();
    let q2 = q2.normalize();
    let w = multiply(q1, conjugate(q2)).w.clamp(-1.0, 1.0);
    if 1.0 - w.abs() < SLERP_DEGENERATE_EPSILON {
        return q1;
    }
    let theta = 2.0 * w.acos();
    let sin_theta = theta.sin();
    let coef_q1 = ((1.0 - t) * theta).sin() / sin_theta;
    let coef_q2 = (t * theta).sin() / sin_theta;
    (q1 * coef_q1 + q2 * coef_q2).normalize()
}

/// Convert to a glam rotation for matrix construction
#[inline]
pub fn to_quat(q: Quaternion) -> Quat {
    Quat::from_vec4(q).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rotation_order::Axis;

    const EPS: f32 = 1e-5;

    fn approx_eq(a: Quaternion, b: Quaternion) -> bool {
        (a - b).abs().max_element() < EPS
    }

    /// Equal as rotations: q and -q encode the same orientation
    fn same_rotation(a: Quaternion, b: Quaternion) -> bool {
        approx_eq(a, b) || approx_eq(a, -b)
    }

    fn samples() -> Vec<Quaternion> {
        vec![
            IDENTITY,
            axis_angle(Vec3::X, 30.0),
            axis_angle(Vec3::Y, 90.0),
            axis_angle(Vec3::Y, 180.0),
            axis_angle(Vec3::new(1.0, 2.0, 3.0), 137.0),
            axis_angle(Vec3::new(-1.0, 0.5, 0.25), -75.0),
            from_euler(Vec3::new(10.0, 20.0, 30.0), RotationOrder::Xyz),
        ]
    }

    #[test]
    fn test_multiply_identity() {
        let q = axis_angle(Vec3::new(0.3, -0.2, 0.9), 40.0);
        assert!(approx_eq(multiply(IDENTITY, q), q));
        assert!(approx_eq(multiply(q, IDENTITY), q));
    }

    #[test]
    fn test_multiply_matches_glam() {
        let a = axis_angle(Vec3::X, 35.0);
        let b = axis_angle(Vec3::new(0.0, 1.0, 1.0), 80.0);
        let expected = Quat::from_vec4(a) * Quat::from_vec4(b);
        assert!(approx_eq(multiply(a, b), Vec4::from(expected)));
    }

    #[test]
    fn test_multiply_not_commutative() {
        let a = axis_angle(Vec3::X, 90.0);
        let b = axis_angle(Vec3::Y, 90.0);
        assert!(!approx_eq(multiply(a, b), multiply(b, a)));
    }

    #[test]
    fn test_conjugate() {
        let q = Vec4::new(1.0, -2.0, 3.0, 4.0);
        assert_eq!(conjugate(q), Vec4::new(-1.0, 2.0, -3.0, 4.0));
        let unit = axis_angle(Vec3::Z, 60.0);
        assert!(approx_eq(multiply(unit, conjugate(unit)), IDENTITY));
    }

    #[test]
    fn test_normalization_property() {
        let qs = samples();
        for &a in &qs {
            assert!((axis_angle(a.truncate() + Vec3::X, 25.0).length() - 1.0).abs() < EPS);
            for &b in &qs {
                assert!((multiply(a, b).length() - 1.0).abs() < EPS);
                assert!((hamilton_product(a, b).length() - 1.0).abs() < EPS);
                for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
                    assert!((slerp(a, b, t).length() - 1.0).abs() < EPS);
                }
            }
        }
        for order in RotationOrder::ALL {
            let q = from_euler(Vec3::new(12.0, -70.0, 200.0), order);
            assert!((q.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_axis_angle_normalizes_axis() {
        let a = axis_angle(Vec3::new(0.0, 5.0, 0.0), 90.0);
        let half = 45.0f32.to_radians();
        assert!(approx_eq(a, Vec4::new(0.0, half.sin(), 0.0, half.cos())));
    }

    #[test]
    fn test_rotate_vector() {
        let q = axis_angle(Vec3::Z, 90.0);
        let v = rotate_vector(q, Vec3::X);
        assert!((v - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_from_euler_zero_is_identity() {
        for order in RotationOrder::ALL {
            assert!(approx_eq(from_euler(Vec3::ZERO, order), IDENTITY), "{order}");
        }
    }

    #[test]
    fn test_from_euler_single_axis() {
        for order in RotationOrder::ALL {
            for axis in Axis::ALL {
                let mut euler = Vec3::ZERO;
                euler[axis.index()] = 50.0;
                let q = from_euler(euler, order);
                assert!(same_rotation(q, axis_angle(axis.unit(), 50.0)));
            }
        }
    }

    #[test]
    fn test_from_euler_order_composition() {
        let euler = Vec3::new(30.0, 45.0, 60.0);
        let rx = axis_angle(Vec3::X, 30.0);
        let ry = axis_angle(Vec3::Y, 45.0);
        let rz = axis_angle(Vec3::Z, 60.0);

        let xyz = from_euler(euler, RotationOrder::Xyz);
        assert!(same_rotation(xyz, multiply(rx, multiply(ry, rz))));

        // Unity order vector (1, 2, 0) composes Z * X * Y
        let unity = from_euler(euler, RotationOrder::UNITY);
        assert!(same_rotation(unity, multiply(rz, multiply(rx, ry))));
        let expected = Vec4::new(0.0223, 0.4397, 0.5320, 0.7233);
        assert!((unity - expected).abs().max_element() < 1e-4, "{unity}");
        let glam_unity = Quat::from_euler(
            glam::EulerRot::ZXY,
            60f32.to_radians(),
            30f32.to_radians(),
            45f32.to_radians(),
        );
        assert!(same_rotation(unity, Vec4::from(glam_unity)));
    }

    #[test]
    fn test_slerp_endpoints() {
        let qs = samples();
        for &a in &qs {
            for &b in &qs {
                assert!(same_rotation(slerp(a, b, 0.0), a));
                if approx_eq(a, b) {
                    continue;
                }
                assert!(same_rotation(slerp(a, b, 1.0), b));
            }
        }
    }

    #[test]
    fn test_slerp_same_input() {
        let q = axis_angle(Vec3::new(1.0, 1.0, 0.0), 33.0);
        for t in [0.0, 0.3, 0.5, 1.0, 1.5] {
            assert!(approx_eq(slerp(q, q, t), q));
        }
    }

    #[test]
    fn test_slerp_antipodal_returns_first() {
        let q = axis_angle(Vec3::X, 20.0);
        assert!(approx_eq(slerp(q, -q, 0.5), q));
    }

    #[test]
    fn test_slerp_half_turn_apart() {
        // w of q1 * conj(q2) is zero, so θ = π and sin(θ) is nearly zero
        let half_turn = axis_angle(Vec3::Y, 180.0);
        assert!(same_rotation(slerp(IDENTITY, half_turn, 1.0), half_turn));
        assert!(same_rotation(slerp(IDENTITY, half_turn, 0.5), axis_angle(Vec3::Y, 90.0)));
        assert!(same_rotation(slerp(IDENTITY, half_turn, 0.0), IDENTITY));
    }

    #[test]
    fn test_slerp_midpoint() {
        let q = slerp(IDENTITY, axis_angle(Vec3::Y, 90.0), 0.5);
        assert!(approx_eq(q, axis_angle(Vec3::Y, 45.0)));
    }

    #[test]
    fn test_slerp_normalizes_inputs() {
        let a = IDENTITY * 3.0;
        let b = axis_angle(Vec3::Y, 90.0) * 0.5;
        assert!(approx_eq(slerp(a, b, 0.0), IDENTITY));
        assert!(approx_eq(slerp(a, b, 1.0), axis_angle(Vec3::Y, 90.0)));
    }

    #[test]
    fn test_to_quat() {
        let q = to_quat(axis_angle(Vec3::Z, 90.0));
        assert!((q * Vec3::X - Vec3::Y).length() < EPS);
    }
}
