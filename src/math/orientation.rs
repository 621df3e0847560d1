//! Orienting bone geometry along joint-to-joint segments

use crate::core::{Mat4, Vec3};

/// Reference axis that bone geometry is modelled along
pub const UP: Vec3 = Vec3::Y;

/// Rotation that maps [`UP`] onto the direction of `v`.
///
/// Built as a tilt about X (bringing +Y into the YZ plane at the right
/// elevation) followed by a heading about Y, both angles from `atan2`.
/// Returns `None` for a zero-length or non-finite `v`.
pub fn rotate_towards_vector(v: Vec3) -> Option<Mat4> {
    let v = v.try_normalize()?;
    let tilt = v.x.hypot(v.z).atan2(v.y);
    let heading = v.x.atan2(v.z);
    Some(Mat4::from_rotation_y(heading) * Mat4::from_rotation_x(tilt))
}

/// Placement of a bone spanning two joint positions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneSegment {
    /// Midpoint between the two joints
    pub center: Vec3,
    /// Distance between the two joints
    pub length: f32,
    /// Rotation aligning [`UP`] with the segment direction
    pub rotation: Mat4,
}

impl BoneSegment {
    /// Segment from `start` to `end`, or `None` if the points coincide
    pub fn between(start: Vec3, end: Vec3) -> Option<Self> {
        let direction = end - start;
        let rotation = rotate_towards_vector(direction)?;
        Some(Self {
            center: (start + end) * 0.5,
            length: direction.length(),
            rotation,
        })
    }

    /// Model matrix for a unit cylinder spanning y in [-1, 1] with diameter 1,
    /// stretched to this segment with the given diameter.
    pub fn to_mat4(&self, diameter: f32) -> Mat4 {
        Mat4::from_translation(self.center)
            * self.rotation
            * Mat4::from_scale(Vec3::new(diameter, self.length * 0.5, diameter))
    }
}
