//! Depth-first propagation of joint transforms
//!
//! Each joint's local transform is `T(offset) * R(rotation)`, where the
//! rotation comes from the joint's Euler channels in the current frame,
//! optionally slerped towards the next frame. World transforms are composed
//! top-down, and every joint is handed to a [`JointVisitor`] as soon as its
//! world transform is known (pre-order, the same order as
//! [`JointIndex`](super::JointIndex)).

use crate::core::{Mat4, Vec3};
use crate::math::quaternion::{self, Quaternion};
use super::skeleton::Joint;

/// Receives each joint's world transform during a propagation pass
pub trait JointVisitor {
    fn visit(&mut self, joint: &Joint, world: &Mat4);
}

impl<F> JointVisitor for F
where
    F: FnMut(&Joint, &Mat4),
{
    fn visit(&mut self, joint: &Joint, world: &Mat4) {
        (self)(joint, world)
    }
}

/// Per-tick channel data: the two keyframes being blended and the blend weight
#[derive(Clone, Copy, Debug)]
pub struct FrameSample<'a> {
    pub current: &'a [f32],
    /// `None` on the last frame of the clip
    pub next: Option<&'a [f32]>,
    /// Progress from `current` towards `next`, in `[0, 1)`
    pub t: f32,
    pub interpolate: bool,
}

impl<'a> FrameSample<'a> {
    pub fn new(current: &'a [f32], next: Option<&'a [f32]>, t: f32, interpolate: bool) -> Self {
        Self {
            current,
            next,
            t,
            interpolate,
        }
    }

    /// A single frame with no blending
    pub fn still(current: &'a [f32]) -> Self {
        Self::new(current, None, 0.0, false)
    }

    /// The frame to blend towards, if blending applies this tick
    fn blend_target(&self) -> Option<&'a [f32]> {
        if self.interpolate { self.next } else { None }
    }

    /// Interpolated local rotation of a joint; identity for end sites
    pub fn rotation(&self, joint: &Joint) -> Quaternion {
        if joint.end_site {
            return quaternion::IDENTITY;
        }
        let euler = |frame: &[f32]| {
            quaternion::from_euler(read_channels(frame, joint.rotation_channels), joint.rotation_order)
        };
        let current = euler(self.current);
        match self.blend_target() {
            Some(next) => quaternion::slerp(current, euler(next), self.t),
            None => current,
        }
    }

    /// Interpolated translation from the joint's position channels, or zero
    pub fn position(&self, joint: &Joint) -> Vec3 {
        let Some(channels) = joint.position_channels else {
            return Vec3::ZERO;
        };
        let current = read_channels(self.current, channels);
        match self.blend_target() {
            Some(next) => current.lerp(read_channels(next, channels), self.t),
            None => current,
        }
    }
}

fn read_channels(frame: &[f32], channels: [usize; 3]) -> Vec3 {
    Vec3::new(frame[channels[0]], frame[channels[1]], frame[channels[2]])
}

/// Parent-relative transform of a joint: translate by the static offset,
/// then rotate about the joint's own origin (scale is identity).
pub fn local_transform(joint: &Joint, sample: &FrameSample<'_>) -> Mat4 {
    let rotation = quaternion::to_quat(sample.rotation(joint));
    Mat4::from_scale_rotation_translation(Vec3::ONE, rotation, joint.offset)
}

/// Transform inherited by the root: a pure translation from its own
/// position channels
pub fn root_transform(root: &Joint, sample: &FrameSample<'_>) -> Mat4 {
    Mat4::from_translation(sample.position(root))
}

/// Compute `joint`'s world transform from `parent`, report it, and recurse
/// into its children.
pub fn transform_joint<V>(joint: &Joint, sample: &FrameSample<'_>, parent: &Mat4, visitor: &mut V)
where
    V: JointVisitor + ?Sized,
{
    let world = *parent * local_transform(joint, sample);
    visitor.visit(joint, &world);
    if joint.end_site {
        return;
    }
    for child in &joint.children {
        transform_joint(child, sample, &world, visitor);
    }
}

/// Run one full pass from the root
pub fn propagate<V>(root: &Joint, sample: &FrameSample<'_>, visitor: &mut V)
where
    V: JointVisitor + ?Sized,
{
    let parent = root_transform(root, sample);
    transform_joint(root, sample, &parent, visitor);
}

/// Run one full pass and collect world transforms in visit order
pub fn collect_world_transforms(root: &Joint, sample: &FrameSample<'_>) -> Vec<Mat4> {
    let mut transforms = Vec::with_capacity(root.subtree_len());
    propagate(root, sample, &mut |_: &Joint, world: &Mat4| transforms.push(*world));
    transforms
}
