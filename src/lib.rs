//! bvh-player - skeletal motion-capture playback
//!
//! Turns the channel data of a parsed BVH clip into per-joint world
//! transforms every tick: quaternion algebra under arbitrary Euler orders,
//! looping frame timing with sub-frame interpolation, and depth-first
//! propagation of parent-relative transforms.

pub mod core;
pub mod math;
pub mod animation;

pub use animation::{Joint, JointVisitor, PlaybackState, SkeletonData, SkeletonPlayer};
pub use crate::core::{Error, PlaybackConfig, Result};
pub use math::RotationOrder;
