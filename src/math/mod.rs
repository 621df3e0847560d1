//! Numeric utilities: quaternion algebra, rotation orders, bone orientation

pub mod quaternion;
pub mod rotation_order;
pub mod orientation;

pub use quaternion::Quaternion;
pub use rotation_order::{Axis, RotationOrder};
pub use orientation::{rotate_towards_vector, BoneSegment};
