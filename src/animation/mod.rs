//! Skeletal BVH playback

pub mod skeleton;
pub mod timing;
pub mod propagation;
pub mod player;
pub mod baking;

pub use skeleton::{IndexedJoint, Joint, JointIndex, SkeletonData};
pub use timing::FrameClock;
pub use propagation::{FrameSample, JointVisitor};
pub use player::{PlaybackState, SkeletonPlayer};
pub use baking::{bake, BakedPose};
