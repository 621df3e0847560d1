//! Offline sampling of a whole clip
//!
//! Samples are independent ticks over the same immutable [`SkeletonData`], so
//! they are evaluated in parallel with rayon.

use rayon::prelude::*;

use crate::core::{Mat4, Vec3};
use super::skeleton::SkeletonData;

/// World transforms of every joint at one sample time
#[derive(Clone, Debug, PartialEq)]
pub struct BakedPose {
    pub time: f32,
    /// Depth-first joint order
    pub transforms: Vec<Mat4>,
}

impl BakedPose {
    /// World-space joint positions
    pub fn positions(&self) -> Vec<Vec3> {
        self.transforms
            .iter()
            .map(|m| m.w_axis.truncate())
            .collect()
    }
}

/// Sample one loop of the clip at `samples_per_frame` evenly spaced times per
/// keyframe interval. Poses are returned in time order.
pub fn bake(data: &SkeletonData, interpolate: bool, samples_per_frame: usize) -> Vec<BakedPose> {
    let samples_per_frame = samples_per_frame.max(1);
    let total = data.num_frames * samples_per_frame;
    let step = data.frame_length / samples_per_frame as f32;

    let start = std::time::Instant::now();
    let poses: Vec<BakedPose> = (0..total)
        .into_par_iter()
        .map(|i| {
            let time = i as f32 * step;
            BakedPose {
                time,
                transforms: data.world_transforms(time, interpolate),
            }
        })
        .collect();

    log::info!(
        "Baked {} poses of {} joints in {:.1}ms",
        poses.len(),
        data.joint_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    poses
}
