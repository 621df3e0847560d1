//! Runtime playback of a single looping clip

use std::sync::Arc;

use crate::core::{Mat4, PlaybackConfig, Result};
use super::propagation::{self, FrameSample, JointVisitor};
use super::skeleton::SkeletonData;
use super::timing::FrameClock;

/// Where a tick landed in the clip. Fully determined by the elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Elapsed clip time (host time already scaled by speed)
    pub time: f32,
    pub frame_index: usize,
    /// `None` when `frame_index` is the last sample
    pub next_frame_index: Option<usize>,
    /// Progress towards the next frame, in `[0, 1)`
    pub t: f32,
}

impl PlaybackState {
    /// Select frames for `time`
    pub fn at(clock: &FrameClock, time: f32) -> Self {
        let frame_index = clock.frame_index(time);
        Self {
            time,
            frame_index,
            next_frame_index: clock.next_frame(frame_index),
            t: clock.frame_fraction(time),
        }
    }

    /// Channel values of the current frame
    pub fn current_frame<'a>(&self, data: &'a SkeletonData) -> &'a [f32] {
        data.frame(self.frame_index)
    }

    /// Channel values of the frame being blended towards
    pub fn next_frame<'a>(&self, data: &'a SkeletonData) -> Option<&'a [f32]> {
        self.next_frame_index.map(|index| data.frame(index))
    }

    /// Per-tick working data for propagation
    pub fn sample<'a>(&self, data: &'a SkeletonData, interpolate: bool) -> FrameSample<'a> {
        FrameSample::new(
            self.current_frame(data),
            self.next_frame(data),
            self.t,
            interpolate,
        )
    }
}

impl SkeletonData {
    /// Evaluate the pose at `time` seconds into the (looping) clip, handing
    /// every joint's world transform to `visitor`
    pub fn evaluate<V>(&self, time: f32, interpolate: bool, visitor: &mut V) -> PlaybackState
    where
        V: JointVisitor + ?Sized,
    {
        let state = PlaybackState::at(&self.clock(), time);
        if state.next_frame_index.is_none() && interpolate {
            log::trace!("Frame {} is the last sample, holding it", state.frame_index);
        }
        propagation::propagate(&self.root, &state.sample(self, interpolate), visitor);
        state
    }

    /// World transforms of every joint at `time`, in depth-first order
    pub fn world_transforms(&self, time: f32, interpolate: bool) -> Vec<Mat4> {
        let state = PlaybackState::at(&self.clock(), time);
        propagation::collect_world_transforms(&self.root, &state.sample(self, interpolate))
    }
}

/// Plays one clip, looped, under a [`PlaybackConfig`]
#[derive(Clone, Debug)]
pub struct SkeletonPlayer {
    data: Arc<SkeletonData>,
    config: PlaybackConfig,
    state: Option<PlaybackState>,
}

impl SkeletonPlayer {
    /// Create a player with the default config
    pub fn new(data: Arc<SkeletonData>) -> Self {
        Self {
            data,
            config: PlaybackConfig::default(),
            state: None,
        }
    }

    /// Create a player with the given config, validated
    pub fn with_config(data: Arc<SkeletonData>, config: PlaybackConfig) -> Result<Self> {
        let config = config.validated()?;
        log::debug!(
            "New player for '{}' ({} frames), {:?}",
            data.root.name,
            data.num_frames,
            config
        );
        Ok(Self {
            data,
            config,
            state: None,
        })
    }

    /// Resume advancing the pose
    pub fn play(&mut self) {
        self.config.animate = true;
    }

    /// Stop advancing the pose (the last one stays with the renderer)
    pub fn pause(&mut self) {
        self.config.animate = false;
    }

    pub fn is_playing(&self) -> bool {
        self.config.animate
    }

    pub fn set_interpolate(&mut self, interpolate: bool) {
        self.config.interpolate = interpolate;
    }

    /// Set the speed multiplier (clamped to the accepted range)
    pub fn set_speed(&mut self, speed: f32) {
        self.config.set_speed(speed);
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn data(&self) -> &Arc<SkeletonData> {
        &self.data
    }

    /// State of the most recent evaluated tick
    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    /// Clip time for a host clock reading
    pub fn clip_time(&self, host_time: f32) -> f32 {
        host_time * self.config.speed
    }

    /// Per-tick entry point.
    ///
    /// Scales `host_time` by the playback speed, selects frames and walks the
    /// joint tree, reporting each world transform to `visitor`. Returns `None`
    /// without visiting anything while paused.
    pub fn update<V>(&mut self, host_time: f32, visitor: &mut V) -> Option<PlaybackState>
    where
        V: JointVisitor + ?Sized,
    {
        if !self.config.animate {
            return None;
        }
        let time = self.clip_time(host_time);
        let state = self.data.evaluate(time, self.config.interpolate, visitor);
        log::trace!(
            "t={:.4}s frame {} -> {:?} ({:.3})",
            time,
            state.frame_index,
            state.next_frame_index,
            state.t
        );
        self.state = Some(state);
        Some(state)
    }

    /// World transforms for a host clock reading, in depth-first joint order.
    /// Does not touch the player's state.
    pub fn world_transforms(&self, host_time: f32) -> Vec<Mat4> {
        self.data
            .world_transforms(self.clip_time(host_time), self.config.interpolate)
    }
}
