//! Frame selection for a looping clip

use crate::core::{Error, Result};

/// Frame counts within this distance of an integer snap onto it, so index and
/// fraction agree at frame boundaries despite rounding in `time / frame_length`
const BOUNDARY_EPSILON: f32 = 1e-4;

/// Maps elapsed time onto a looping sequence of equally spaced samples
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    frame_length: f32,
    num_frames: usize,
}

impl FrameClock {
    /// Create a clock; `frame_length` must be positive and `num_frames` non-zero
    pub fn new(frame_length: f32, num_frames: usize) -> Result<Self> {
        if !(frame_length.is_finite() && frame_length > 0.0) {
            return Err(Error::InvalidFrameLength(frame_length));
        }
        if num_frames == 0 {
            return Err(Error::EmptyClip);
        }
        Ok(Self::from_parts(frame_length, num_frames))
    }

    /// Create a clock from already validated parts
    pub(crate) fn from_parts(frame_length: f32, num_frames: usize) -> Self {
        Self {
            frame_length,
            num_frames,
        }
    }

    pub fn frame_length(&self) -> f32 {
        self.frame_length
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Length of one loop in seconds
    pub fn duration(&self) -> f32 {
        self.frame_length * self.num_frames as f32
    }

    /// Unwrapped, fractional frame count at `time`
    fn frame_position(&self, time: f32) -> f32 {
        debug_assert!(time >= 0.0, "elapsed time must be non-negative, got {time}");
        let frames = time / self.frame_length;
        let nearest = frames.round();
        if (frames - nearest).abs() < BOUNDARY_EPSILON {
            nearest
        } else {
            frames
        }
    }

    /// Sample index at `time`, wrapping over the clip length
    pub fn frame_index(&self, time: f32) -> usize {
        (self.frame_position(time).floor() as usize) % self.num_frames
    }

    /// Progress from the current sample towards the next, in `[0, 1)`
    pub fn frame_fraction(&self, time: f32) -> f32 {
        let position = self.frame_position(time);
        position - position.floor()
    }

    /// Index of the sample to interpolate towards; `None` on the last sample
    pub fn next_frame(&self, index: usize) -> Option<usize> {
        let next = index + 1;
        (next < self.num_frames).then_some(next)
    }
}
