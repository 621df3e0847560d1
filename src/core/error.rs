//! Error types for skeleton handoff and loading

use thiserror::Error;

/// Main error type for the crate
///
/// Every variant except `Io` and `Json` is a handoff validation failure: the
/// skeleton delivered by the parser does not satisfy the invariants the
/// per-tick path relies on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rotation order {0:?} is not a permutation of (0, 1, 2)")]
    InvalidRotationOrder([i32; 3]),

    #[error("frame length must be positive and finite, got {0}")]
    InvalidFrameLength(f32),

    #[error("playback speed must be a number, got {0}")]
    InvalidSpeed(f32),

    #[error("clip has no frames")]
    EmptyClip,

    #[error("clip declares {expected} frames but carries {actual} keyframes")]
    FrameCountMismatch { expected: usize, actual: usize },

    #[error("keyframe {frame} has {actual} channels, expected {expected}")]
    ChannelCountMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error("joint '{joint}' references channel {index}, but frames carry {channels} channels")]
    ChannelOutOfRange {
        joint: String,
        index: usize,
        channels: usize,
    },

    #[error("joint name '{0}' appears more than once")]
    DuplicateJoint(String),

    #[error("end site '{0}' has children")]
    EndSiteWithChildren(String),

    #[error("joint '{0}' has position channels but is not the root")]
    MisplacedPositionChannels(String),

    #[error("joint '{0}' not found")]
    UnknownJoint(String),
}
