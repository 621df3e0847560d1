//! Joint hierarchy and keyframe table handed over by the BVH parser

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result, Vec3};
use crate::math::RotationOrder;
use super::timing::FrameClock;

/// One joint of the hierarchy. Parents own their children outright.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    /// Unique within a skeleton
    pub name: String,
    /// Static parent-relative offset
    pub offset: Vec3,
    /// Frame channel index holding the X, Y and Z Euler angle (degrees)
    #[serde(default)]
    pub rotation_channels: [usize; 3],
    #[serde(default)]
    pub rotation_order: RotationOrder,
    /// Frame channel index holding the X, Y and Z translation (root only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_channels: Option<[usize; 3]>,
    /// Terminal marker: no rotation channels, no children
    #[serde(default)]
    pub end_site: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Joint>,
}

impl Joint {
    /// Create a rotating joint with no children
    pub fn new(
        name: impl Into<String>,
        offset: Vec3,
        rotation_channels: [usize; 3],
        rotation_order: RotationOrder,
    ) -> Self {
        Self {
            name: name.into(),
            offset,
            rotation_channels,
            rotation_order,
            position_channels: None,
            end_site: false,
            children: Vec::new(),
        }
    }

    /// Create an end site
    pub fn end_site(name: impl Into<String>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            offset,
            rotation_channels: [0; 3],
            rotation_order: RotationOrder::default(),
            position_channels: None,
            end_site: true,
            children: Vec::new(),
        }
    }

    /// Attach root translation channels
    pub fn with_position_channels(mut self, channels: [usize; 3]) -> Self {
        self.position_channels = Some(channels);
        self
    }

    /// Append a child and return self (builder style)
    pub fn with_child(mut self, child: Joint) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child
    pub fn add_child(&mut self, child: Joint) {
        self.children.push(child);
    }

    /// Number of joints in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Joint::subtree_len).sum::<usize>()
    }

    /// Highest channel index this joint reads, if any
    fn max_channel(&self) -> Option<usize> {
        let rotation = (!self.end_site).then(|| self.rotation_channels.iter().copied().max()).flatten();
        let position = self.position_channels.and_then(|c| c.into_iter().max());
        rotation.max(position)
    }
}

/// A parsed clip: joint tree plus one channel array per sample.
///
/// Immutable after construction; share it between players behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkeletonData {
    pub root: Joint,
    /// Seconds per sample
    pub frame_length: f32,
    pub num_frames: usize,
    pub keyframes: Vec<Vec<f32>>,
}

impl SkeletonData {
    /// Build and validate a clip. `num_frames` is taken from `keyframes`.
    pub fn new(root: Joint, frame_length: f32, keyframes: Vec<Vec<f32>>) -> Result<Self> {
        let data = Self {
            root,
            frame_length,
            num_frames: keyframes.len(),
            keyframes,
        };
        data.validate()?;
        Ok(data)
    }

    /// Check every invariant the per-tick path relies on
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_length.is_finite() && self.frame_length > 0.0) {
            return Err(Error::InvalidFrameLength(self.frame_length));
        }
        if self.num_frames == 0 {
            return Err(Error::EmptyClip);
        }
        if self.keyframes.len() != self.num_frames {
            return Err(Error::FrameCountMismatch {
                expected: self.num_frames,
                actual: self.keyframes.len(),
            });
        }

        let channels = self.keyframes[0].len();
        for (frame, values) in self.keyframes.iter().enumerate() {
            if values.len() != channels {
                return Err(Error::ChannelCountMismatch {
                    frame,
                    expected: channels,
                    actual: values.len(),
                });
            }
        }

        let mut names = HashSet::new();
        validate_joint(&self.root, true, channels, &mut names)?;

        log::debug!(
            "Validated skeleton: {} joints, {} frames x {} channels, {:.4}s per frame",
            names.len(),
            self.num_frames,
            channels,
            self.frame_length
        );
        Ok(())
    }

    /// Number of channels in every keyframe
    pub fn channel_count(&self) -> usize {
        self.keyframes.first().map_or(0, Vec::len)
    }

    /// Number of joints, end sites included
    pub fn joint_count(&self) -> usize {
        self.root.subtree_len()
    }

    /// Channel values of one sample
    pub fn frame(&self, index: usize) -> &[f32] {
        &self.keyframes[index]
    }

    /// Length of one loop of the clip in seconds
    pub fn duration(&self) -> f32 {
        self.frame_length * self.num_frames as f32
    }

    /// Frame timing for this clip
    pub fn clock(&self) -> FrameClock {
        FrameClock::from_parts(self.frame_length, self.num_frames)
    }

    /// Flat depth-first view of the joint tree
    pub fn joint_index(&self) -> JointIndex<'_> {
        JointIndex::new(&self.root)
    }

    /// Find a joint by name
    pub fn find_joint(&self, name: &str) -> Result<&Joint> {
        let index = self.joint_index();
        index
            .find(name)
            .and_then(|i| index.get(i))
            .map(|entry| entry.joint)
            .ok_or_else(|| Error::UnknownJoint(name.to_string()))
    }

    /// Rest-pose position of every joint (offsets only, no channel data),
    /// in depth-first order
    pub fn rest_positions(&self) -> Vec<Vec3> {
        fn walk(joint: &Joint, parent_position: Vec3, out: &mut Vec<Vec3>) {
            let position = parent_position + joint.offset;
            out.push(position);
            for child in &joint.children {
                walk(child, position, out);
            }
        }

        let mut positions = Vec::with_capacity(self.joint_count());
        walk(&self.root, Vec3::ZERO, &mut positions);
        positions
    }

    /// Parse and validate a JSON document produced by an external parser
    pub fn from_json_str(json: &str) -> Result<Self> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate a JSON skeleton file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let data = Self::from_json_str(&json)?;
        log::info!(
            "Loaded skeleton '{}' from {}: {} joints, {} frames ({:.2}s)",
            data.root.name,
            path.display(),
            data.joint_count(),
            data.num_frames,
            data.duration()
        );
        Ok(data)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn validate_joint<'a>(
    joint: &'a Joint,
    is_root: bool,
    channels: usize,
    names: &mut HashSet<&'a str>,
) -> Result<()> {
    if !names.insert(joint.name.as_str()) {
        return Err(Error::DuplicateJoint(joint.name.clone()));
    }
    if joint.end_site && !joint.children.is_empty() {
        return Err(Error::EndSiteWithChildren(joint.name.clone()));
    }
    if !is_root && joint.position_channels.is_some() {
        return Err(Error::MisplacedPositionChannels(joint.name.clone()));
    }
    if let Some(index) = joint.max_channel().filter(|&index| index >= channels) {
        return Err(Error::ChannelOutOfRange {
            joint: joint.name.clone(),
            index,
            channels,
        });
    }
    for child in &joint.children {
        validate_joint(child, false, channels, names)?;
    }
    Ok(())
}

/// Entry of a [`JointIndex`]
#[derive(Clone, Copy, Debug)]
pub struct IndexedJoint<'a> {
    pub joint: &'a Joint,
    /// Index of the parent entry; `None` for the root
    pub parent: Option<usize>,
    /// Distance from the root
    pub depth: usize,
}

/// Depth-first (pre-order) flattening of a joint tree with non-owning parent
/// indices. Entry order matches the order in which propagation visits joints.
#[derive(Clone, Debug)]
pub struct JointIndex<'a> {
    joints: Vec<IndexedJoint<'a>>,
    names: HashMap<&'a str, usize>,
}

impl<'a> JointIndex<'a> {
    /// Flatten the tree rooted at `root`
    pub fn new(root: &'a Joint) -> Self {
        let mut joints = Vec::new();
        let mut names = HashMap::new();
        let mut stack = vec![(root, None, 0)];

        while let Some((joint, parent, depth)) = stack.pop() {
            let index = joints.len();
            joints.push(IndexedJoint { joint, parent, depth });
            names.entry(joint.name.as_str()).or_insert(index);
            for child in joint.children.iter().rev() {
                stack.push((child, Some(index), depth + 1));
            }
        }

        Self { joints, names }
    }

    /// Number of joints
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Get an entry by index
    pub fn get(&self, index: usize) -> Option<&IndexedJoint<'a>> {
        self.joints.get(index)
    }

    /// Find a joint index by name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Get the parent index of a joint
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.joints.get(index)?.parent
    }

    /// Get all direct children of a joint
    pub fn children_of(&self, index: usize) -> Vec<usize> {
        self.joints
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| (entry.parent == Some(index)).then_some(idx))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedJoint<'a>> {
        self.joints.iter()
    }

    /// Joint names in index order
    pub fn names(&self) -> Vec<&'a str> {
        self.joints.iter().map(|entry| entry.joint.name.as_str()).collect()
    }
}
