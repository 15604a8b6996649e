//! Static registry of the poses the engine can coach.
//!
//! Every pose is plain data: an ordered list of joint-angle checks. All poses
//! share one evaluation algorithm (see [`crate::evaluator`]), so adding a pose
//! means adding a table entry here.
//!
//! Ranges are deliberately permissive; they are meant to be tightened once
//! measured angle data is available.

use deha_core::Landmark::{self, *};
use serde::Serialize;

/// A single angle rule: the angle at `points.1`, formed with `points.0` and
/// `points.2`, must lie within `[min_deg, max_deg]` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointCheck {
    pub points: (Landmark, Landmark, Landmark),
    pub min_deg: f64,
    pub max_deg: f64,
    pub label: &'static str,
    pub fix: &'static str,
}

impl JointCheck {
    pub const fn new(
        points: (Landmark, Landmark, Landmark),
        min_deg: f64,
        max_deg: f64,
        label: &'static str,
        fix: &'static str,
    ) -> Self {
        Self {
            points,
            min_deg,
            max_deg,
            label,
            fix,
        }
    }

    pub fn vertex(&self) -> Landmark {
        self.points.1
    }

    pub fn landmarks(&self) -> [Landmark; 3] {
        [self.points.0, self.points.1, self.points.2]
    }

    pub fn accepts(&self, angle_deg: f64) -> bool {
        self.min_deg <= angle_deg && angle_deg <= self.max_deg
    }
}

/// A named pose with its activation key and ordered checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseDefinition {
    pub name: &'static str,
    pub key: char,
    pub checks: &'static [JointCheck],
}

impl PoseDefinition {
    pub const fn new(name: &'static str, key: char, checks: &'static [JointCheck]) -> Self {
        Self { name, key, checks }
    }

    /// Display name without any parenthesised qualifier
    pub fn short_name(&self) -> &'static str {
        self.name.split('(').next().unwrap_or(self.name).trim()
    }
}

const MOUNTAIN: &[JointCheck] = &[
    JointCheck::new(
        (LeftShoulder, LeftHip, LeftKnee),
        165.0,
        195.0,
        "Left hip alignment",
        "Straighten left side — hip is not neutral",
    ),
    JointCheck::new(
        (RightShoulder, RightHip, RightKnee),
        165.0,
        195.0,
        "Right hip alignment",
        "Straighten right side — hip is not neutral",
    ),
    JointCheck::new(
        (LeftHip, LeftKnee, LeftAnkle),
        165.0,
        195.0,
        "Left knee",
        "Straighten the left knee fully",
    ),
    JointCheck::new(
        (RightHip, RightKnee, RightAnkle),
        165.0,
        195.0,
        "Right knee",
        "Straighten the right knee fully",
    ),
    JointCheck::new(
        (LeftElbow, LeftShoulder, LeftHip),
        150.0,
        210.0,
        "Left arm",
        "Relax left arm straight alongside the body",
    ),
    JointCheck::new(
        (RightElbow, RightShoulder, RightHip),
        150.0,
        210.0,
        "Right arm",
        "Relax right arm straight alongside the body",
    ),
];

const WARRIOR_I: &[JointCheck] = &[
    JointCheck::new(
        (LeftHip, LeftKnee, LeftAnkle),
        75.0,
        105.0,
        "Front knee bend",
        "Bend front knee to 90° over the ankle",
    ),
    JointCheck::new(
        (RightHip, RightKnee, RightAnkle),
        155.0,
        185.0,
        "Back leg",
        "Straighten the back leg fully",
    ),
    JointCheck::new(
        (LeftElbow, LeftShoulder, LeftHip),
        155.0,
        210.0,
        "Left arm raise",
        "Raise the left arm straight overhead",
    ),
    JointCheck::new(
        (RightElbow, RightShoulder, RightHip),
        155.0,
        210.0,
        "Right arm raise",
        "Raise the right arm straight overhead",
    ),
    JointCheck::new(
        (LeftShoulder, LeftHip, LeftKnee),
        155.0,
        195.0,
        "Torso upright",
        "Keep the torso upright — do not lean forward",
    ),
];

const WARRIOR_II: &[JointCheck] = &[
    JointCheck::new(
        (LeftHip, LeftKnee, LeftAnkle),
        75.0,
        105.0,
        "Front knee",
        "Bend front knee to 90° — track over second toe",
    ),
    JointCheck::new(
        (RightHip, RightKnee, RightAnkle),
        155.0,
        185.0,
        "Back leg",
        "Straighten the back leg completely",
    ),
    JointCheck::new(
        (LeftElbow, LeftShoulder, RightShoulder),
        155.0,
        205.0,
        "Left arm extension",
        "Extend left arm fully parallel to the floor",
    ),
    JointCheck::new(
        (RightElbow, RightShoulder, LeftShoulder),
        155.0,
        205.0,
        "Right arm extension",
        "Extend right arm fully parallel to the floor",
    ),
];

const TREE: &[JointCheck] = &[
    JointCheck::new(
        (LeftHip, LeftKnee, LeftAnkle),
        155.0,
        185.0,
        "Standing leg",
        "Straighten the standing leg fully",
    ),
    JointCheck::new(
        (RightHip, RightKnee, RightAnkle),
        30.0,
        90.0,
        "Raised leg",
        "Bend the raised knee outward and press foot to thigh",
    ),
    JointCheck::new(
        (LeftElbow, LeftShoulder, LeftHip),
        155.0,
        210.0,
        "Left arm",
        "Raise left arm overhead — reach through fingertips",
    ),
    JointCheck::new(
        (RightElbow, RightShoulder, RightHip),
        155.0,
        210.0,
        "Right arm",
        "Raise right arm overhead — reach through fingertips",
    ),
];

const T_POSE: &[JointCheck] = &[
    JointCheck::new(
        (LeftElbow, LeftShoulder, LeftHip),
        80.0,
        100.0,
        "Left arm horizontal",
        "Raise left arm to shoulder height — perfectly horizontal",
    ),
    JointCheck::new(
        (RightElbow, RightShoulder, RightHip),
        80.0,
        100.0,
        "Right arm horizontal",
        "Raise right arm to shoulder height — perfectly horizontal",
    ),
    JointCheck::new(
        (LeftHip, LeftKnee, LeftAnkle),
        165.0,
        195.0,
        "Left leg straight",
        "Straighten the left leg fully",
    ),
    JointCheck::new(
        (RightHip, RightKnee, RightAnkle),
        165.0,
        195.0,
        "Right leg straight",
        "Straighten the right leg fully",
    ),
];

const STANDARD_POSES: &[PoseDefinition] = &[
    PoseDefinition::new("Mountain Pose", '1', MOUNTAIN),
    PoseDefinition::new("Warrior I", '2', WARRIOR_I),
    PoseDefinition::new("Warrior II", '3', WARRIOR_II),
    PoseDefinition::new("Tree Pose", '4', TREE),
    PoseDefinition::new("T-Pose (neutral)", '5', T_POSE),
];

static STANDARD: PoseCatalog = PoseCatalog {
    poses: STANDARD_POSES,
};

/// Ordered, read-only pose registry
#[derive(Debug, Clone, Copy)]
pub struct PoseCatalog {
    poses: &'static [PoseDefinition],
}

impl PoseCatalog {
    /// The five built-in poses, in activation-key order
    pub fn standard() -> &'static PoseCatalog {
        &STANDARD
    }

    /// Wrap a custom static pose table.
    ///
    /// Returns `None` for an empty table or one with duplicate names or keys.
    pub fn from_static(poses: &'static [PoseDefinition]) -> Option<Self> {
        if poses.is_empty() {
            return None;
        }
        for (i, pose) in poses.iter().enumerate() {
            if poses[..i]
                .iter()
                .any(|p| p.name == pose.name || p.key == pose.key)
            {
                return None;
            }
        }
        Some(Self { poses })
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// First pose in catalog order; catalogs are never empty
    pub fn first(&self) -> &'static PoseDefinition {
        &self.poses[0]
    }

    pub fn get(&self, index: usize) -> Option<&'static PoseDefinition> {
        self.poses.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static PoseDefinition> {
        self.poses.iter()
    }

    pub fn index_of_key(&self, key: char) -> Option<usize> {
        self.poses.iter().position(|p| p.key == key)
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.poses.iter().position(|p| p.name == name)
    }

    pub fn by_key(&self, key: char) -> Option<&'static PoseDefinition> {
        self.index_of_key(key).map(|i| &self.poses[i])
    }

    pub fn by_name(&self, name: &str) -> Option<&'static PoseDefinition> {
        self.index_of_name(name).map(|i| &self.poses[i])
    }

    /// Index after `index`, wrapping to the first pose
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.poses.len()
    }

    /// Index before `index`, wrapping to the last pose
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.poses.len() - 1) % self.poses.len()
    }

    /// Pose-switch hint lines, e.g. `"[5] T-Pose"`
    pub fn hints(&self) -> Vec<String> {
        self.poses
            .iter()
            .map(|p| format!("[{}] {}", p.key, p.short_name()))
            .collect()
    }
}
