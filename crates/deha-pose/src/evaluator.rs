//! Rule evaluation: one pose's checks against one frame's landmarks.

use std::collections::BTreeMap;

use deha_core::{angle_at, Landmark, LandmarkFrame};
use serde::Serialize;

use crate::catalog::{JointCheck, PoseDefinition};

/// Per-joint correctness, aggregated across every check that touches a joint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JointStatus {
    joints: BTreeMap<Landmark, bool>,
}

impl JointStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// AND `ok` into the joint's status; a joint stays correct only while
    /// every check touching it passes.
    pub fn record(&mut self, landmark: Landmark, ok: bool) {
        self.joints
            .entry(landmark)
            .and_modify(|status| *status &= ok)
            .or_insert(ok);
    }

    pub fn get(&self, landmark: Landmark) -> Option<bool> {
        self.joints.get(&landmark).copied()
    }

    /// Correctness for colouring; joints no check touched count as correct
    pub fn is_correct(&self, landmark: Landmark) -> bool {
        self.get(landmark).unwrap_or(true)
    }

    /// A bone is correct when both of its endpoints are
    pub fn bone_ok(&self, a: Landmark, b: Landmark) -> bool {
        self.is_correct(a) && self.is_correct(b)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Landmark, bool)> + '_ {
        self.joints.iter().map(|(&lm, &ok)| (lm, ok))
    }
}

/// Measured outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub label: &'static str,
    pub angle_deg: f64,
    pub passed: bool,
}

/// Everything one evaluation produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub joint_status: JointStatus,
    /// Fix messages for failed checks, in check-definition order
    pub feedback: Vec<String>,
    /// floor(100 × passed / total), or 100 for a pose without checks
    pub raw_score: u8,
    pub outcomes: Vec<CheckOutcome>,
}

impl EvaluationResult {
    pub fn passed_checks(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }
}

/// Integer percentage of passed checks, rounded down
pub fn raw_score(passed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (passed * 100 / total) as u8
}

fn check_angle(check: &JointCheck, frame: &LandmarkFrame) -> f64 {
    let (a, _, c) = check.points;
    angle_at(&frame.point(a), &frame.point(check.vertex()), &frame.point(c))
}

/// Apply every check of `pose` to `frame`
pub fn evaluate(pose: &PoseDefinition, frame: &LandmarkFrame) -> EvaluationResult {
    let mut joint_status = JointStatus::new();
    let mut feedback = Vec::new();
    let mut outcomes = Vec::with_capacity(pose.checks.len());

    for check in pose.checks {
        let angle_deg = check_angle(check, frame);
        let passed = check.accepts(angle_deg);

        tracing::trace!(
            pose = pose.name,
            check = check.label,
            angle_deg,
            passed,
            "joint check"
        );

        if !passed {
            feedback.push(check.fix.to_string());
        }
        for landmark in check.landmarks() {
            joint_status.record(landmark, passed);
        }
        outcomes.push(CheckOutcome {
            label: check.label,
            angle_deg,
            passed,
        });
    }

    let passed = outcomes.iter().filter(|o| o.passed).count();

    EvaluationResult {
        joint_status,
        feedback,
        raw_score: raw_score(passed, outcomes.len()),
        outcomes,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use deha_core::Point2D;
    use Landmark::*;

    /// Frame with every landmark at the origin except the given overrides
    pub(crate) fn frame_with(overrides: &[(Landmark, (f64, f64))]) -> LandmarkFrame {
        let mut points = [Point2D::default(); Landmark::COUNT];
        for &(lm, (x, y)) in overrides {
            points[lm.index()] = Point2D::new(x, y);
        }
        LandmarkFrame::from_pixels(points).unwrap()
    }

    /// Place `a` and `c` around vertex `b` so the angle at `b` is `deg`
    pub(crate) fn bent(
        a: Landmark,
        b: Landmark,
        c: Landmark,
        deg: f64,
    ) -> Vec<(Landmark, (f64, f64))> {
        let (bx, by) = (400.0, 300.0);
        let rad = deg.to_radians();
        vec![
            (a, (bx, by - 100.0)),
            (b, (bx, by)),
            (c, (bx + 100.0 * rad.sin(), by - 100.0 * rad.cos())),
        ]
    }

    static RIGHT_ANGLE: &[JointCheck] = &[JointCheck::new(
        (LeftShoulder, LeftElbow, LeftWrist),
        90.0,
        90.0,
        "Elbow square",
        "Bend the elbow to exactly 90°",
    )];

    #[test]
    fn test_exact_angle_passes() {
        let pose = PoseDefinition::new("Square", 's', RIGHT_ANGLE);
        let frame = frame_with(&[
            (LeftShoulder, (100.0, 0.0)),
            (LeftElbow, (100.0, 100.0)),
            (LeftWrist, (200.0, 100.0)),
        ]);

        let result = evaluate(&pose, &frame);
        assert_eq!(result.raw_score, 100);
        assert!(result.feedback.is_empty());
        assert_eq!(result.joint_status.get(LeftElbow), Some(true));
    }

    #[test]
    fn test_off_angle_fails_with_fix() {
        let pose = PoseDefinition::new("Square", 's', RIGHT_ANGLE);
        let frame = frame_with(&bent(LeftShoulder, LeftElbow, LeftWrist, 45.0));

        let result = evaluate(&pose, &frame);
        assert_eq!(result.raw_score, 0);
        assert_eq!(result.feedback, vec!["Bend the elbow to exactly 90°"]);
        assert!((result.outcomes[0].angle_deg - 45.0).abs() < 1e-9);
        for lm in [LeftShoulder, LeftElbow, LeftWrist] {
            assert_eq!(result.joint_status.get(lm), Some(false));
        }
    }

    #[test]
    fn test_empty_pose_scores_full() {
        let pose = PoseDefinition::new("Rest", 'r', &[]);
        let result = evaluate(&pose, &frame_with(&[]));
        assert_eq!(result.raw_score, 100);
        assert!(result.feedback.is_empty());
        assert!(result.joint_status.is_empty());
    }

    const SHARED_HIP: &[JointCheck] = &[
        JointCheck::new(
            (LeftShoulder, LeftHip, LeftKnee),
            165.0,
            195.0,
            "Hip",
            "fix hip",
        ),
        JointCheck::new(
            (LeftHip, LeftKnee, LeftAnkle),
            75.0,
            105.0,
            "Knee",
            "fix knee",
        ),
    ];

    const SHARED_HIP_REVERSED: &[JointCheck] = &[SHARED_HIP[1], SHARED_HIP[0]];

    #[test]
    fn test_shared_joint_fails_if_any_check_fails() {
        // Straight line: hip check passes at 180°, knee check fails.
        let frame = frame_with(&[
            (LeftShoulder, (300.0, 100.0)),
            (LeftHip, (300.0, 300.0)),
            (LeftKnee, (300.0, 500.0)),
            (LeftAnkle, (300.0, 700.0)),
        ]);

        for checks in [SHARED_HIP, SHARED_HIP_REVERSED] {
            let pose = PoseDefinition::new("Shared", 'x', checks);
            let result = evaluate(&pose, &frame);

            assert_eq!(result.raw_score, 50);
            assert_eq!(result.joint_status.get(LeftShoulder), Some(true));
            assert_eq!(result.joint_status.get(LeftHip), Some(false));
            assert_eq!(result.joint_status.get(LeftKnee), Some(false));
            assert_eq!(result.joint_status.get(LeftAnkle), Some(false));
            assert_eq!(result.feedback, vec!["fix knee"]);
        }
    }

    #[test]
    fn test_feedback_follows_check_order() {
        let pose = PoseDefinition::new("Shared", 'x', SHARED_HIP);
        let result = evaluate(&pose, &frame_with(&bent(LeftShoulder, LeftHip, LeftKnee, 120.0)));
        assert_eq!(result.feedback, vec!["fix hip", "fix knee"]);
        assert_eq!(result.passed_checks(), 0);
    }

    #[test]
    fn test_collapsed_joint_reads_as_zero_degrees() {
        static FOLDED: &[JointCheck] = &[JointCheck::new(
            (RightHip, RightKnee, RightAnkle),
            0.0,
            10.0,
            "Folded",
            "unfold",
        )];
        let pose = PoseDefinition::new("Folded", 'f', FOLDED);
        // Every landmark sits at the origin.
        let result = evaluate(&pose, &frame_with(&[]));
        assert_eq!(result.outcomes[0].angle_deg, 0.0);
        assert_eq!(result.raw_score, 100);
    }

    #[test]
    fn test_raw_score_floors() {
        assert_eq!(raw_score(1, 3), 33);
        assert_eq!(raw_score(2, 3), 66);
        assert_eq!(raw_score(5, 6), 83);
        assert_eq!(raw_score(0, 0), 100);
    }

    #[test]
    fn test_untouched_joints_count_as_correct() {
        let status = JointStatus::new();
        assert!(status.is_correct(Nose));
        assert!(status.bone_ok(LeftEar, LeftEye));

        let mut status = JointStatus::new();
        status.record(LeftKnee, false);
        assert!(!status.bone_ok(LeftHip, LeftKnee));
    }
}
