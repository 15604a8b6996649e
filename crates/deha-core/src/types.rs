//! Fundamental types for the DEHA pose engine.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 33-point body landmark schema emitted by the pose detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    pub const COUNT: usize = 33;

    /// All landmarks in detector output order
    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Nose,
        Landmark::LeftEyeInner,
        Landmark::LeftEye,
        Landmark::LeftEyeOuter,
        Landmark::RightEyeInner,
        Landmark::RightEye,
        Landmark::RightEyeOuter,
        Landmark::LeftEar,
        Landmark::RightEar,
        Landmark::MouthLeft,
        Landmark::MouthRight,
        Landmark::LeftShoulder,
        Landmark::RightShoulder,
        Landmark::LeftElbow,
        Landmark::RightElbow,
        Landmark::LeftWrist,
        Landmark::RightWrist,
        Landmark::LeftPinky,
        Landmark::RightPinky,
        Landmark::LeftIndex,
        Landmark::RightIndex,
        Landmark::LeftThumb,
        Landmark::RightThumb,
        Landmark::LeftHip,
        Landmark::RightHip,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
        Landmark::LeftHeel,
        Landmark::RightHeel,
        Landmark::LeftFootIndex,
        Landmark::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Face-internal and hand-detail points that overlays leave undrawn
    pub fn is_detail(self) -> bool {
        matches!(
            self,
            Landmark::LeftEyeInner
                | Landmark::RightEyeInner
                | Landmark::LeftEyeOuter
                | Landmark::RightEyeOuter
                | Landmark::MouthLeft
                | Landmark::MouthRight
                | Landmark::LeftPinky
                | Landmark::RightPinky
                | Landmark::LeftIndex
                | Landmark::RightIndex
                | Landmark::LeftThumb
                | Landmark::RightThumb
        )
    }

    /// Bones drawn between landmarks, tagged with their body region
    pub fn skeleton_connections() -> &'static [(Landmark, Landmark, BodyRegion)] {
        use BodyRegion::*;
        use Landmark::*;
        &[
            (LeftEar, LeftEye, Head),
            (RightEar, RightEye, Head),
            (LeftEye, Nose, Head),
            (RightEye, Nose, Head),
            (LeftShoulder, RightShoulder, Torso),
            (LeftShoulder, LeftHip, Torso),
            (RightShoulder, RightHip, Torso),
            (LeftHip, RightHip, Torso),
            (LeftShoulder, LeftElbow, LeftArm),
            (LeftElbow, LeftWrist, LeftArm),
            (RightShoulder, RightElbow, RightArm),
            (RightElbow, RightWrist, RightArm),
            (LeftHip, LeftKnee, LeftLeg),
            (LeftKnee, LeftAnkle, LeftLeg),
            (LeftAnkle, LeftHeel, LeftLeg),
            (LeftHeel, LeftFootIndex, LeftLeg),
            (RightHip, RightKnee, RightLeg),
            (RightKnee, RightAnkle, RightLeg),
            (RightAnkle, RightHeel, RightLeg),
            (RightHeel, RightFootIndex, RightLeg),
        ]
    }
}

/// Coarse grouping of skeleton bones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    Head,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

/// 2D position in image space (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Vector pointing from `origin` to this point
    pub fn offset_from(&self, origin: &Point2D) -> Vector2<f64> {
        self.to_nalgebra() - origin.to_nalgebra()
    }
}

/// Detector output for a single landmark, normalized to [0, 1] per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

impl NormalizedLandmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_finite()
            && self.visibility.is_finite()
    }
}

/// Pixel dimensions of the camera frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::FrameSize { width, height });
        }
        Ok(Self { width, height })
    }
}

/// One frame's complete landmark set in pixel space.
///
/// Every landmark is present once construction succeeds, so lookups by
/// [`Landmark`] are infallible.
#[derive(Debug, Clone)]
pub struct LandmarkFrame {
    points: [Point2D; Landmark::COUNT],
    visibility: [f32; Landmark::COUNT],
}

impl LandmarkFrame {
    /// Scale normalized detector output to whole pixels of `size`.
    ///
    /// Coordinates are truncated toward zero, matching how the detector
    /// adapter has always rasterized landmark positions.
    pub fn from_normalized(landmarks: &[NormalizedLandmark], size: FrameSize) -> Result<Self> {
        if landmarks.len() != Landmark::COUNT {
            return Err(Error::LandmarkCount {
                expected: Landmark::COUNT,
                actual: landmarks.len(),
            });
        }

        let mut points = [Point2D::default(); Landmark::COUNT];
        let mut visibility = [0.0f32; Landmark::COUNT];

        for (index, lm) in landmarks.iter().enumerate() {
            if !lm.is_finite() {
                return Err(Error::NonFiniteLandmark { index });
            }
            points[index] = Point2D::new(
                (lm.x as f64 * size.width as f64).trunc(),
                (lm.y as f64 * size.height as f64).trunc(),
            );
            visibility[index] = lm.visibility;
        }

        Ok(Self { points, visibility })
    }

    /// Build a frame from positions already in pixel space, fully visible
    pub fn from_pixels(points: [Point2D; Landmark::COUNT]) -> Result<Self> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(Error::NonFiniteLandmark { index });
        }

        Ok(Self {
            points,
            visibility: [1.0; Landmark::COUNT],
        })
    }

    pub fn point(&self, landmark: Landmark) -> Point2D {
        self.points[landmark.index()]
    }

    pub fn visibility(&self, landmark: Landmark) -> f32 {
        self.visibility[landmark.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(x: f32, y: f32) -> Vec<NormalizedLandmark> {
        vec![NormalizedLandmark::new(x, y, 0.0, 0.9); Landmark::COUNT]
    }

    #[test]
    fn test_landmark_index_roundtrip() {
        for i in 0..Landmark::COUNT as u8 {
            let lm = Landmark::from_index(i).unwrap();
            assert_eq!(lm as u8, i);
        }
        assert!(Landmark::from_index(33).is_none());
    }

    #[test]
    fn test_from_normalized_scales_and_truncates() {
        let size = FrameSize::new(1280, 720).unwrap();
        let frame = LandmarkFrame::from_normalized(&uniform(0.5004, 0.25), size).unwrap();

        let p = frame.point(Landmark::LeftHip);
        assert_eq!(p, Point2D::new(640.0, 180.0));
        assert!((frame.visibility(Landmark::LeftHip) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_from_normalized_rejects_wrong_count() {
        let size = FrameSize::new(640, 480).unwrap();
        let mut lms = uniform(0.1, 0.1);
        lms.pop();

        let err = LandmarkFrame::from_normalized(&lms, size).unwrap_err();
        assert!(matches!(
            err,
            Error::LandmarkCount {
                expected: 33,
                actual: 32
            }
        ));
    }

    #[test]
    fn test_from_normalized_rejects_nan() {
        let size = FrameSize::new(640, 480).unwrap();
        let mut lms = uniform(0.1, 0.1);
        lms[12].y = f32::NAN;

        let err = LandmarkFrame::from_normalized(&lms, size).unwrap_err();
        assert!(matches!(err, Error::NonFiniteLandmark { index: 12 }));
    }

    #[test]
    fn test_zero_frame_size_rejected() {
        assert!(FrameSize::new(0, 480).is_err());
        assert!(FrameSize::new(640, 0).is_err());
    }

    #[test]
    fn test_skeleton_connections_skip_detail_points() {
        let bones = Landmark::skeleton_connections();
        assert_eq!(bones.len(), 20);
        assert!(bones.iter().all(|(a, b, _)| !a.is_detail() && !b.is_detail()));
    }

    #[test]
    fn test_landmark_serde_names() {
        let json = serde_json::to_string(&Landmark::LeftShoulder).unwrap();
        assert_eq!(json, "\"left_shoulder\"");
    }
}
