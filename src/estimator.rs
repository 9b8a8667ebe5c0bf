//! Collaborator seams: the pose estimator and the gesture estimator.
//!
//! Neither is implemented here. A host wires in a hand-landmark model behind
//! [`PoseEstimator`] and a curl/direction scorer behind [`GestureEstimator`];
//! tests use scripted fakes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::GestureCatalog;
use crate::hand::{CurlState, Direction, Finger, HandSide, ParseLabelError};

/// Number of landmarks per hand in the MediaPipe hand model.
pub const LANDMARK_COUNT: usize = 21;

/// A 2D keypoint in image pixels, used for the debug overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypoint2 {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
}

/// A normalized 3D keypoint, as fed to the gesture estimator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypoint3 {
    /// X (hand-relative, metres).
    pub x: f32,
    /// Y (hand-relative, metres).
    pub y: f32,
    /// Z (depth, metres).
    pub z: f32,
}

/// One hand as returned by the pose estimator for a single frame.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectedHand {
    /// Handedness label as reported (`"Left"` / `"Right"`).
    pub handedness: String,
    /// Image-space landmarks in MediaPipe order (wrist first).
    pub keypoints: Vec<Keypoint2>,
    /// Normalized 3D landmarks in the same order.
    pub keypoints_3d: Vec<Keypoint3>,
}

impl DetectedHand {
    /// Parse the handedness label into a [`HandSide`].
    pub fn side(&self) -> Result<HandSide, ParseLabelError> {
        self.handedness.parse()
    }
}

/// Classified pose of one finger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FingerPose {
    /// Which finger.
    pub finger: Finger,
    /// Discretized curl.
    pub curl: CurlState,
    /// Discretized pointing direction.
    pub direction: Direction,
}

/// Per-finger pose data for one hand in one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoseData(pub Vec<FingerPose>);

impl PoseData {
    /// Parse the estimator's textual rows, e.g. `("Index", "No Curl", "Horizontal Left")`.
    pub fn from_labels(rows: &[(&str, &str, &str)]) -> Result<Self, ParseLabelError> {
        rows.iter()
            .map(|&(finger, curl, direction)| -> Result<FingerPose, ParseLabelError> {
                Ok(FingerPose {
                    finger: finger.parse()?,
                    curl: curl.parse()?,
                    direction: direction.parse()?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PoseData)
    }

    /// Every finger at the same curl and direction.
    pub fn uniform(curl: CurlState, direction: Direction) -> Self {
        PoseData(
            Finger::ALL
                .iter()
                .map(|&finger| FingerPose { finger, curl, direction })
                .collect(),
        )
    }

    /// Rows in estimator order.
    pub fn fingers(&self) -> &[FingerPose] {
        &self.0
    }

    /// Pose of `finger`, if reported.
    pub fn get(&self, finger: Finger) -> Option<&FingerPose> {
        self.0.iter().find(|p| p.finger == finger)
    }

    /// `true` if at least one finger points in one of `directions`.
    pub fn any_direction_in(&self, directions: &[Direction]) -> bool {
        self.0.iter().any(|p| directions.contains(&p.direction))
    }
}

/// A scored candidate gesture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureScore {
    /// Gesture name from the catalog.
    pub name: String,
    /// Estimator confidence (0–10 for the fingerpose scorer).
    pub score: f32,
}

/// Gesture estimator output for one hand.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimation {
    /// Candidates above the estimator's own threshold; may be empty.
    pub gestures: Vec<GestureScore>,
    /// Per-finger classification the scores were computed from.
    pub pose_data: PoseData,
}

impl Estimation {
    /// Highest-scoring candidate. On a tie the later candidate wins.
    pub fn best(&self) -> Option<&GestureScore> {
        self.gestures
            .iter()
            .reduce(|best, c| if best.score > c.score { best } else { c })
    }
}

/// Hand-landmark detector. One call per evaluation cycle.
pub trait PoseEstimator {
    /// Failure to produce a frame's hands (model not loaded, camera gone, …).
    type Error;

    /// Detect the hands in the current video frame.
    fn estimate_hands(&mut self) -> Result<Vec<DetectedHand>, Self::Error>;
}

/// Curl/direction scorer for a single hand.
pub trait GestureEstimator {
    /// Score `keypoints` against every rule in `catalog`.
    ///
    /// `smoothing_window` is the number of frames the estimator may average over.
    fn estimate(
        &mut self,
        catalog: &GestureCatalog,
        keypoints: &[Keypoint3],
        smoothing_window: usize,
    ) -> Estimation;
}
