//! Scripted collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;

use handsign_core::estimator::{
    DetectedHand, Estimation, GestureEstimator, GestureScore, Keypoint2, Keypoint3, PoseData,
    PoseEstimator, LANDMARK_COUNT,
};
use handsign_core::{CurlState, Direction, GestureCatalog};

/// Pose estimator failure used by the fakes.
#[derive(Debug, Clone, PartialEq)]
pub struct NotReady;

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("model not ready")
    }
}

/// Replays one frame of hands per call; an exhausted script yields no hands.
#[derive(Default)]
pub struct ScriptedPose {
    frames: VecDeque<Result<Vec<DetectedHand>, NotReady>>,
}

impl ScriptedPose {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(mut self, hands: Vec<DetectedHand>) -> Self {
        self.frames.push_back(Ok(hands));
        self
    }

    pub fn failure(mut self) -> Self {
        self.frames.push_back(Err(NotReady));
        self
    }
}

impl PoseEstimator for ScriptedPose {
    type Error = NotReady;

    fn estimate_hands(&mut self) -> Result<Vec<DetectedHand>, NotReady> {
        self.frames.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Returns scripted estimations in call order and records what it was asked.
#[derive(Default)]
pub struct ScriptedGestures {
    queue: VecDeque<Estimation>,
    pub windows: Vec<usize>,
    pub catalog_sizes: Vec<usize>,
}

impl ScriptedGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, estimation: Estimation) -> Self {
        self.queue.push_back(estimation);
        self
    }
}

impl GestureEstimator for ScriptedGestures {
    fn estimate(
        &mut self,
        catalog: &GestureCatalog,
        _keypoints: &[Keypoint3],
        smoothing_window: usize,
    ) -> Estimation {
        self.windows.push(smoothing_window);
        self.catalog_sizes.push(catalog.len());
        self.queue.pop_front().unwrap_or_default()
    }
}

/// A detected hand with a full set of landmarks.
pub fn hand(handedness: &str) -> DetectedHand {
    DetectedHand {
        handedness: handedness.to_string(),
        keypoints: (0..LANDMARK_COUNT)
            .map(|i| Keypoint2 { x: i as f32 * 10.0, y: 100.0 })
            .collect(),
        keypoints_3d: vec![Keypoint3::default(); LANDMARK_COUNT],
    }
}

/// Estimation whose single best match is `gesture`, every finger open and
/// pointing `direction`.
pub fn estimation(gesture: &str, direction: Direction) -> Estimation {
    estimation_with(gesture, PoseData::uniform(CurlState::NoCurl, direction))
}

pub fn estimation_with(gesture: &str, pose_data: PoseData) -> Estimation {
    Estimation {
        gestures: vec![
            GestureScore { name: "paper".to_string(), score: 5.0 },
            GestureScore { name: gesture.to_string(), score: 9.5 },
        ],
        pose_data,
    }
}
