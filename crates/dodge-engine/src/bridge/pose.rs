//! Coordinate bridge: turns pose-pipeline results into the tracked point.

use serde::Deserialize;

use crate::api::error::{DodgeError, Result};
use crate::api::types::{Landmark, HEAD_LANDMARK};
use crate::core::time::RateMeter;
use crate::core::tracked::TrackedPoint;

/// The subset of a pose-pipeline result the game reads.
/// Unknown fields (image, segmentation mask, world landmarks) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseResults {
    #[serde(default)]
    pub pose_landmarks: Option<Vec<Landmark>>,
}

impl PoseResults {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(DodgeError::PoseParse)
    }

    pub fn with_landmarks(landmarks: Vec<Landmark>) -> Self {
        Self { pose_landmarks: Some(landmarks) }
    }

    /// The head landmark, if the result carries any landmarks.
    pub fn head(&self) -> Option<Landmark> {
        self.pose_landmarks.as_ref()?.get(HEAD_LANDMARK).copied()
    }
}

/// Writer side of the tracked point.
///
/// Every result counts towards the pose rate; only results with landmarks
/// move the point. A frame without a person keeps the last known position.
#[derive(Debug, Clone)]
pub struct CoordinateBridge {
    point: TrackedPoint,
    results_seen: u64,
    rate: RateMeter,
}

impl CoordinateBridge {
    pub fn new(point: TrackedPoint) -> Self {
        Self {
            point,
            results_seen: 0,
            rate: RateMeter::default(),
        }
    }

    /// Handle one pose callback. Returns true if the tracked point moved.
    pub fn on_results(&mut self, results: &PoseResults) -> bool {
        self.results_seen += 1;
        self.rate.record();
        match results.head() {
            Some(head) => {
                self.point.store(head.sanitized());
                true
            }
            None => false,
        }
    }

    /// Handle a pose callback serialized as JSON.
    pub fn on_results_json(&mut self, json: &str) -> Result<bool> {
        let results = PoseResults::from_json(json)?;
        Ok(self.on_results(&results))
    }

    /// Handle a callback that already extracted the head landmark.
    pub fn on_head(&mut self, head: Landmark) {
        self.results_seen += 1;
        self.rate.record();
        self.point.store(head.sanitized());
    }

    /// Advance the rate meter clock.
    pub fn advance(&mut self, dt: f32) {
        self.rate.advance(dt);
    }

    /// Pose results per second over the last measured window.
    pub fn pose_rate(&self) -> f32 {
        self.rate.rate()
    }

    pub fn results_seen(&self) -> u64 {
        self.results_seen
    }

    pub fn point(&self) -> &TrackedPoint {
        &self.point
    }
}
