use serde::{Deserialize, Serialize};

use crate::api::error::{DodgeError, Result};

/// Options forwarded to the pose pipeline's `setOptions` and edited by the
/// page's control panel. Serialized in the pipeline's camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoseOptions {
    /// Mirror the camera image (default: true).
    pub selfie_mode: bool,
    /// Track only the upper body landmarks (default: false).
    pub upper_body_only: bool,
    /// Filter landmarks across frames to reduce jitter (default: true).
    pub smooth_landmarks: bool,
    /// Minimum confidence for the person detector (default: 0.5).
    pub min_detection_confidence: f32,
    /// Minimum confidence for landmark tracking (default: 0.5).
    pub min_tracking_confidence: f32,
}

impl Default for PoseOptions {
    fn default() -> Self {
        Self {
            selfie_mode: true,
            upper_body_only: false,
            smooth_landmarks: true,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Every tunable of the game in one place. Build it, then `validate()`;
/// `DodgeGame::new` refuses an invalid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DodgeConfig {
    /// Fixed timestep in seconds used by `DodgeGame::tick` (default: 1/60).
    pub fixed_dt: f32,
    /// Countdown value the spawn timer resets to after firing (default: 10).
    /// One particle spawns every `spawn_interval + 1` frames.
    pub spawn_interval: i32,
    /// Countdown value at startup, before the first spawn (default: 30).
    pub initial_spawn_countdown: i32,
    /// Frames a particle needs to reach the point it was aimed at (default: 50).
    pub arrival_frames: u32,
    /// Maximum live particles; the oldest is evicted beyond this (default: 100,
    /// at most `MAX_PARTICLES_LIMIT`).
    pub max_particles: usize,
    /// Player marker radius in pixels, used for drawing and hits (default: 15).
    pub marker_radius: f32,
    /// Particle hit radius in pixels (default: 5).
    pub particle_radius: f32,
    /// Particle draw radius in pixels (default: 5).
    pub particle_draw_radius: f32,
    /// Hold the game idle until the first pose reading arrives (default: true).
    /// When false, a missing reading is treated as the canvas origin.
    pub wait_for_first_pose: bool,
    /// Seed for spawn positions. `None` lets the host pick one; headless
    /// runs fall back to `DEFAULT_SEED` (default: None).
    pub seed: Option<u64>,
    /// Canvas width as a fraction of the window width (default: 0.5).
    pub canvas_width_fraction: f32,
    /// Canvas width / height (default: 16/9, the camera aspect).
    pub aspect: f32,
    /// Pose pipeline options.
    pub pose: PoseOptions,
}

impl Default for DodgeConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            spawn_interval: 10,
            initial_spawn_countdown: 30,
            arrival_frames: 50,
            max_particles: 100,
            marker_radius: 15.0,
            particle_radius: 5.0,
            particle_draw_radius: 5.0,
            wait_for_first_pose: true,
            seed: None,
            canvas_width_fraction: 0.5,
            aspect: 16.0 / 9.0,
            pose: PoseOptions::default(),
        }
    }
}

impl DodgeConfig {
    pub const DEFAULT_SEED: u64 = 42;
    pub const MAX_PARTICLES_LIMIT: usize = 100_000;

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(DodgeError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Distance between marker and particle centers below which they touch.
    pub fn hit_distance(&self) -> f32 {
        self.marker_radius + self.particle_radius
    }

    /// Pose options as the JSON object the pose pipeline expects.
    pub fn pose_options_json(&self) -> Result<String> {
        serde_json::to_string(&self.pose).map_err(DodgeError::Serialize)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.fixed_dt.is_finite() || self.fixed_dt <= 0.0 {
            return Err(DodgeError::invalid("fixedDt", format!("must be positive, got {}", self.fixed_dt)));
        }
        if self.spawn_interval < 0 {
            return Err(DodgeError::invalid(
                "spawnInterval",
                format!("must not be negative, got {}", self.spawn_interval),
            ));
        }
        if self.arrival_frames == 0 {
            return Err(DodgeError::invalid("arrivalFrames", "must be at least 1"));
        }
        if self.max_particles == 0 || self.max_particles > Self::MAX_PARTICLES_LIMIT {
            return Err(DodgeError::invalid(
                "maxParticles",
                format!("must be in [1, {}], got {}", Self::MAX_PARTICLES_LIMIT, self.max_particles),
            ));
        }
        check_radius("markerRadius", self.marker_radius)?;
        check_radius("particleRadius", self.particle_radius)?;
        check_radius("particleDrawRadius", self.particle_draw_radius)?;
        if !(self.canvas_width_fraction > 0.0 && self.canvas_width_fraction <= 1.0) {
            return Err(DodgeError::invalid(
                "canvasWidthFraction",
                format!("must be in (0, 1], got {}", self.canvas_width_fraction),
            ));
        }
        if !self.aspect.is_finite() || self.aspect <= 0.0 {
            return Err(DodgeError::invalid("aspect", format!("must be positive, got {}", self.aspect)));
        }
        check_confidence("pose.minDetectionConfidence", self.pose.min_detection_confidence)?;
        check_confidence("pose.minTrackingConfidence", self.pose.min_tracking_confidence)?;
        Ok(())
    }
}

fn check_radius(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DodgeError::invalid(field, format!("must be a non-negative number, got {}", value)))
    }
}

fn check_confidence(field: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DodgeError::invalid(field, format!("must be in [0, 1], got {}", value)))
    }
}
