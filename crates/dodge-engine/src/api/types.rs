use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of the head (nose) landmark in a pose result.
pub const HEAD_LANDMARK: usize = 0;

/// One pose keypoint as produced by the pose pipeline.
/// `x`/`y` are normalized to the camera frame, `z` is relative depth and
/// `visibility` is the detector's confidence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Replace non-finite coordinates with 0. A garbage reading lands on the
    /// origin instead of poisoning every particle velocity with NaN.
    pub fn sanitized(self) -> Self {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Self {
            x: finite(self.x),
            y: finite(self.y),
            z: finite(self.z),
            visibility: finite(self.visibility),
        }
    }

    /// Scale the normalized position to a surface of `size` pixels.
    pub fn to_pixels(&self, size: Vec2) -> Vec2 {
        Vec2::new(self.x * size.x, self.y * size.y)
    }
}

/// A game event communicated from Rust to the page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// A particle hit the player. `a`/`b` carry the hit position.
    pub const GAME_OVER: f32 = 1.0;
    /// The game went back to running after a game over.
    pub const RESET: f32 = 2.0;
    /// Live particle count at the end of the frame, in `a`.
    pub const PARTICLE_COUNT: f32 = 3.0;

    pub fn game_over(at: Vec2) -> Self {
        Self { kind: Self::GAME_OVER, a: at.x, b: at.y, c: 0.0 }
    }

    pub fn reset() -> Self {
        Self { kind: Self::RESET, ..Self::default() }
    }

    pub fn particle_count(count: usize) -> Self {
        Self { kind: Self::PARTICLE_COUNT, a: count as f32, ..Self::default() }
    }
}
