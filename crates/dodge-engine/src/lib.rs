pub mod api;
pub mod core;
pub mod bridge;
pub mod game;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{DodgeConfig, PoseOptions};
pub use api::error::{DodgeError, Result};
pub use api::game::DodgeGame;
pub use api::types::{GameEvent, Landmark, HEAD_LANDMARK};
pub use bridge::pose::{CoordinateBridge, PoseResults};
pub use core::rng::Rng;
pub use core::time::{FixedTimestep, RateMeter};
pub use core::tracked::TrackedPoint;
pub use game::engine::{FrameOutcome, ParticleField};
pub use game::particles::{collides, perimeter_point, Particle, ParticleSet, SpawnTimer};
pub use game::state::{GameController, GameOverIndicator, GameState};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::surface::{Color, DrawCommand, RecordingSurface, RenderSurface};
