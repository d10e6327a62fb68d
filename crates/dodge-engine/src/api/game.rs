use glam::Vec2;

use crate::api::config::DodgeConfig;
use crate::api::error::Result;
use crate::api::types::GameEvent;
use crate::bridge::pose::CoordinateBridge;
use crate::core::rng::Rng;
use crate::core::time::FixedTimestep;
use crate::core::tracked::TrackedPoint;
use crate::game::engine::{FrameOutcome, ParticleField};
use crate::game::state::{GameController, GameState};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::surface::RenderSurface;

/// The whole game: tracked point, particle field, state controller and the
/// per-frame plumbing around them.
///
/// The host calls `frame` once per display refresh (or `tick` with the elapsed
/// time) from a single thread. Pose results go through `bridge_mut`, which
/// may be called at any cadence between frames.
pub struct DodgeGame {
    config: DodgeConfig,
    tracked: TrackedPoint,
    bridge: CoordinateBridge,
    controller: GameController,
    field: ParticleField,
    rng: Rng,
    timestep: FixedTimestep,
    input: InputQueue,
    events: Vec<GameEvent>,
    reset_pending: bool,
}

impl DodgeGame {
    pub fn new(config: DodgeConfig) -> Result<Self> {
        config.validate()?;
        let tracked = TrackedPoint::new();
        log::info!(
            "dodge: spawn every {} frames, {} frames to arrive, max {} particles",
            config.spawn_interval + 1,
            config.arrival_frames,
            config.max_particles,
        );
        Ok(Self {
            bridge: CoordinateBridge::new(tracked.clone()),
            tracked,
            controller: GameController::new(),
            field: ParticleField::new(&config),
            rng: Rng::new(config.seed.unwrap_or(DodgeConfig::DEFAULT_SEED)),
            timestep: FixedTimestep::new(config.fixed_dt),
            input: InputQueue::new(),
            events: Vec::with_capacity(4),
            reset_pending: false,
            config,
        })
    }

    pub fn config(&self) -> &DodgeConfig {
        &self.config
    }

    /// A handle to the tracked point, for hosts that write it directly.
    pub fn tracked_point(&self) -> TrackedPoint {
        self.tracked.clone()
    }

    pub fn bridge(&self) -> &CoordinateBridge {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut CoordinateBridge {
        &mut self.bridge
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Back to running. A no-op while running; out of a game over it also
    /// empties the field and restarts the spawn cadence. The `RESET` event
    /// shows up in the events of the next frame.
    pub fn reset(&mut self) {
        if self.controller.reset() {
            self.field.clear();
            self.field.restart_timer();
            self.timestep.reset();
            self.reset_pending = true;
            log::info!("dodge: replay");
        }
    }

    /// Run exactly one frame and draw it, assuming `fixed_dt` seconds have
    /// passed since the last one.
    pub fn frame<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> FrameOutcome {
        self.frame_elapsed(self.config.fixed_dt, surface)
    }

    /// Run exactly one frame and draw it. `elapsed` is the wall time since the
    /// previous frame and only drives the pose-rate clock; the simulation
    /// still moves by one frame. Non-positive or NaN values fall back to
    /// `fixed_dt`.
    pub fn frame_elapsed<S: RenderSurface + ?Sized>(&mut self, elapsed: f32, surface: &mut S) -> FrameOutcome {
        self.begin_frame();
        let elapsed = if elapsed.is_finite() && elapsed > 0.0 { elapsed } else { self.config.fixed_dt };
        self.bridge.advance(elapsed);
        let outcome = self.step(surface.size());
        self.draw(surface);
        self.end_frame();
        outcome
    }

    /// Advance by `dt` seconds of wall time in fixed frames, then draw once.
    /// Stops simulating early if the player gets hit. Returns the frames run.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, dt: f32, surface: &mut S) -> u32 {
        self.begin_frame();
        self.bridge.advance(dt);
        let size = surface.size();
        let steps = self.timestep.accumulate(dt);
        let mut ran = 0;
        for _ in 0..steps {
            ran += 1;
            if self.step(size).hit.is_some() {
                break;
            }
        }
        self.draw(surface);
        self.end_frame();
        ran
    }

    /// Events produced since the start of the last frame.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Events as a flat f32 slice, `GameEvent::FLOATS` per event.
    pub fn event_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }

    pub fn state(&self) -> GameState {
        self.controller.state()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    /// Current target in pixel space for a surface of `size`.
    /// Before the first reading this is `None`, or the origin when the config
    /// does not wait for a pose.
    pub fn target(&self, size: Vec2) -> Option<Vec2> {
        match self.tracked.to_pixels(size) {
            Some(target) => Some(target),
            None if self.config.wait_for_first_pose => None,
            None => Some(Vec2::ZERO),
        }
    }

    fn begin_frame(&mut self) {
        self.events.clear();
        for event in self.input.drain() {
            if event.is_replay() {
                self.reset();
            }
        }
        if std::mem::take(&mut self.reset_pending) {
            self.events.push(GameEvent::reset());
        }
    }

    fn step(&mut self, size: Vec2) -> FrameOutcome {
        let target = self.target(size);
        let outcome = self.field.step(&mut self.controller, target, size, &mut self.rng);
        if let Some(hit) = outcome.hit {
            self.events.push(GameEvent::game_over(hit));
        }
        outcome
    }

    fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        // A stopped game leaves the last drawn frame on screen.
        if !self.controller.is_running() && self.field.is_empty() {
            return;
        }
        if let Some(target) = self.target(surface.size()) {
            self.field.draw(target, surface);
        }
    }

    fn end_frame(&mut self) {
        self.events.push(GameEvent::particle_count(self.field.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Landmark;
    use crate::bridge::pose::PoseResults;
    use crate::renderer::surface::RecordingSurface;

    fn game_with_head(x: f32, y: f32) -> DodgeGame {
        let mut game = DodgeGame::new(DodgeConfig::default()).unwrap();
        game.bridge_mut().on_head(Landmark::new(x, y, 0.0, 1.0));
        game
    }

    fn run_until_stopped(game: &mut DodgeGame, surface: &mut RecordingSurface, max_frames: usize) -> Option<usize> {
        for frame in 0..max_frames {
            game.frame(surface);
            if !game.is_running() {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DodgeConfig { max_particles: 0, ..DodgeConfig::default() };
        assert!(DodgeGame::new(config).is_err());
    }

    #[test]
    fn idle_until_first_pose() {
        let mut game = DodgeGame::new(DodgeConfig::default()).unwrap();
        let mut surface = RecordingSurface::new(640.0, 360.0);
        for _ in 0..100 {
            assert!(game.frame(&mut surface).idle);
        }
        assert_eq!(game.particle_count(), 0);
        assert!(surface.commands().is_empty());

        game.bridge_mut().on_results(&PoseResults::with_landmarks(vec![Landmark::new(0.5, 0.5, 0.0, 1.0)]));
        assert!(!game.frame(&mut surface).idle);
        assert!(!surface.commands().is_empty());
    }

    #[test]
    fn origin_target_when_not_waiting() {
        let config = DodgeConfig { wait_for_first_pose: false, ..DodgeConfig::default() };
        let game = DodgeGame::new(config).unwrap();
        assert_eq!(game.target(Vec2::new(640.0, 360.0)), Some(Vec2::ZERO));
    }

    #[test]
    fn standing_still_ends_the_game() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        let stopped_at = run_until_stopped(&mut game, &mut surface, 200);
        // First spawn on frame 30, arrival takes under 50 frames.
        let frame = stopped_at.expect("game should end");
        assert!(frame > 30 && frame <= 30 + 50, "stopped at frame {}", frame);
        assert!(game.controller().game_over_visible());
        assert!(game.events().iter().any(|e| e.kind == GameEvent::GAME_OVER));

        // Next frame clears the field and draws nothing.
        let drawn = surface.take_commands().len();
        assert!(drawn > 0);
        game.frame(&mut surface);
        assert_eq!(game.particle_count(), 0);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn reset_after_game_over_restarts() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");

        game.reset();
        assert!(game.is_running());
        assert!(!game.controller().game_over_visible());
        assert_eq!(game.field().timer().countdown(), 10);

        game.frame(&mut surface);
        assert!(game.is_running());
        assert!(game.events().iter().any(|e| e.kind == GameEvent::RESET));
    }

    #[test]
    fn reset_on_the_hit_frame_clears_the_field() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");
        // The hit frame leaves its particles in place until the next step.
        assert!(game.particle_count() > 0);

        game.reset();
        assert_eq!(game.particle_count(), 0);
        let outcome = game.frame(&mut surface);
        assert!(outcome.hit.is_none());
        assert!(game.is_running());
    }

    #[test]
    fn reset_event_survives_into_the_next_frame() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");

        game.reset();
        game.frame(&mut surface);
        let kinds: Vec<f32> = game.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![GameEvent::RESET, GameEvent::PARTICLE_COUNT]);

        // Reported once only.
        game.frame(&mut surface);
        assert!(game.events().iter().all(|e| e.kind != GameEvent::RESET));
    }

    #[test]
    fn replay_key_emits_one_reset_event() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");

        game.push_input(InputEvent::Replay);
        game.frame(&mut surface);
        assert_eq!(game.events().iter().filter(|e| e.kind == GameEvent::RESET).count(), 1);
        game.frame(&mut surface);
        assert!(game.events().iter().all(|e| e.kind != GameEvent::RESET));
    }

    #[test]
    fn pose_rate_follows_elapsed_frame_time() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(4000.0, 4000.0);
        // A 30 Hz display with a pose result every frame.
        for _ in 0..31 {
            game.bridge_mut().on_head(Landmark::new(0.5, 0.5, 0.0, 1.0));
            game.frame_elapsed(1.0 / 30.0, &mut surface);
        }
        let rate = game.bridge().pose_rate();
        assert!((rate - 30.0).abs() < 1.5, "rate was {}", rate);
    }

    #[test]
    fn reset_while_running_leaves_particles() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(4000.0, 4000.0);
        for _ in 0..35 {
            game.frame(&mut surface);
        }
        let count = game.particle_count();
        let countdown = game.field().timer().countdown();
        assert!(count > 0);

        game.reset();
        assert!(game.is_running());
        assert_eq!(game.particle_count(), count);
        assert_eq!(game.field().timer().countdown(), countdown);
        assert!(game.events().iter().all(|e| e.kind != GameEvent::RESET));
    }

    #[test]
    fn replay_key_is_handled_next_frame() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");

        game.push_input(InputEvent::KeyDown { key_code: InputEvent::KEY_SPACE });
        game.frame(&mut surface);
        assert!(game.is_running());
    }

    #[test]
    fn stopped_frames_stay_empty() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        run_until_stopped(&mut game, &mut surface, 200).expect("game should end");
        for _ in 0..20 {
            game.frame(&mut surface);
            assert_eq!(game.particle_count(), 0);
        }
    }

    #[test]
    fn tick_converts_time_to_frames() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(4000.0, 4000.0);
        assert_eq!(game.tick(1.0 / 60.0, &mut surface), 1);
        assert_eq!(game.tick(0.001, &mut surface), 0);
        assert_eq!(game.tick(5.0, &mut surface), FixedTimestep::MAX_STEPS);
    }

    #[test]
    fn resize_moves_target_without_new_pose() {
        let game = game_with_head(0.5, 0.25);
        assert_eq!(game.target(Vec2::new(400.0, 400.0)), Some(Vec2::new(200.0, 100.0)));
        assert_eq!(game.target(Vec2::new(800.0, 450.0)), Some(Vec2::new(400.0, 112.5)));
    }

    #[test]
    fn particle_count_event_closes_every_frame() {
        let mut game = game_with_head(0.5, 0.5);
        let mut surface = RecordingSurface::new(400.0, 400.0);
        game.frame(&mut surface);
        let last = *game.events().last().unwrap();
        assert_eq!(last.kind, GameEvent::PARTICLE_COUNT);
        assert_eq!(game.event_floats().len(), game.events().len() * GameEvent::FLOATS);
    }
}
