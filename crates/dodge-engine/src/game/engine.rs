//! The particle field: spawn, move, evict, collide, draw.
//!
//! `step` is pure simulation over owned state, so it runs the same with or
//! without a surface. `draw` renders the state left by the last step.

use glam::Vec2;

use crate::api::config::DodgeConfig;
use crate::core::rng::Rng;
use crate::game::particles::{collides, perimeter_point, Particle, ParticleSet, SpawnTimer};
use crate::game::state::GameController;
use crate::renderer::surface::{Color, RenderSurface};

pub const BACKGROUND: Color = Color::gray(50);
pub const MARKER_COLOR: Color = Color::WHITE;
pub const PARTICLE_COLOR: Color = Color::rgb(100, 100, 255);

/// What happened during one simulated frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// Nothing was simulated (game stopped, or no tracked point yet).
    pub idle: bool,
    /// Spawn position of the particle created this frame.
    pub spawned: Option<Vec2>,
    /// A particle was dropped to stay within the size bound.
    pub evicted: bool,
    /// Position of the first particle that hit the player; the game stopped.
    pub hit: Option<Vec2>,
}

impl FrameOutcome {
    fn idle() -> Self {
        Self { idle: true, ..Self::default() }
    }
}

/// Owned particle state plus the numbers that drive it.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: ParticleSet,
    timer: SpawnTimer,
    arrival_frames: u32,
    hit_distance: f32,
    marker_radius: f32,
    particle_draw_radius: f32,
}

impl ParticleField {
    pub fn new(config: &DodgeConfig) -> Self {
        Self {
            particles: ParticleSet::new(config.max_particles),
            timer: SpawnTimer::new(config.spawn_interval, config.initial_spawn_countdown),
            arrival_frames: config.arrival_frames,
            hit_distance: config.hit_distance(),
            marker_radius: config.marker_radius,
            particle_draw_radius: config.particle_draw_radius,
        }
    }

    /// Simulate one frame against `target` (pixel space) on a surface of `size`.
    ///
    /// While the game is stopped, or before any target exists, the set is
    /// emptied and the spawn timer holds still.
    pub fn step(
        &mut self,
        controller: &mut GameController,
        target: Option<Vec2>,
        size: Vec2,
        rng: &mut Rng,
    ) -> FrameOutcome {
        let target = match target {
            Some(t) if controller.is_running() => t,
            _ => {
                self.particles.clear();
                return FrameOutcome::idle();
            }
        };

        let mut outcome = FrameOutcome::default();

        if self.timer.tick() {
            let r = rng.range(2.0 * (size.x + size.y));
            let spawn = perimeter_point(r, size);
            outcome.evicted = self.spawn(spawn, target).is_some();
            outcome.spawned = Some(spawn);
            log::debug!("spawned particle at ({:.1}, {:.1}), {} live", spawn.x, spawn.y, self.particles.len());
        }

        for particle in self.particles.iter_mut() {
            particle.advance();
            // Later hits in the same frame change nothing.
            if outcome.hit.is_none() && collides(particle.pos, target, self.hit_distance) {
                outcome.hit = Some(particle.pos);
            }
        }

        if let Some(hit) = outcome.hit {
            if controller.stop() {
                log::info!("player hit at ({:.1}, {:.1}), game over", hit.x, hit.y);
            }
        }

        outcome
    }

    /// Add a particle at `spawn` aimed at `target`. Returns the evicted
    /// particle if the set was full.
    pub fn spawn(&mut self, spawn: Vec2, target: Vec2) -> Option<Particle> {
        let evicted = self.particles.push(Particle::aimed(spawn, target, self.arrival_frames));
        if evicted.is_some() {
            log::debug!("particle limit {} reached, evicted oldest", self.particles.capacity());
        }
        evicted
    }

    /// Draw the background, the player marker at `target` and every particle.
    pub fn draw<S: RenderSurface + ?Sized>(&self, target: Vec2, surface: &mut S) {
        surface.clear(BACKGROUND);

        let marker = self.marker_radius * 2.0;
        surface.set_fill(MARKER_COLOR);
        surface.fill_ellipse(target, marker, marker);

        let dot = self.particle_draw_radius * 2.0;
        surface.set_fill(PARTICLE_COLOR);
        for particle in self.particles.iter() {
            surface.fill_ellipse(particle.pos, dot, dot);
        }
    }

    /// Drop every live particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Restart the spawn cadence from the interval value.
    pub fn restart_timer(&mut self) {
        self.timer.reset();
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn timer(&self) -> &SpawnTimer {
        &self.timer
    }
}
