//! Particles, the bounded particle set, the spawn timer and the spawn geometry.

use std::collections::VecDeque;

use glam::Vec2;

/// A particle moving in a straight line at a constant per-frame velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Particle {
    /// A particle at `spawn` that reaches `target` after `frames` steps,
    /// assuming the target stays put.
    pub fn aimed(spawn: Vec2, target: Vec2, frames: u32) -> Self {
        let frames = frames.max(1) as f32;
        Self {
            pos: spawn,
            vel: (target - spawn) / frames,
        }
    }

    /// Advance one frame.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// True when `pos` is strictly closer than `hit_distance` to `target`.
pub fn collides(pos: Vec2, target: Vec2, hit_distance: f32) -> bool {
    pos.distance_squared(target) < hit_distance * hit_distance
}

/// Map a distance `r` along the border of a `size` rectangle to a point on it.
///
/// The border is walked clockwise from the top-left corner: top edge left to
/// right, right edge top to bottom, bottom edge right to left, left edge
/// bottom to top. Each segment includes its start and excludes its end, so
/// for 300x100: [0,300) top, [300,400) right, [400,700) bottom, [700,800) left.
/// `r` outside [0, perimeter] is clamped.
pub fn perimeter_point(r: f32, size: Vec2) -> Vec2 {
    let (w, h) = (size.x, size.y);
    let perimeter = 2.0 * (w + h);
    let r = if r.is_finite() { r.clamp(0.0, perimeter) } else { 0.0 };

    if r < w {
        Vec2::new(r, 0.0)
    } else if r < w + h {
        Vec2::new(w, r - w)
    } else if r < 2.0 * w + h {
        Vec2::new(w - (r - w - h), h)
    } else {
        Vec2::new(0.0, h - (r - 2.0 * w - h))
    }
}

/// Spawn-ordered particle set with a hard size bound.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    particles: VecDeque<Particle>,
    capacity: usize,
}

impl ParticleSet {
    /// Upfront allocation is capped; larger sets grow on demand.
    const PREALLOCATE: usize = 128;

    pub fn new(capacity: usize) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity.min(Self::PREALLOCATE) + 1),
            capacity,
        }
    }

    /// Append a particle. If that pushes the set over capacity, the oldest
    /// particle is removed and returned.
    pub fn push(&mut self, particle: Particle) -> Option<Particle> {
        self.particles.push_back(particle);
        if self.particles.len() > self.capacity {
            self.particles.pop_front()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }
}

/// Frame countdown that fires one spawn each time it drops below zero.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    countdown: i32,
    interval: i32,
}

impl SpawnTimer {
    pub fn new(interval: i32, initial: i32) -> Self {
        Self {
            countdown: initial,
            interval,
        }
    }

    /// Advance one frame. Returns true if a spawn is due this frame.
    ///
    /// The countdown is decremented first and fires once it drops below zero,
    /// so a full cycle is `interval` quiet frames plus the firing frame. At most
    /// one spawn per call, however far the countdown went negative.
    pub fn tick(&mut self) -> bool {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown < 0 {
            self.countdown = self.interval;
            true
        } else {
            false
        }
    }

    /// Restart the cycle from the interval value.
    pub fn reset(&mut self) {
        self.countdown = self.interval;
    }

    pub fn countdown(&self) -> i32 {
        self.countdown
    }
}
