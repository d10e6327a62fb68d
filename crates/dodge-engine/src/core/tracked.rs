//! Single-slot shared cell holding the latest tracked landmark.
//!
//! One writer (the coordinate bridge) and one reader (the particle engine)
//! hold clones of the same handle. Writes overwrite; there is no queue, so a
//! reader that runs without a fresh write sees the previous value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use glam::Vec2;

use crate::api::types::Landmark;

/// Latest-value-wins handle to the tracked head landmark.
///
/// Holds `None` until the first pose result arrives, which keeps "no data yet"
/// distinct from a real reading at the canvas corner.
#[derive(Debug, Clone, Default)]
pub struct TrackedPoint {
    slot: Arc<Mutex<Option<Landmark>>>,
}

impl TrackedPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a new reading.
    pub fn store(&self, landmark: Landmark) {
        *self.slot() = Some(landmark);
    }

    /// The latest reading, if any arrived yet.
    pub fn load(&self) -> Option<Landmark> {
        *self.slot()
    }

    /// Forget the current reading.
    pub fn clear(&self) {
        *self.slot() = None;
    }

    pub fn is_set(&self) -> bool {
        self.slot().is_some()
    }

    /// Map the latest reading into pixel space for a surface of `size`.
    /// Evaluated on every read so a resized surface is picked up immediately.
    pub fn to_pixels(&self, size: Vec2) -> Option<Vec2> {
        self.load().map(|lm| lm.to_pixels(size))
    }

    fn slot(&self) -> MutexGuard<'_, Option<Landmark>> {
        // The slot holds plain data, so a panicked writer cannot leave it half-updated.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lm(x: f32, y: f32) -> Landmark {
        Landmark { x, y, z: 0.0, visibility: 1.0 }
    }

    #[test]
    fn empty_until_first_store() {
        let point = TrackedPoint::new();
        assert!(!point.is_set());
        assert_eq!(point.to_pixels(Vec2::new(400.0, 400.0)), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let writer = TrackedPoint::new();
        let reader = writer.clone();
        writer.store(lm(0.5, 0.25));
        assert_eq!(reader.load(), Some(lm(0.5, 0.25)));
    }

    #[test]
    fn last_write_wins() {
        let point = TrackedPoint::new();
        point.store(lm(0.1, 0.1));
        point.store(lm(0.9, 0.8));
        assert_eq!(point.load(), Some(lm(0.9, 0.8)));
    }

    #[test]
    fn pixel_mapping_follows_current_size() {
        let point = TrackedPoint::new();
        point.store(lm(0.5, 0.5));
        assert_eq!(point.to_pixels(Vec2::new(400.0, 400.0)), Some(Vec2::new(200.0, 200.0)));
        assert_eq!(point.to_pixels(Vec2::new(640.0, 360.0)), Some(Vec2::new(320.0, 180.0)));
    }

    #[test]
    fn clear_forgets_reading() {
        let point = TrackedPoint::new();
        point.store(lm(0.3, 0.3));
        point.clear();
        assert_eq!(point.load(), None);
    }

    #[test]
    fn writer_on_another_thread() {
        let point = TrackedPoint::new();
        let writer = point.clone();
        std::thread::spawn(move || writer.store(lm(0.75, 0.5)))
            .join()
            .unwrap();
        assert_eq!(point.load(), Some(lm(0.75, 0.5)));
    }
}
