//! The drawing contract the game needs from its host.
//!
//! The browser bridge implements it on a canvas 2D context; `RecordingSurface`
//! keeps the draw calls in memory for tests and headless runs.

use glam::Vec2;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::gray(255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// CSS color string, e.g. `rgb(100, 100, 255)`.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A resizable 2D drawing surface.
///
/// Size may change between frames; callers read it fresh every frame.
pub trait RenderSurface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Set the fill color for subsequent shapes.
    fn set_fill(&mut self, color: Color);

    /// Draw a filled ellipse centered on `center` with the given diameters.
    fn fill_ellipse(&mut self, center: Vec2, width: f32, height: f32);

    fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Fill(Color),
    Ellipse { center: Vec2, width: f32, height: f32 },
}

/// In-memory surface that records every draw call.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Centers of all ellipses drawn so far.
    pub fn ellipse_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Ellipse { center, .. } => Some(*center),
            _ => None,
        })
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn fill_ellipse(&mut self, center: Vec2, width: f32, height: f32) {
        self.commands.push(DrawCommand::Ellipse { center, width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string() {
        assert_eq!(Color::rgb(100, 100, 255).to_css(), "rgb(100, 100, 255)");
        assert_eq!(Color::gray(50), Color::rgb(50, 50, 50));
    }

    #[test]
    fn recording_surface_keeps_order() {
        let mut s = RecordingSurface::new(10.0, 20.0);
        s.clear(Color::gray(50));
        s.set_fill(Color::WHITE);
        s.fill_ellipse(Vec2::new(1.0, 2.0), 30.0, 30.0);
        assert_eq!(s.size(), Vec2::new(10.0, 20.0));
        assert_eq!(s.commands().len(), 3);
        assert_eq!(s.ellipse_centers().collect::<Vec<_>>(), vec![Vec2::new(1.0, 2.0)]);
        assert_eq!(s.take_commands().len(), 3);
        assert!(s.commands().is_empty());
    }

    #[test]
    fn resize_changes_reported_size() {
        let mut s = RecordingSurface::new(400.0, 400.0);
        s.resize(640.0, 360.0);
        assert_eq!(s.size(), Vec2::new(640.0, 360.0));
    }
}
