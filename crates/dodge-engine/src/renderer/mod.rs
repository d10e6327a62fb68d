pub mod surface;

pub use surface::{Color, DrawCommand, RecordingSurface, RenderSurface};
