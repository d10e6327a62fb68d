//! Browser implementations of the surface and the game-over indicator.

use std::f64::consts::TAU;

use dodge_engine::{Color, GameOverIndicator, RenderSurface};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

fn element_by_id<T: JsCast>(id: &str) -> Result<T, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element `{}` has the wrong type", id)))
}

/// A `<canvas>` with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_id(id: &str) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = element_by_id(id)?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Size the canvas to `fraction` of the window width at the given aspect.
    /// Returns true if the size changed.
    pub fn fit_to_window(&mut self, fraction: f32, aspect: f32) -> bool {
        let Some(window_width) = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
        else {
            return false;
        };
        let width = (window_width * fraction as f64).floor().max(1.0) as u32;
        let height = (width as f64 / aspect as f64).floor().max(1.0) as u32;
        if width == self.canvas.width() && height == self.canvas.height() {
            return false;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        log::debug!("canvas resized to {}x{}", width, height);
        true
    }
}

impl RenderSurface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn set_fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn fill_ellipse(&mut self, center: Vec2, width: f32, height: f32) {
        self.ctx.begin_path();
        let drawn = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            (width / 2.0) as f64,
            (height / 2.0) as f64,
            0.0,
            0.0,
            TAU,
        );
        // Only fails for negative radii, which the config rules out.
        if drawn.is_ok() {
            self.ctx.fill();
        }
    }
}

/// The game-over element, shown with `display: block`.
pub struct GameOverBanner {
    element: HtmlElement,
}

impl GameOverBanner {
    pub fn from_id(id: &str) -> Result<Self, JsValue> {
        Ok(Self { element: element_by_id(id)? })
    }
}

impl GameOverIndicator for GameOverBanner {
    fn set_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(err) = self.element.style().set_property("display", display) {
            log::warn!("could not toggle game-over banner: {:?}", err);
        }
    }
}
