//! wasm-bindgen exports for the dodge game.
//!
//! The page owns the camera and the pose pipeline. It calls `game_init` once,
//! forwards every pose result (`game_pose_landmark` / `game_pose_results` /
//! `game_pose_lost`), calls `game_frame` from `requestAnimationFrame`, and
//! wires the replay button to `game_replay`.

pub mod canvas;
pub mod runner;

use std::cell::RefCell;

use dodge_engine::{DodgeConfig, DodgeError, InputEvent, Landmark};
use wasm_bindgen::prelude::*;

pub use canvas::{CanvasSurface, GameOverBanner};
pub use runner::GameRunner;

type WebRunner = GameRunner<CanvasSurface, GameOverBanner>;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Returns `None` before `game_init`.
fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("dodge-web: call game_init() first");
                None
            }
        }
    })
}

fn to_js(err: DodgeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the game on the canvas `canvas_id`, toggling `game_over_id` on game
/// over. `config_json` is an optional `DodgeConfig` in camelCase JSON; without
/// a `seed` the spawn sequence is seeded from `Math.random()`.
#[wasm_bindgen]
pub fn game_init(canvas_id: &str, game_over_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = match config_json.as_deref() {
        Some(json) => DodgeConfig::from_json(json).map_err(to_js)?,
        None => DodgeConfig::default(),
    };
    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }

    let mut surface = CanvasSurface::from_id(canvas_id)?;
    surface.fit_to_window(config.canvas_width_fraction, config.aspect);
    let banner = GameOverBanner::from_id(game_over_id)?;
    let runner = GameRunner::new(config, surface, banner).map_err(to_js)?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("dodge-web: initialized");
    Ok(())
}

/// One animation frame. Refits the canvas to the window first. `elapsed` is
/// the time since the previous frame in seconds (the `requestAnimationFrame`
/// delta); without it a 60 Hz display is assumed.
#[wasm_bindgen]
pub fn game_frame(elapsed: Option<f32>) {
    with_runner(|r| {
        let (fraction, aspect) = {
            let config = r.game().config();
            (config.canvas_width_fraction, config.aspect)
        };
        r.surface_mut().fit_to_window(fraction, aspect);
        match elapsed {
            Some(dt) => r.frame_elapsed(dt),
            None => r.frame(),
        }
    });
}

/// Advance by `dt` seconds in fixed frames, for hosts not tied to the refresh rate.
#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Refit the canvas to the window (window `resize` handler).
#[wasm_bindgen]
pub fn game_resize() {
    with_runner(|r| {
        let (fraction, aspect) = {
            let config = r.game().config();
            (config.canvas_width_fraction, config.aspect)
        };
        r.surface_mut().fit_to_window(fraction, aspect);
    });
}

#[wasm_bindgen]
pub fn game_pose_landmark(x: f32, y: f32, z: f32, visibility: f32) {
    with_runner(|r| r.pose_landmark(Landmark::new(x, y, z, visibility)));
}

/// Full pose result as JSON. Returns whether the tracked point moved.
#[wasm_bindgen]
pub fn game_pose_results(json: &str) -> bool {
    with_runner(|r| match r.pose_results_json(json) {
        Ok(moved) => moved,
        Err(err) => {
            log::warn!("dodge-web: ignoring pose result: {}", err);
            false
        }
    })
    .unwrap_or(false)
}

/// Pose result without a person in view.
#[wasm_bindgen]
pub fn game_pose_lost() {
    with_runner(|r| r.pose_lost());
}

/// Replay button.
#[wasm_bindgen]
pub fn game_replay() {
    with_runner(|r| r.replay());
}

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_game_events_ptr() -> *const f32 {
    with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_game_events_len() -> u32 {
    with_runner(|r| r.game_events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_particle_count() -> u32 {
    with_runner(|r| r.particle_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_is_running() -> bool {
    with_runner(|r| r.is_running()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_pose_rate() -> f32 {
    with_runner(|r| r.pose_rate()).unwrap_or(0.0)
}

/// Pose pipeline options as JSON, for `pose.setOptions(JSON.parse(...))`.
#[wasm_bindgen]
pub fn get_pose_options() -> Result<String, JsValue> {
    with_runner(|r| r.pose_options_json().map_err(to_js))
        .unwrap_or_else(|| Err(JsValue::from_str("game not initialized")))
}
