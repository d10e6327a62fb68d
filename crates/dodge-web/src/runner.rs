use dodge_engine::{
    DodgeConfig, DodgeGame, GameOverIndicator, InputEvent, Landmark, RenderSurface, Result,
};

/// Owns the game together with the host's drawing surface and game-over
/// element, and keeps the element in step with the game state.
///
/// The wasm exports keep one runner in a `thread_local!`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<S: RenderSurface, I: GameOverIndicator> {
    game: DodgeGame,
    surface: S,
    indicator: I,
    shown: Option<bool>,
}

impl<S: RenderSurface, I: GameOverIndicator> GameRunner<S, I> {
    pub fn new(config: DodgeConfig, surface: S, indicator: I) -> Result<Self> {
        let mut runner = Self {
            game: DodgeGame::new(config)?,
            surface,
            indicator,
            shown: None,
        };
        runner.sync_indicator();
        Ok(runner)
    }

    /// One display refresh: one game frame.
    pub fn frame(&mut self) {
        self.game.frame(&mut self.surface);
        self.sync_indicator();
    }

    /// One display refresh that took `elapsed` seconds.
    pub fn frame_elapsed(&mut self, elapsed: f32) {
        self.game.frame_elapsed(elapsed, &mut self.surface);
        self.sync_indicator();
    }

    /// Variable frame time in seconds, run as fixed game frames.
    pub fn tick(&mut self, dt: f32) {
        self.game.tick(dt, &mut self.surface);
        self.sync_indicator();
    }

    /// Pose callback with the head landmark already extracted.
    pub fn pose_landmark(&mut self, head: Landmark) {
        self.game.bridge_mut().on_head(head);
    }

    /// Pose callback carrying the full result as JSON.
    pub fn pose_results_json(&mut self, json: &str) -> Result<bool> {
        self.game.bridge_mut().on_results_json(json)
    }

    /// Pose callback without a detected person.
    pub fn pose_lost(&mut self) {
        self.game.bridge_mut().on_results(&Default::default());
    }

    /// Replay button.
    pub fn replay(&mut self) {
        self.game.reset();
        self.sync_indicator();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.game.push_input(event);
    }

    pub fn game(&self) -> &DodgeGame {
        &self.game
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ---- Accessors read by JS ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.game.event_floats().as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.game.events().len() as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.game.particle_count() as u32
    }

    pub fn is_running(&self) -> bool {
        self.game.is_running()
    }

    pub fn pose_rate(&self) -> f32 {
        self.game.bridge().pose_rate()
    }

    pub fn pose_options_json(&self) -> Result<String> {
        self.game.config().pose_options_json()
    }

    fn sync_indicator(&mut self) {
        let visible = self.game.controller().game_over_visible();
        if self.shown != Some(visible) {
            self.game.controller().sync_indicator(&mut self.indicator);
            self.shown = Some(visible);
        }
    }
}
