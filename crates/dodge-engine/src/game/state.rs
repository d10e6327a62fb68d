//! Running/stopped flag and the game-over indicator it drives.

/// Whether the particle engine is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    Stopped,
}

/// Host-side element shown while the game is over (a DOM banner in the browser).
pub trait GameOverIndicator {
    fn set_visible(&mut self, visible: bool);
}

/// Owns the game state and the indicator visibility.
///
/// The only way into `Stopped` is a collision reported by the particle engine;
/// the only way out is `reset()`.
#[derive(Debug, Clone)]
pub struct GameController {
    state: GameState,
    game_over_visible: bool,
}

impl GameController {
    pub fn new() -> Self {
        Self {
            state: GameState::Running,
            game_over_visible: false,
        }
    }

    /// Back to running with the indicator hidden. Safe to call in any state.
    /// Returns true if the game was stopped before the call.
    pub fn reset(&mut self) -> bool {
        let was_stopped = self.state == GameState::Stopped;
        self.state = GameState::Running;
        self.game_over_visible = false;
        was_stopped
    }

    /// Enter the stopped state and show the indicator.
    /// Returns true only on the running -> stopped transition.
    pub(crate) fn stop(&mut self) -> bool {
        if self.state == GameState::Stopped {
            return false;
        }
        self.state = GameState::Stopped;
        self.game_over_visible = true;
        true
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn game_over_visible(&self) -> bool {
        self.game_over_visible
    }

    /// Push the current indicator visibility to a host element.
    pub fn sync_indicator(&self, indicator: &mut dyn GameOverIndicator) {
        indicator.set_visible(self.game_over_visible);
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Banner(Option<bool>);

    impl GameOverIndicator for Banner {
        fn set_visible(&mut self, visible: bool) {
            self.0 = Some(visible);
        }
    }

    #[test]
    fn starts_running_with_hidden_indicator() {
        let c = GameController::new();
        assert_eq!(c.state(), GameState::Running);
        assert!(!c.game_over_visible());
    }

    #[test]
    fn stop_is_one_way_until_reset() {
        let mut c = GameController::new();
        assert!(c.stop());
        assert!(!c.stop());
        assert_eq!(c.state(), GameState::Stopped);
        assert!(c.game_over_visible());

        assert!(c.reset());
        assert!(c.is_running());
        assert!(!c.game_over_visible());
    }

    #[test]
    fn reset_while_running_is_noop() {
        let mut c = GameController::new();
        assert!(!c.reset());
        assert!(!c.reset());
        assert!(c.is_running());
        assert!(!c.game_over_visible());
    }

    #[test]
    fn sync_indicator_pushes_visibility() {
        let mut c = GameController::new();
        let mut banner = Banner(None);
        c.sync_indicator(&mut banner);
        assert_eq!(banner.0, Some(false));
        c.stop();
        c.sync_indicator(&mut banner);
        assert_eq!(banner.0, Some(true));
    }
}
