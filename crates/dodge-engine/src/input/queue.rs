/// Input events the game understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The replay button was pressed.
    Replay,
    /// A key was pressed. Enter and Space replay after a game over.
    KeyDown { key_code: u32 },
}

impl InputEvent {
    pub const KEY_ENTER: u32 = 13;
    pub const KEY_SPACE: u32 = 32;

    /// True for events that ask for a replay.
    pub fn is_replay(&self) -> bool {
        match self {
            InputEvent::Replay => true,
            InputEvent::KeyDown { key_code } => {
                *key_code == Self::KEY_ENTER || *key_code == Self::KEY_SPACE
            }
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; the game drains them at the start of each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
