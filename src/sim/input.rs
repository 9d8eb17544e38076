//! Player intent
//!
//! The platform layer owns a mutable [`InputState`] and updates it from key
//! events. The simulation receives a copy once per frame and never writes it.

use serde::{Deserialize, Serialize};

/// One of the four player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Jump,
    /// Restart after winning
    Reset,
}

/// Held-state of every intent at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub reset: bool,
}

impl InputState {
    /// Record a press (`true`) or release (`false`); last value wins
    pub fn set(&mut self, intent: Intent, held: bool) {
        match intent {
            Intent::Left => self.left = held,
            Intent::Right => self.right = held,
            Intent::Jump => self.jump = held,
            Intent::Reset => self.reset = held,
        }
    }

    pub fn is_held(&self, intent: Intent) -> bool {
        match intent {
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Jump => self.jump,
            Intent::Reset => self.reset,
        }
    }

    /// Horizontal direction: -1 left, +1 right, 0 for neither or both
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_release() {
        let mut input = InputState::default();
        input.set(Intent::Jump, true);
        assert!(input.is_held(Intent::Jump));
        input.set(Intent::Jump, true);
        input.set(Intent::Jump, false);
        assert!(!input.jump);
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_horizontal_cancels() {
        let mut input = InputState::default();
        assert_eq!(input.horizontal(), 0.0);
        input.set(Intent::Left, true);
        assert_eq!(input.horizontal(), -1.0);
        input.set(Intent::Right, true);
        assert_eq!(input.horizontal(), 0.0);
        input.set(Intent::Left, false);
        assert_eq!(input.horizontal(), 1.0);
    }
}
