//! Keyboard → intent mapping
//!
//! Keys are matched on `KeyboardEvent.code` so the layout doesn't matter.

use crate::sim::{InputState, Intent};

/// Intent bound to a physical key code, if any
pub fn intent_for_code(code: &str) -> Option<Intent> {
    match code {
        "ArrowLeft" => Some(Intent::Left),
        "ArrowRight" => Some(Intent::Right),
        "ArrowUp" => Some(Intent::Jump),
        "KeyR" => Some(Intent::Reset),
        _ => None,
    }
}

/// Apply a key press/release; returns whether the key was bound
pub fn apply_key(input: &mut InputState, code: &str, pressed: bool) -> bool {
    match intent_for_code(code) {
        Some(intent) => {
            input.set(intent, pressed);
            true
        }
        None => false,
    }
}
