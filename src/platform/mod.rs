//! Platform abstraction layer
//!
//! Handles the edges of the game:
//! - Keyboard codes → player intents
//! - Browser canvas, listeners, and frame loop (wasm32)
//! - Headless scripted runs (native binary, tests)

pub mod headless;
pub mod keys;
#[cfg(target_arch = "wasm32")]
pub mod web;
