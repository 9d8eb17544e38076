//! Pixel Platformer entry point
//!
//! Handles platform-specific initialization and starts the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use pixel_platformer::Tuning;
    use pixel_platformer::platform::web::WebSession;

    thread_local! {
        /// The page's single running session
        static SESSION: RefCell<Option<WebSession>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pixel Platformer starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Prefer a dedicated container, fall back to <body>
        let parent = match document.get_element_by_id("game") {
            Some(el) => el,
            None => document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .into(),
        };

        let session = WebSession::start(&parent, Tuning::load())?;
        SESSION.with(|slot| *slot.borrow_mut() = Some(session));

        log::info!("Pixel Platformer running!");
        Ok(())
    }

    /// Tear down the running session, if any
    pub fn stop() {
        // Take it out first so the session drops outside the borrow
        let session = SESSION.with(|slot| slot.borrow_mut().take());
        if let Some(mut session) = session {
            session.stop();
            log::info!("Pixel Platformer stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

/// Stop the game loop and release its listeners (callable from JS)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_game() {
    wasm_game::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pixel_platformer::Tuning;
    use pixel_platformer::platform::headless;

    env_logger::init();
    log::info!("Pixel Platformer (native) starting...");
    log::info!("Native mode runs a scripted headless play-through - serve the wasm build for the real game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::from_json_file_or_default(path),
        None => Tuning::load(),
    };

    let summary = match headless::run(tuning, &headless::demo_script(), 60.0) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Headless run failed: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
