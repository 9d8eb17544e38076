//! Browser adapter
//!
//! Owns everything that touches the DOM: the canvas, keyboard and resize
//! listeners, and the `requestAnimationFrame` loop. [`WebSession::stop`]
//! undoes all of it.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    CanvasRenderingContext2d, Element, Event, EventTarget, HtmlCanvasElement, ImageData,
    KeyboardEvent, Window,
};

use super::keys;
use crate::Tuning;
use crate::renderer::{Framebuffer, render_frame};
use crate::sim::{Camera, Frame, FrameSink, Game, InputState};

/// Rasterizes frames and blits them onto a 2D canvas
pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    framebuffer: Framebuffer,
}

impl CanvasPresenter {
    pub fn new(
        canvas: HtmlCanvasElement,
        logical_width: f32,
        logical_height: f32,
        dpr: f32,
    ) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let presenter = Self {
            canvas,
            context,
            framebuffer: Framebuffer::new(logical_width, logical_height, dpr),
        };
        presenter.sync_canvas()?;
        Ok(presenter)
    }

    /// Follow a device-pixel-ratio change (zoom, moving between monitors)
    pub fn resize(&mut self, dpr: f32) -> Result<(), JsValue> {
        if self.framebuffer.resize(dpr) {
            self.sync_canvas()?;
        }
        Ok(())
    }

    fn sync_canvas(&self) -> Result<(), JsValue> {
        let logical = self.framebuffer.logical_size();
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", logical.x))?;
        style.set_property("height", &format!("{}px", logical.y))?;
        self.canvas.set_width(self.framebuffer.width());
        self.canvas.set_height(self.framebuffer.height());
        Ok(())
    }

    fn blit(&self) -> Result<(), JsValue> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.framebuffer.as_bytes()),
            self.framebuffer.width(),
            self.framebuffer.height(),
        )?;
        self.context.put_image_data(&image, 0.0, 0.0)
    }
}

impl FrameSink for CanvasPresenter {
    fn present(&mut self, frame: &Frame, camera: Camera) {
        render_frame(&mut self.framebuffer, frame, camera);
        if let Err(e) = self.blit() {
            log::warn!("Present failed: {:?}", e);
        }
    }
}

/// State shared with the animation-frame and event callbacks
struct Shared {
    game: Game,
    presenter: CanvasPresenter,
    /// Written only by key listeners; the game gets a copy per frame
    input: InputState,
    raf_id: Option<i32>,
}

/// A registered DOM listener, kept so it can be removed again
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", self.kind, e);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A game attached to the page
pub struct WebSession {
    window: Window,
    shared: Rc<RefCell<Shared>>,
    frame_callback: FrameCallback,
    listeners: Vec<Listener>,
}

impl WebSession {
    /// Create a canvas under `parent`, wire input, and start the frame loop
    pub fn start(parent: &Element, tuning: Tuning) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        parent.append_child(&canvas)?;

        let level = &tuning.level;
        let presenter = CanvasPresenter::new(
            canvas,
            level.width,
            level.height,
            window.device_pixel_ratio() as f32,
        )?;
        let game = Game::new(tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let shared = Rc::new(RefCell::new(Shared {
            game,
            presenter,
            input: InputState::default(),
            raf_id: None,
        }));

        let mut session = Self {
            window: window.clone(),
            shared,
            frame_callback: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        };
        session.attach_listeners(&document)?;
        session.install_frame_loop()?;

        log::info!("Web session started");
        Ok(session)
    }

    fn attach_listeners(&mut self, document: &web_sys::Document) -> Result<(), JsValue> {
        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let shared = self.shared.clone();
            let listener = Listener::attach(document.as_ref(), kind, move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let mut shared = shared.borrow_mut();
                if keys::apply_key(&mut shared.input, &event.code(), pressed) {
                    event.prevent_default();
                }
            })?;
            self.listeners.push(listener);
        }

        let shared = self.shared.clone();
        let window = self.window.clone();
        let listener = Listener::attach(self.window.as_ref(), "resize", move |_event: Event| {
            let dpr = window.device_pixel_ratio() as f32;
            if let Err(e) = shared.borrow_mut().presenter.resize(dpr) {
                log::warn!("Canvas resize failed: {:?}", e);
            }
        })?;
        self.listeners.push(listener);
        Ok(())
    }

    fn install_frame_loop(&mut self) -> Result<(), JsValue> {
        let shared = self.shared.clone();
        let window = self.window.clone();
        let callback = self.frame_callback.clone();

        *self.frame_callback.borrow_mut() = Some(Closure::new(move |now: f64| {
            let mut guard = shared.borrow_mut();
            let state = &mut *guard;
            state.raf_id = None;
            let input = state.input;
            state.game.frame(now, input, &mut state.presenter);

            if !state.game.is_running() {
                return;
            }
            if let Some(cb) = callback.borrow().as_ref() {
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => state.raf_id = Some(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }));

        let id = match self.frame_callback.borrow().as_ref() {
            Some(cb) => self
                .window
                .request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame callback missing")),
        };
        self.shared.borrow_mut().raf_id = Some(id);
        Ok(())
    }

    /// Stop the game, cancel the pending frame, and remove every listener
    pub fn stop(&mut self) {
        {
            let mut shared = self.shared.borrow_mut();
            if let Some(id) = shared.raf_id.take() {
                if let Err(e) = self.window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
            shared.game.stop();
        }
        // Breaks the callback's self-reference so it can be freed
        self.frame_callback.borrow_mut().take();

        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().game.is_running()
    }
}

impl Drop for WebSession {
    fn drop(&mut self) {
        self.stop();
    }
}
