//! Software rendering module
//!
//! Frames are rasterized on the CPU into an RGBA framebuffer that the
//! platform copies to a 2D canvas.

pub mod framebuffer;
pub mod scene;

pub use framebuffer::{Framebuffer, Rgba};
pub use scene::{colors, render_frame};

use crate::sim::{Camera, Frame, FrameSink};

/// Frame sink that keeps the latest frame rasterized in memory
#[derive(Debug, Clone)]
pub struct FramebufferSink {
    pub framebuffer: Framebuffer,
    /// Frames rendered so far
    pub frames: u64,
}

impl FramebufferSink {
    pub fn new(framebuffer: Framebuffer) -> Self {
        Self {
            framebuffer,
            frames: 0,
        }
    }
}

impl FrameSink for FramebufferSink {
    fn present(&mut self, frame: &Frame, camera: Camera) {
        render_frame(&mut self.framebuffer, frame, camera);
        self.frames += 1;
    }
}
