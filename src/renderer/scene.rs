//! Draws a [`Frame`] into a [`Framebuffer`]

use super::framebuffer::{Framebuffer, Rgba};
use crate::sim::{Camera, Frame};

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const GOAL: Rgba = Rgba::opaque(0, 200, 0);
    pub const GOAL_WON: Rgba = Rgba::opaque(255, 215, 0);
    pub const PLAYER: Rgba = Rgba::opaque(100, 100, 100);
    pub const SOLID: Rgba = Rgba::opaque(50, 50, 50);
    /// Dims the whole view once the level is won
    pub const WIN_OVERLAY: Rgba = Rgba::new(0, 0, 0, 180);
}

/// Rasterize one frame, back to front
pub fn render_frame(fb: &mut Framebuffer, frame: &Frame, camera: Camera) {
    fb.clear();

    let goal_color = if frame.won { colors::GOAL_WON } else { colors::GOAL };
    fb.fill_square_world(&frame.goal, camera, goal_color);
    fb.fill_square_world(&frame.player, camera, colors::PLAYER);
    for solid in &frame.solids {
        fb.fill_square_world(solid, camera, colors::SOLID);
    }

    // Last, so it dims everything drawn above
    if frame.won {
        fb.fill_rect_screen(
            0.0,
            0.0,
            frame.render_width,
            frame.render_height,
            colors::WIN_OVERLAY,
        );
    }
}
