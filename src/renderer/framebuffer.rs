//! RGBA8 framebuffer with device-pixel-ratio scaling
//!
//! Drawing calls take logical (CSS) pixels; the buffer itself is sized in
//! device pixels so the canvas stays crisp on high-DPI displays.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::sim::{BodyView, Camera};

/// One pixel, laid out exactly as `ImageData` expects
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Source-over blend of `self` onto an opaque `dst`
    pub fn over(self, dst: Rgba) -> Rgba {
        if self.a == 255 {
            return self;
        }
        let a = self.a as u16;
        let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a) + 127) / 255) as u8;
        Rgba::opaque(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b))
    }
}

/// Largest device-pixel edge; higher ratios are scaled back to fit
pub const MAX_DEVICE_SIDE: u32 = 4096;

/// CPU-side pixel store presented to a 2D canvas
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Logical size (CSS pixels)
    logical: Vec2,
    dpr: f32,
    /// Device-pixel size
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Framebuffer {
    pub fn new(logical_width: f32, logical_height: f32, dpr: f32) -> Self {
        let mut fb = Self {
            logical: Vec2::new(logical_width, logical_height),
            dpr: 0.0,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        fb.resize(dpr);
        fb
    }

    /// Reallocate for a new device-pixel ratio; returns false if unchanged
    ///
    /// The ratio is lowered when needed so neither edge exceeds
    /// [`MAX_DEVICE_SIDE`].
    pub fn resize(&mut self, dpr: f32) -> bool {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let longest = self.logical.max_element();
        let dpr = if longest * dpr > MAX_DEVICE_SIDE as f32 {
            MAX_DEVICE_SIDE as f32 / longest
        } else {
            dpr
        };
        if dpr == self.dpr {
            return false;
        }
        self.dpr = dpr;
        let to_side = |v: f32| ((v * dpr).floor() as u32).min(MAX_DEVICE_SIDE);
        self.width = to_side(self.logical.x);
        self.height = to_side(self.logical.y);
        // Both sides are capped, so the product fits in usize
        let len = self.width as usize * self.height as usize;
        self.pixels = vec![Rgba::default(); len];
        log::debug!(
            "Framebuffer resized to {}x{} (dpr {})",
            self.width,
            self.height,
            dpr
        );
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    /// Logical (CSS) size
    pub fn logical_size(&self) -> Vec2 {
        self.logical
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Device pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Fill with transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::default());
    }

    /// Fill a rectangle given in logical screen pixels, clipped to the buffer
    pub fn fill_rect_screen(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        // Fractional logical coordinates snap down to whole device pixels
        let to_device = |v: f32, limit: u32| ((v * self.dpr).floor() as i64).clamp(0, limit as i64) as u32;
        let start_x = to_device(x, self.width);
        let start_y = to_device(y, self.height);
        let end_x = to_device(x + width, self.width);
        let end_y = to_device(y + height, self.height);

        for py in start_y..end_y {
            let row = (py * self.width) as usize;
            for px in start_x..end_x {
                let dst = &mut self.pixels[row + px as usize];
                *dst = color.over(*dst);
            }
        }
    }

    /// Map a world point to logical screen pixels, centring the camera
    pub fn world_to_screen(&self, world: Vec2, camera: Camera) -> Vec2 {
        world - camera.offset + self.logical / 2.0
    }

    /// Fill a world-space square
    pub fn fill_square_world(&mut self, body: &BodyView, camera: Camera, color: Rgba) {
        let top_left = self.world_to_screen(
            Vec2::new(body.x - body.half_size, body.y - body.half_size),
            camera,
        );
        self.fill_rect_screen(top_left.x, top_left.y, body.size, body.size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    fn count(fb: &Framebuffer, color: Rgba) -> usize {
        fb.pixels().iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_sizes_follow_dpr() {
        let fb = Framebuffer::new(800.0, 600.0, 1.5);
        assert_eq!((fb.width(), fb.height()), (1200, 900));
        assert_eq!(fb.as_bytes().len(), 1200 * 900 * 4);
    }

    #[test]
    fn test_resize_only_on_change() {
        let mut fb = Framebuffer::new(10.0, 10.0, 1.0);
        fb.fill_rect_screen(0.0, 0.0, 10.0, 10.0, WHITE);
        assert!(!fb.resize(1.0));
        assert_eq!(count(&fb, WHITE), 100);
        assert!(fb.resize(2.0));
        assert_eq!((fb.width(), fb.height()), (20, 20));
        assert_eq!(count(&fb, WHITE), 0);
    }

    #[test]
    fn test_bad_dpr_falls_back() {
        let fb = Framebuffer::new(10.0, 10.0, f32::NAN);
        assert_eq!(fb.dpr(), 1.0);
        assert_eq!(fb.width(), 10);
    }

    #[test]
    fn test_huge_ratio_is_capped() {
        // 4096 / 128 = 32 exactly
        let mut fb = Framebuffer::new(128.0, 2.0, 1.0e6);
        assert_eq!(fb.dpr(), 32.0);
        assert_eq!((fb.width(), fb.height()), (MAX_DEVICE_SIDE, 64));
        assert_eq!(fb.pixels().len(), MAX_DEVICE_SIDE as usize * 64);
        // Everything still addressable after a full-surface fill
        fb.fill_rect_screen(0.0, 0.0, 128.0, 2.0, WHITE);
        assert_eq!(count(&fb, WHITE), fb.pixels().len());
        assert!(!fb.resize(2.0e6));
    }

    #[test]
    fn test_oversized_logical_size_is_scaled_down() {
        let fb = Framebuffer::new(70_000.0, 10.0, 1.0);
        assert!(fb.width() <= MAX_DEVICE_SIDE);
        assert!(fb.dpr() < 1.0);
        assert_eq!(
            fb.pixels().len(),
            fb.width() as usize * fb.height() as usize
        );
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = Framebuffer::new(10.0, 10.0, 1.0);
        fb.fill_rect_screen(-5.0, 8.0, 10.0, 10.0, WHITE);
        // x in [0, 5), y in [8, 10)
        assert_eq!(count(&fb, WHITE), 10);
        assert_eq!(fb.pixel(4, 9), Some(WHITE));
        assert_eq!(fb.pixel(5, 9), Some(Rgba::default()));
        assert_eq!(fb.pixel(10, 0), None);
    }

    #[test]
    fn test_fractional_coordinates_floor() {
        let mut fb = Framebuffer::new(10.0, 10.0, 1.0);
        fb.fill_rect_screen(1.6, 1.6, 2.0, 2.0, WHITE);
        // floor(1.6) = 1 .. floor(3.6) = 3
        assert_eq!(count(&fb, WHITE), 4);
        assert_eq!(fb.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_dpr_scales_fill() {
        let mut fb = Framebuffer::new(10.0, 10.0, 2.0);
        fb.fill_rect_screen(1.0, 1.0, 2.0, 2.0, WHITE);
        assert_eq!(count(&fb, WHITE), 16);
        assert_eq!(fb.pixel(2, 2), Some(WHITE));
        assert_eq!(fb.pixel(1, 1), Some(Rgba::default()));
    }

    #[test]
    fn test_blend_over() {
        let dst = Rgba::opaque(200, 100, 0);
        assert_eq!(WHITE.over(dst), WHITE);
        assert_eq!(Rgba::new(0, 0, 0, 0).over(dst), dst);
        let dimmed = Rgba::new(0, 0, 0, 180).over(dst);
        assert_eq!(dimmed, Rgba::opaque(59, 29, 0));
    }

    #[test]
    fn test_world_square_centered_on_camera() {
        let mut fb = Framebuffer::new(100.0, 100.0, 1.0);
        let body = BodyView {
            x: 30.0,
            y: -20.0,
            size: 10.0,
            half_size: 5.0,
        };
        let camera = Camera {
            offset: Vec2::new(30.0, -20.0),
        };
        fb.fill_square_world(&body, camera, WHITE);
        assert_eq!(count(&fb, WHITE), 100);
        assert_eq!(fb.pixel(45, 45), Some(WHITE));
        assert_eq!(fb.pixel(54, 54), Some(WHITE));
        assert_eq!(fb.pixel(55, 55), Some(Rgba::default()));
    }
}
