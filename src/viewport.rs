//! Viewport size and pixel ratio.
//!
//! The renderer size is kept in logical pixels; the backing store is the
//! logical size multiplied by the device pixel ratio, clamped to
//! [`MAX_PIXEL_RATIO`] so high-density screens don't quadruple the fragment work.

use crate::config::MAX_PIXEL_RATIO;

pub fn clamp_pixel_ratio(device_pixel_ratio: f64) -> f32 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO) as f32
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    /// A window reports its size in physical pixels; this recovers the logical size.
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(
            (width as f64 / scale_factor).round() as u32,
            (height as f64 / scale_factor).round() as u32,
            scale_factor,
        )
    }

    /// Returns `false` and keeps the old size for a zero-sized (minimised) viewport.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        *self = Self::new(width, height, device_pixel_ratio);
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Size of the surface the GPU renders into.
    pub fn backing_size(&self) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.pixel_ratio).round() as u32).max(1);
        (scale(self.width), scale(self.height))
    }
}
