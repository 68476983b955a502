//! Logical-to-surface coordinate scaling
//!
//! Gameplay math is defined on the 800x600 base playfield. The scaler maps it
//! onto whatever surface the host renders to, so relative speeds and hazard
//! density stay the same at every resolution.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Output surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const BASE: SurfaceSize = SurfaceSize {
        width: BASE_WIDTH,
        height: BASE_HEIGHT,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::BASE
    }
}

/// Maps logical units to surface pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    surface: SurfaceSize,
    scale_x: f32,
    scale_y: f32,
}

impl CoordinateScaler {
    /// Build a scaler for the given surface. A degenerate surface (zero,
    /// negative or non-finite) falls back to the base resolution.
    pub fn new(surface: SurfaceSize) -> Self {
        let surface = if surface.is_usable() {
            surface
        } else {
            log::warn!(
                "Unusable surface {}x{}, falling back to {}x{}",
                surface.width,
                surface.height,
                BASE_WIDTH,
                BASE_HEIGHT
            );
            SurfaceSize::BASE
        };
        Self {
            surface,
            scale_x: surface.width / BASE_WIDTH,
            scale_y: surface.height / BASE_HEIGHT,
        }
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    /// Both factors as a vector, for component-wise scaling
    pub fn factors(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Playfield extent in surface pixels
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.surface.width, self.surface.height)
    }

    #[inline]
    pub fn x(&self, logical: f32) -> f32 {
        logical * self.scale_x
    }

    #[inline]
    pub fn y(&self, logical: f32) -> f32 {
        logical * self.scale_y
    }

    /// Scale a logical point (or size) on both axes
    #[inline]
    pub fn point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(self.x(x), self.y(y))
    }

    /// Font size in pixels for a logical point size
    pub fn font_px(&self, logical: f32) -> f32 {
        self.y(logical)
    }
}

impl Default for CoordinateScaler {
    fn default() -> Self {
        Self::new(SurfaceSize::BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_surface_is_identity() {
        let scaler = CoordinateScaler::default();
        assert_eq!(scaler.scale_x(), 1.0);
        assert_eq!(scaler.scale_y(), 1.0);
        assert_eq!(scaler.point(15.0, 550.0), Vec2::new(15.0, 550.0));
    }

    #[test]
    fn test_axes_scale_independently() {
        let scaler = CoordinateScaler::new(SurfaceSize::new(1600.0, 300.0));
        assert_eq!(scaler.scale_x(), 2.0);
        assert_eq!(scaler.scale_y(), 0.5);
        assert_eq!(scaler.point(400.0, 550.0), Vec2::new(800.0, 275.0));
        assert_eq!(scaler.font_px(24.0), 12.0);
    }

    #[test]
    fn test_degenerate_surface_falls_back_to_base() {
        let scaler = CoordinateScaler::new(SurfaceSize::new(0.0, 600.0));
        assert_eq!(scaler.surface(), SurfaceSize::BASE);
        assert_eq!(scaler.scale_x(), 1.0);

        let scaler = CoordinateScaler::new(SurfaceSize::new(f32::NAN, 10.0));
        assert_eq!(scaler.scale_y(), 1.0);
    }
}
