//! Draw seam between the frame loop and whatever renders it
//!
//! The frame procedure calls these in a fixed order every frame. Every method
//! defaults to doing nothing, so a painter only implements what it draws.

use glam::Vec2;

use super::collision::Rect;
use super::scale::{CoordinateScaler, SurfaceSize};
use super::state::{Obstacle, Vessel, WakeParticle};

/// Level readout in the bottom-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub level: u32,
    pub rows: u32,
    pub level_at: Vec2,
    pub level_px: f32,
    pub rows_at: Vec2,
    pub rows_px: f32,
}

impl Hud {
    pub fn new(level: u32, rows: u32, scaler: &CoordinateScaler) -> Self {
        Self {
            level,
            rows,
            level_at: scaler.point(20.0, 580.0),
            level_px: scaler.font_px(24.0),
            rows_at: scaler.point(140.0, 580.0),
            rows_px: scaler.font_px(16.0),
        }
    }

    pub fn level_text(&self) -> String {
        format!("Level {}", self.level)
    }

    pub fn rows_text(&self) -> String {
        format!("Rows: {}", self.rows)
    }
}

/// Centered "level complete" banner shown during a transition
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub text: String,
    pub alpha: f32,
    pub center: Vec2,
    pub font_px: f32,
}

impl Banner {
    /// Banner for `level`, fading in over the transition
    pub fn level_complete(level: u32, progress: f32, scaler: &CoordinateScaler) -> Self {
        let surface = scaler.surface();
        Self {
            text: format!("Level {} Complete!", level),
            alpha: progress.clamp(0.0, 1.0) * 0.7,
            center: Vec2::new(surface.width * 0.5, surface.height * 0.5),
            font_px: scaler.font_px(36.0),
        }
    }
}

pub trait Painter {
    /// Water background
    fn background(&mut self, _surface: SurfaceSize, _time_ms: f64) {}
    /// Goal band with a white flash overlay of `flash` opacity
    fn goal_band(&mut self, _band: Rect, _flash: f32) {}
    fn wake_particle(&mut self, _particle: &WakeParticle) {}
    /// `bob` is a cosmetic vertical offset, not part of the hitbox
    fn obstacle(&mut self, _obstacle: &Obstacle, _bob: f32) {}
    fn vessel(&mut self, _vessel: &Vessel) {}
    fn hud(&mut self, _hud: &Hud) {}
    fn transition_banner(&mut self, _banner: &Banner) {}
}

/// Painter that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPainter;

impl Painter for NullPainter {}
