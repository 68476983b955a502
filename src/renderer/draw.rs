//! Frame recorder that turns painter calls into triangles and text
//!
//! Shapes become a single triangle list for the GPU pipeline. Text is kept
//! aside as positioned items; the host lays it out with the DOM.

use std::f32::consts::TAU;

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, with_alpha};
use crate::sim::{Banner, CoordinateScaler, Hud, Obstacle, ObstacleKind, Painter, Rect, SurfaceSize, Vessel, WakeParticle};

/// Hull outline in unit coordinates, bow toward +x
const HULL: [Vec2; 6] = [
    Vec2::new(-0.5, 0.0),
    Vec2::new(-0.25, -1.0 / 3.0),
    Vec2::new(0.25, -1.0 / 3.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.25, 1.0 / 3.0),
    Vec2::new(-0.25, 1.0 / 3.0),
];

/// Cabin blocks on the deck
const CABINS: [[Vec2; 4]; 2] = [
    [
        Vec2::new(-0.25, -1.0 / 6.0),
        Vec2::new(-1.0 / 12.0, -1.0 / 6.0),
        Vec2::new(-1.0 / 12.0, 1.0 / 6.0),
        Vec2::new(-0.25, 1.0 / 6.0),
    ],
    [
        Vec2::new(1.0 / 12.0, -1.0 / 6.0),
        Vec2::new(0.25, -1.0 / 6.0),
        Vec2::new(0.25, 1.0 / 6.0),
        Vec2::new(1.0 / 12.0, 1.0 / 6.0),
    ],
];

const ICEBERG: [Vec2; 6] = [
    Vec2::new(-0.5, 0.0),
    Vec2::new(-0.25, -0.375),
    Vec2::new(0.25, -0.375),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.25, 0.375),
    Vec2::new(-0.25, 0.375),
];

const ICE_RIDGE: [Vec2; 4] = [
    Vec2::new(-0.25, -0.25),
    Vec2::new(0.0, -0.25),
    Vec2::new(0.25, 0.125),
    Vec2::new(0.0, 0.125),
];

const MINE_SPIKES: u32 = 8;
const GOAL_STRIPES: u32 = 8;
const SWELL_SPACING: f32 = 20.0;
const SWELL_STEP: f32 = 50.0;
const SWELL_HEIGHT: f32 = 5.0;

/// Where a text item goes in the host layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Level,
    Rows,
    Banner,
}

/// A piece of text placed in surface pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub slot: TextSlot,
    pub text: String,
    /// Baseline start for HUD text, center for the banner
    pub pos: Vec2,
    pub px: f32,
    pub alpha: f32,
}

/// Triangles and text for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    scaler: CoordinateScaler,
    vertices: Vec<Vertex>,
    texts: Vec<TextItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, keeping the allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.texts.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    pub fn text(&self, slot: TextSlot) -> Option<&TextItem> {
        self.texts.iter().find(|t| t.slot == slot)
    }

    pub fn surface(&self) -> SurfaceSize {
        self.scaler.surface()
    }

    fn swell(&mut self, surface: SurfaceSize, time_ms: f64) {
        let s = self.scaler;
        let phase = (time_ms / 1000.0) as f32;
        let mut y = 0.0;
        while y < surface.height {
            let mut points = vec![Vec2::new(0.0, y)];
            let mut x = 0.0;
            while x < surface.width {
                let lift = ((x + phase) / s.x(30.0)).sin() * s.y(SWELL_HEIGHT);
                points.push(Vec2::new(x, y + lift));
                x += s.x(SWELL_STEP);
            }
            self.vertices
                .extend(shapes::polyline(&points, s.x(2.0), colors::SWELL));
            y += s.y(SWELL_SPACING);
        }
    }
}

impl Painter for DrawList {
    fn background(&mut self, surface: SurfaceSize, time_ms: f64) {
        self.scaler = CoordinateScaler::new(surface);
        let full = Rect::new(0.0, 0.0, surface.width, surface.height);
        self.vertices.extend(shapes::vertical_gradient(
            full,
            colors::SKY_WATER,
            colors::DEEP_WATER,
        ));
        self.swell(surface, time_ms);
    }

    fn goal_band(&mut self, band: Rect, flash: f32) {
        self.vertices
            .extend(shapes::rect(band, with_alpha(colors::GOAL, 0.2)));

        // Alternating darker squares
        let stripe = band.w / (GOAL_STRIPES * 2) as f32;
        for i in 0..GOAL_STRIPES {
            let x = band.x + (i * 2) as f32 * stripe;
            let square = Rect::new(x, band.y, stripe, band.h);
            self.vertices
                .extend(shapes::rect(square, with_alpha(colors::GOAL, 0.4)));
        }

        if flash > 0.0 {
            self.vertices
                .extend(shapes::rect(band, with_alpha(colors::WAKE, flash)));
        }
    }

    fn wake_particle(&mut self, particle: &WakeParticle) {
        self.vertices.extend(shapes::circle(
            particle.pos,
            particle.size,
            with_alpha(colors::WAKE, particle.alpha),
            10,
        ));
    }

    fn obstacle(&mut self, obstacle: &Obstacle, bob: f32) {
        let center = obstacle.center() + Vec2::new(0.0, bob);
        match obstacle.kind {
            ObstacleKind::Iceberg => {
                let body = shapes::place(&ICEBERG, center, obstacle.size, 0.0);
                self.vertices
                    .extend(shapes::convex_polygon(&body, colors::ICEBERG));
                let ridge = shapes::place(&ICE_RIDGE, center, obstacle.size, 0.0);
                self.vertices
                    .extend(shapes::convex_polygon(&ridge, colors::ICE_HIGHLIGHT));
            }
            ObstacleKind::Mine => {
                let radius = obstacle.size.min_element() * 0.35;
                for i in 0..MINE_SPIKES {
                    let angle = obstacle.rotation + i as f32 * TAU / MINE_SPIKES as f32;
                    let dir = Vec2::from_angle(angle);
                    let tip = center + dir * radius * 1.4;
                    self.vertices.extend(shapes::polyline(
                        &[center, tip],
                        radius * 0.25,
                        colors::MINE_SPIKE,
                    ));
                }
                self.vertices
                    .extend(shapes::circle(center, radius, colors::MINE, 16));
                self.vertices
                    .extend(shapes::circle(center, radius * 0.3, colors::MINE_CAP, 8));
            }
        }
    }

    fn vessel(&mut self, vessel: &Vessel) {
        let rotation = vessel.orientation.geometry().rotation;
        let center = vessel.center();

        let hull = shapes::place(&HULL, center, vessel.size, rotation);
        self.vertices
            .extend(shapes::convex_polygon(&hull, colors::HULL));
        for cabin in &CABINS {
            let block = shapes::place(cabin, center, vessel.size, rotation);
            self.vertices
                .extend(shapes::convex_polygon(&block, colors::CABIN));
        }
    }

    fn hud(&mut self, hud: &Hud) {
        self.texts.push(TextItem {
            slot: TextSlot::Level,
            text: hud.level_text(),
            pos: hud.level_at,
            px: hud.level_px,
            alpha: colors::TEXT[3],
        });
        self.texts.push(TextItem {
            slot: TextSlot::Rows,
            text: hud.rows_text(),
            pos: hud.rows_at,
            px: hud.rows_px,
            alpha: colors::TEXT[3],
        });
    }

    fn transition_banner(&mut self, banner: &Banner) {
        self.texts.push(TextItem {
            slot: TextSlot::Banner,
            text: banner.text.clone(),
            pos: banner.center,
            px: banner.font_px,
            alpha: banner.alpha,
        });
    }
}
