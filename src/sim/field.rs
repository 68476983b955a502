//! Hazard field generation and drift
//!
//! Each level gets a fresh field: a fixed number of rows, each holding a few
//! icebergs or mines drifting sideways at a level-dependent speed.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::scale::CoordinateScaler;
use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;

/// Difficulty parameters for a level (logical units, before scaling)
///
/// Every parameter is non-decreasing in the level number and saturates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    pub rows: u32,
    pub per_row: u32,
    /// Base hazard speed per frame, before jitter
    pub speed: f32,
    pub mine_chance: f32,
    pub row_spacing: f32,
}

impl LevelConfig {
    pub fn for_level(level: u32) -> Self {
        let level = level.max(1);
        let l = level as f32;
        Self {
            rows: (1 + (level - 1) / 2).min(MAX_ROWS),
            per_row: (1 + level / 3).min(MAX_PER_ROW),
            speed: (BASE_SPEED + l * SPEED_PER_LEVEL).min(MAX_LEVEL_SPEED),
            mine_chance: (MINE_CHANCE_BASE + l * MINE_CHANCE_PER_LEVEL).min(MAX_MINE_CHANCE),
            row_spacing: (ROW_SPACING_BASE + l * ROW_SPACING_PER_LEVEL).min(MAX_ROW_SPACING),
        }
    }

    pub fn hazard_count(&self) -> usize {
        (self.rows * self.per_row) as usize
    }
}

/// The hazards of the current level
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field with a hand-placed set of hazards
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    /// Replace the whole field with a fresh one for `level`
    pub fn generate(&mut self, level: u32, scaler: &CoordinateScaler, rng: &mut impl Rng) {
        let config = LevelConfig::for_level(level);
        self.obstacles.clear();
        self.obstacles.reserve(config.hazard_count());

        for row in 0..config.rows {
            let y = scaler.y(FIRST_ROW_Y + row as f32 * config.row_spacing);
            for _ in 0..config.per_row {
                let (w, h) = if rng.random_bool(0.5) {
                    WIDE_HAZARD
                } else {
                    NARROW_HAZARD
                };
                let x = rng.random_range(0.0..BASE_WIDTH);
                let speed = config.speed + rng.random::<f32>() * SPEED_JITTER;
                let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let kind = if rng.random::<f32>() < config.mine_chance {
                    ObstacleKind::Mine
                } else {
                    ObstacleKind::Iceberg
                };
                let rotation = match kind {
                    ObstacleKind::Mine => rng.random_range(0.0..TAU),
                    ObstacleKind::Iceberg => 0.0,
                };

                self.obstacles.push(Obstacle {
                    pos: Vec2::new(scaler.x(x), y),
                    size: scaler.point(w, h),
                    speed: scaler.x(speed),
                    direction,
                    kind,
                    rotation,
                });
            }
        }

        let mines = self
            .obstacles
            .iter()
            .filter(|o| o.kind == ObstacleKind::Mine)
            .count();
        log::debug!(
            "Level {}: {} rows x {}, {} hazards ({} mines)",
            level,
            config.rows,
            config.per_row,
            self.obstacles.len(),
            mines
        );
    }

    /// Drift every hazard by one frame
    pub fn advance(&mut self, field_width: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(field_width);
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
