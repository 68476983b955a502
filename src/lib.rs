//! Frigate Hop - steer a frigate across an ice field to the goal band
//!
//! Core modules:
//! - `sim`: Simulation engine (vessel, hazards, collisions, levels, frame loop)
//! - `renderer`: Draw list and WebGPU output
//! - `settings`: Player preferences
//! - `highscores`: Top-5 leaderboard kept by the host

pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{Direction, Game, GameEvent, SurfaceSize};

/// Game configuration constants
///
/// Everything is in logical units of the 800x600 base playfield and is
/// multiplied by the axis scale factor when an entity is created.
pub mod consts {
    /// Logical playfield dimensions
    pub const BASE_WIDTH: f32 = 800.0;
    pub const BASE_HEIGHT: f32 = 600.0;

    /// Vessel spawn point and hull size
    pub const VESSEL_START_X: f32 = 400.0;
    pub const VESSEL_START_Y: f32 = 550.0;
    pub const VESSEL_WIDTH: f32 = 80.0;
    pub const VESSEL_HEIGHT: f32 = 30.0;
    /// Distance covered by one move command (scaled by scale_x on both axes)
    pub const MOVE_STEP: f32 = 15.0;

    /// Height of the goal band; a vessel above this line clears the level
    pub const GOAL_BAND_HEIGHT: f32 = 50.0;
    /// Goal flash fade per frame
    pub const GOAL_FLASH_DECAY: f32 = 0.02;
    /// Delay between reaching the goal and the next level (ms)
    pub const TRANSITION_MS: f64 = 1000.0;

    /// Wake trail
    pub const WAKE_SPAWN_INTERVAL_MS: f64 = 32.0;
    pub const WAKE_PARTICLES_PER_SPAWN: usize = 3;
    pub const WAKE_JITTER: f32 = 8.0; // half-width of the sideways spawn jitter
    pub const WAKE_STERN_INSET: f32 = 5.0;
    pub const WAKE_START_ALPHA: f32 = 0.6;
    pub const WAKE_ALPHA_DECAY: f32 = 0.025;
    pub const WAKE_GROWTH: f32 = 0.15;
    pub const WAKE_MIN_SIZE: f32 = 2.0;
    pub const WAKE_MAX_SIZE: f32 = 4.0;

    /// Hazard difficulty curve
    pub const BASE_SPEED: f32 = 0.8;
    pub const SPEED_PER_LEVEL: f32 = 0.2;
    pub const MAX_LEVEL_SPEED: f32 = 6.0;
    pub const SPEED_JITTER: f32 = 0.5;
    pub const MAX_ROWS: u32 = 6;
    pub const MAX_PER_ROW: u32 = 3;
    pub const FIRST_ROW_Y: f32 = 100.0;
    pub const ROW_SPACING_BASE: f32 = 80.0;
    pub const ROW_SPACING_PER_LEVEL: f32 = 5.0;
    pub const MAX_ROW_SPACING: f32 = 120.0;
    pub const MINE_CHANCE_BASE: f32 = 0.1;
    pub const MINE_CHANCE_PER_LEVEL: f32 = 0.03;
    pub const MAX_MINE_CHANCE: f32 = 0.5;

    /// Hazard footprints
    pub const WIDE_HAZARD: (f32, f32) = (80.0, 60.0);
    pub const NARROW_HAZARD: (f32, f32) = (40.0, 40.0);
    /// Mine spin per frame (radians)
    pub const MINE_SPIN: f32 = 0.01;
    /// Cosmetic mine bob
    pub const MINE_BOB_PERIOD_MS: f64 = 500.0;
    pub const MINE_BOB_AMPLITUDE: f32 = 3.0;

    /// Collision paddings removed from each side of a hitbox
    pub const VESSEL_PADDING_VERTICAL: f32 = 12.0;
    pub const VESSEL_PADDING_HORIZONTAL: f32 = 8.0;
    pub const MINE_PADDING: f32 = 12.0;
    pub const ICEBERG_PADDING: f32 = 8.0;
}
