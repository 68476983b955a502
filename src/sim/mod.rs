//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Time comes from the host as milliseconds
//! - Seeded RNG only
//! - Drawing goes through the `Painter` seam

pub mod collision;
pub mod field;
pub mod level;
pub mod paint;
pub mod scale;
pub mod state;
pub mod tick;
pub mod timer;
pub mod wake;

pub use collision::Rect;
pub use field::{LevelConfig, ObstacleField};
pub use level::{DeferredTask, LevelDirector, LevelPhase};
pub use paint::{Banner, Hud, NullPainter, Painter};
pub use scale::{CoordinateScaler, SurfaceSize};
pub use state::{
    Direction, GameEvent, HeadingGeometry, Obstacle, ObstacleKind, RunState, Vessel, WakeParticle,
};
pub use tick::Game;
pub use timer::{Scheduler, TaskHandle};
pub use wake::WakeParticleSystem;
