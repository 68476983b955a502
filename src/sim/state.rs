//! Game state and core simulation types

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::level::LevelDirector;
use super::scale::CoordinateScaler;
use crate::consts::*;

/// Movement command and vessel heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Per-heading geometry, kept in one table so the rules are auditable together
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingGeometry {
    /// Unit vector of travel (screen space, y grows downward)
    pub bow: Vec2,
    /// Sprite rotation in radians; the hull art faces right
    pub rotation: f32,
    /// Vessel collision padding in logical units
    pub padding: f32,
}

const GEOMETRY: [HeadingGeometry; 4] = [
    // Up
    HeadingGeometry {
        bow: Vec2::NEG_Y,
        rotation: -FRAC_PI_2,
        padding: VESSEL_PADDING_VERTICAL,
    },
    // Down
    HeadingGeometry {
        bow: Vec2::Y,
        rotation: FRAC_PI_2,
        padding: VESSEL_PADDING_VERTICAL,
    },
    // Left
    HeadingGeometry {
        bow: Vec2::NEG_X,
        rotation: PI,
        padding: VESSEL_PADDING_HORIZONTAL,
    },
    // Right
    HeadingGeometry {
        bow: Vec2::X,
        rotation: 0.0,
        padding: VESSEL_PADDING_HORIZONTAL,
    },
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse a host key or command name. Arrow key names and plain
    /// `up/down/left/right` always work; `wasd` enables the letter keys.
    pub fn from_key(key: &str, wasd: bool) -> Option<Self> {
        match key {
            "ArrowUp" => return Some(Direction::Up),
            "ArrowDown" => return Some(Direction::Down),
            "ArrowLeft" => return Some(Direction::Left),
            "ArrowRight" => return Some(Direction::Right),
            _ => {}
        }
        match key.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "w" if wasd => Some(Direction::Up),
            "s" if wasd => Some(Direction::Down),
            "a" if wasd => Some(Direction::Left),
            "d" if wasd => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn geometry(self) -> &'static HeadingGeometry {
        &GEOMETRY[self as usize]
    }

    /// Unit vector pointing toward the stern, where the wake trails
    pub fn stern(self) -> Vec2 {
        -self.geometry().bow
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// The player's frigate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    /// Top-left corner in surface pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Position before the most recent move
    pub last_pos: Vec2,
    /// Displacement of the most recent move
    pub velocity: Vec2,
    pub orientation: Direction,
}

impl Vessel {
    /// Vessel at the start position, facing the goal
    pub fn spawn(scaler: &CoordinateScaler) -> Self {
        let pos = scaler.point(VESSEL_START_X, VESSEL_START_Y);
        Self {
            pos,
            size: scaler.point(VESSEL_WIDTH, VESSEL_HEIGHT),
            last_pos: pos,
            velocity: Vec2::ZERO,
            orientation: Direction::Up,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Move one step, clamped to the playfield. Returns true when the move
    /// was toward the goal and actually reduced y.
    pub fn apply_move(&mut self, direction: Direction, step: f32, playfield: Vec2) -> bool {
        let old = self.pos;
        let max = (playfield - self.size).max(Vec2::ZERO);
        let target = old + direction.geometry().bow * step;
        self.pos = target.min(max).max(Vec2::ZERO);
        self.orientation = direction;
        self.last_pos = old;
        self.velocity = self.pos - old;

        direction == Direction::Up && self.pos.y < old.y
    }

    /// Put the vessel back on the start row, keeping its lane
    pub fn return_to_start_row(&mut self, scaler: &CoordinateScaler) {
        self.pos.y = scaler.y(VESSEL_START_Y);
        self.last_pos.y = self.pos.y;
        self.velocity = Vec2::ZERO;
    }
}

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Iceberg,
    Mine,
}

impl ObstacleKind {
    /// Collision padding in logical units
    pub fn padding(self) -> f32 {
        match self {
            ObstacleKind::Iceberg => ICEBERG_PADDING,
            ObstacleKind::Mine => MINE_PADDING,
        }
    }
}

/// A drifting hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner in surface pixels
    pub pos: Vec2,
    pub size: Vec2,
    /// Pixels per frame
    pub speed: f32,
    /// +1.0 drifts right, -1.0 drifts left
    pub direction: f32,
    pub kind: ObstacleKind,
    /// Radians; only mines spin
    pub rotation: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Drift one frame, re-entering from the opposite edge once fully off-field
    pub fn advance(&mut self, field_width: f32) {
        self.pos.x += self.speed * self.direction;
        if self.pos.x > field_width {
            self.pos.x = -self.size.x;
        } else if self.pos.x < -self.size.x {
            self.pos.x = field_width;
        }

        if self.kind == ObstacleKind::Mine {
            self.rotation += MINE_SPIN;
        }
    }
}

/// A cosmetic wake particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Opacity 0-1, strictly decreasing
    pub alpha: f32,
}

/// Events reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u32),
    /// Vessel entered the goal band; the level is frozen for the transition
    LevelCleared(u32),
    /// Next level generated and playable
    LevelStarted(u32),
    GameOver { score: u32, level: u32 },
}

/// Per-run state, discarded when a run ends or restarts
#[derive(Debug, Clone)]
pub struct RunState {
    pub director: LevelDirector,
    pub score: u32,
    pub game_over: bool,
    /// Goal band flash intensity 0-1
    pub goal_flash: f32,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            director: LevelDirector::new(),
            score: 0,
            game_over: false,
            goal_flash: 0.0,
        }
    }

    pub fn level(&self) -> u32 {
        self.director.level()
    }

    pub fn is_transitioning(&self) -> bool {
        self.director.is_transitioning()
    }

    /// Fade the goal flash by one frame
    pub fn decay_goal_flash(&mut self) {
        if self.goal_flash > 0.0 {
            self.goal_flash = (self.goal_flash - GOAL_FLASH_DECAY).max(0.0);
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scale::SurfaceSize;
    use proptest::prelude::*;

    fn base() -> CoordinateScaler {
        CoordinateScaler::default()
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(Direction::from_key("ArrowUp", false), Some(Direction::Up));
        assert_eq!(Direction::from_key("LEFT", false), Some(Direction::Left));
        assert_eq!(Direction::from_key("w", false), None);
        assert_eq!(Direction::from_key("w", true), Some(Direction::Up));
        assert_eq!(Direction::from_key("D", true), Some(Direction::Right));
        assert_eq!(Direction::from_key("sideways", true), None);
        assert_eq!(Direction::from_key("", false), None);
    }

    #[test]
    fn test_heading_table() {
        assert_eq!(Direction::Up.stern(), Vec2::Y);
        assert_eq!(Direction::Left.stern(), Vec2::X);
        assert_eq!(Direction::Up.geometry().padding, 12.0);
        assert_eq!(Direction::Down.geometry().padding, 12.0);
        assert_eq!(Direction::Left.geometry().padding, 8.0);
        assert_eq!(Direction::Right.geometry().rotation, 0.0);
        assert!(Direction::Down.is_vertical());
        assert!(!Direction::Right.is_vertical());
    }

    #[test]
    fn test_spawn_is_scaled() {
        let scaler = CoordinateScaler::new(SurfaceSize::new(400.0, 1200.0));
        let vessel = Vessel::spawn(&scaler);
        assert_eq!(vessel.pos, Vec2::new(200.0, 1100.0));
        assert_eq!(vessel.size, Vec2::new(40.0, 60.0));
        assert_eq!(vessel.orientation, Direction::Up);
    }

    #[test]
    fn test_move_up_reports_climb() {
        let mut vessel = Vessel::spawn(&base());
        let climbed = vessel.apply_move(Direction::Up, 15.0, base().playfield());
        assert!(climbed);
        assert_eq!(vessel.pos.y, 535.0);
        assert_eq!(vessel.last_pos.y, 550.0);
        assert_eq!(vessel.velocity, Vec2::new(0.0, -15.0));
    }

    #[test]
    fn test_move_clamped_at_top_does_not_climb() {
        let mut vessel = Vessel::spawn(&base());
        vessel.pos.y = 0.0;
        assert!(!vessel.apply_move(Direction::Up, 15.0, base().playfield()));
        assert_eq!(vessel.pos.y, 0.0);
        assert!(!vessel.apply_move(Direction::Up, 15.0, base().playfield()));
    }

    #[test]
    fn test_sideways_and_down_never_climb() {
        let mut vessel = Vessel::spawn(&base());
        assert!(!vessel.apply_move(Direction::Left, 15.0, base().playfield()));
        assert_eq!(vessel.orientation, Direction::Left);
        assert!(!vessel.apply_move(Direction::Down, 15.0, base().playfield()));
        assert_eq!(vessel.pos.y, 565.0);
        // 565 + 15 would pass the bottom edge at 600 - 30
        assert!(!vessel.apply_move(Direction::Down, 15.0, base().playfield()));
        assert_eq!(vessel.pos.y, 570.0);
    }

    #[test]
    fn test_obstacle_wraps_right_edge() {
        let mut obstacle = Obstacle {
            pos: Vec2::new(795.0, 100.0),
            size: Vec2::new(40.0, 40.0),
            speed: 10.0,
            direction: 1.0,
            kind: ObstacleKind::Iceberg,
            rotation: 0.0,
        };
        obstacle.advance(800.0);
        assert_eq!(obstacle.pos.x, -40.0);
        obstacle.advance(800.0);
        assert_eq!(obstacle.pos.x, -30.0);
    }

    #[test]
    fn test_obstacle_wraps_left_edge_and_spins_mines() {
        let mut mine = Obstacle {
            pos: Vec2::new(-35.0, 100.0),
            size: Vec2::new(40.0, 40.0),
            speed: 10.0,
            direction: -1.0,
            kind: ObstacleKind::Mine,
            rotation: 0.0,
        };
        mine.advance(800.0);
        assert_eq!(mine.pos.x, 800.0);
        assert!((mine.rotation - MINE_SPIN).abs() < 1e-6);
    }

    #[test]
    fn test_goal_flash_decays_to_zero() {
        let mut run = RunState::new();
        run.goal_flash = 0.03;
        run.decay_goal_flash();
        assert!((run.goal_flash - 0.01).abs() < 1e-6);
        run.decay_goal_flash();
        assert_eq!(run.goal_flash, 0.0);
    }

    proptest! {
        #[test]
        fn vessel_stays_inside_playfield(
            moves in proptest::collection::vec(0usize..4, 1..200),
            width in 200.0f32..2000.0,
            height in 150.0f32..1500.0,
        ) {
            let scaler = CoordinateScaler::new(SurfaceSize::new(width, height));
            let mut vessel = Vessel::spawn(&scaler);
            let step = scaler.x(MOVE_STEP);
            for m in moves {
                vessel.apply_move(Direction::ALL[m], step, scaler.playfield());
                prop_assert!(vessel.pos.x >= 0.0 && vessel.pos.y >= 0.0);
                prop_assert!(vessel.pos.x <= width - vessel.size.x + 1e-3);
                prop_assert!(vessel.pos.y <= height - vessel.size.y + 1e-3);
            }
        }
    }
}
