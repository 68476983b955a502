//! Collision detection between the vessel and hazards
//!
//! Axis-aligned rectangle overlap on padded hitboxes. Sprites don't fill
//! their bounding boxes, so each side of a box is pulled in by a padding that
//! depends on the hazard kind and on the vessel's heading.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::scale::CoordinateScaler;
use super::state::{Obstacle, Vessel};

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Remove `padding` from every side
    pub fn shrink(&self, padding: f32) -> Self {
        Self::new(
            self.x + padding,
            self.y + padding,
            self.w - padding * 2.0,
            self.h - padding * 2.0,
        )
    }

    /// Strict overlap; rectangles that only share an edge don't overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Padded hitbox of the vessel for its current heading
pub fn vessel_hitbox(vessel: &Vessel, scaler: &CoordinateScaler) -> Rect {
    let padding = scaler.x(vessel.orientation.geometry().padding);
    vessel.bounds().shrink(padding)
}

/// Padded hitbox of a hazard
pub fn obstacle_hitbox(obstacle: &Obstacle, scaler: &CoordinateScaler) -> Rect {
    let padding = scaler.x(obstacle.kind.padding());
    obstacle.bounds().shrink(padding)
}

/// Index of the first hazard touching the vessel, if any
pub fn first_hit(vessel: &Vessel, hazards: &[Obstacle], scaler: &CoordinateScaler) -> Option<usize> {
    let hull = vessel_hitbox(vessel, scaler);
    hazards
        .iter()
        .position(|hazard| hull.overlaps(&obstacle_hitbox(hazard, scaler)))
}

/// Whether the vessel hits any hazard. Always false during a level
/// transition, when the field is frozen.
pub fn check(
    vessel: &Vessel,
    hazards: &[Obstacle],
    scaler: &CoordinateScaler,
    transitioning: bool,
) -> bool {
    if transitioning {
        return false;
    }
    first_hit(vessel, hazards, scaler).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scale::SurfaceSize;
    use crate::sim::state::{Direction, ObstacleKind};

    fn vessel_at(x: f32, y: f32, orientation: Direction) -> Vessel {
        Vessel {
            pos: Vec2::new(x, y),
            size: Vec2::new(80.0, 30.0),
            last_pos: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            orientation,
        }
    }

    fn hazard(x: f32, y: f32, w: f32, h: f32, kind: ObstacleKind) -> Obstacle {
        Obstacle {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            speed: 1.0,
            direction: 1.0,
            kind,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Shared edge only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_shrink() {
        let r = Rect::new(100.0, 100.0, 80.0, 30.0).shrink(12.0);
        assert_eq!(r, Rect::new(112.0, 112.0, 56.0, 6.0));
        assert_eq!(r.center(), Vec2::new(140.0, 115.0));
    }

    #[test]
    fn test_padded_overlap_registers() {
        let scaler = CoordinateScaler::default();
        let vessel = vessel_at(100.0, 100.0, Direction::Up);
        let berg = hazard(100.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        assert!(check(&vessel, &[berg], &scaler, false));

        let far = hazard(300.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        assert!(!check(&vessel, &[far], &scaler, false));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let scaler = CoordinateScaler::default();
        let vessel = vessel_at(100.0, 100.0, Direction::Up);
        let berg = hazard(100.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        let hull = vessel_hitbox(&vessel, &scaler);
        let ice = obstacle_hitbox(&berg, &scaler);
        assert_eq!(hull.overlaps(&ice), ice.overlaps(&hull));
    }

    #[test]
    fn test_padding_depends_on_heading() {
        let scaler = CoordinateScaler::default();
        // Bounding boxes overlap by 10 px vertically: vessel y 100..130, hazard y 120..160
        let berg = hazard(100.0, 120.0, 40.0, 40.0, ObstacleKind::Iceberg);

        // Sideways hull padding 8: vessel box y 108..122, hazard box y 128..152
        let sideways = vessel_at(100.0, 100.0, Direction::Left);
        assert!(!check(&sideways, &[berg], &scaler, false));

        // Deep overlap still registers with either heading
        let deep = hazard(100.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        assert!(check(&sideways, &[deep], &scaler, false));

        assert_eq!(
            vessel_hitbox(&vessel_at(0.0, 0.0, Direction::Right), &scaler),
            Rect::new(8.0, 8.0, 64.0, 14.0)
        );
        assert_eq!(
            vessel_hitbox(&vessel_at(0.0, 0.0, Direction::Down), &scaler),
            Rect::new(12.0, 12.0, 56.0, 6.0)
        );
    }

    #[test]
    fn test_mines_are_padded_more() {
        let scaler = CoordinateScaler::default();
        // Vessel hitbox (up) spans x 112..168
        let vessel = vessel_at(100.0, 100.0, Direction::Up);
        let berg = hazard(150.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        let mine = hazard(150.0, 100.0, 40.0, 40.0, ObstacleKind::Mine);
        assert_eq!(obstacle_hitbox(&berg, &scaler).x, 158.0);
        assert_eq!(obstacle_hitbox(&mine, &scaler).x, 162.0);

        // At x=156 the mine box starts exactly on the hull's right edge
        let mine_edge = hazard(156.0, 100.0, 40.0, 40.0, ObstacleKind::Mine);
        assert!(!check(&vessel, &[mine_edge], &scaler, false));
        let berg_inside = hazard(156.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        assert!(check(&vessel, &[berg_inside], &scaler, false));
    }

    #[test]
    fn test_no_collision_while_transitioning() {
        let scaler = CoordinateScaler::default();
        let vessel = vessel_at(100.0, 100.0, Direction::Up);
        let berg = hazard(100.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg);
        assert!(!check(&vessel, &[berg], &scaler, true));
    }

    #[test]
    fn test_padding_scales_with_surface() {
        let scaler = CoordinateScaler::new(SurfaceSize::new(1600.0, 600.0));
        let vessel = vessel_at(0.0, 0.0, Direction::Up);
        assert_eq!(vessel_hitbox(&vessel, &scaler).x, 24.0);
    }

    #[test]
    fn test_first_hit_index() {
        let scaler = CoordinateScaler::default();
        let vessel = vessel_at(100.0, 100.0, Direction::Up);
        let hazards = [
            hazard(500.0, 100.0, 40.0, 40.0, ObstacleKind::Iceberg),
            hazard(110.0, 90.0, 80.0, 60.0, ObstacleKind::Mine),
        ];
        assert_eq!(first_hit(&vessel, &hazards, &scaler), Some(1));
        assert_eq!(first_hit(&vessel, &[], &scaler), None);
    }
}
