//! Level progression state machine
//!
//! `Playing` -> `Transitioning` when the vessel enters the goal band.
//! `Transitioning` -> `Playing` when the deferred finish task fires one second
//! later; the level number goes up by one. The field is frozen in between.

use super::field::LevelConfig;
use super::scale::CoordinateScaler;
use super::state::Vessel;
use super::timer::{Scheduler, TaskHandle};
use crate::consts::{GOAL_BAND_HEIGHT, TRANSITION_MS};

/// Work deferred to a later point on the host clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// End the level transition and start the next level
    FinishTransition,
}

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelPhase {
    Playing,
    /// Goal reached; waiting for the finish task
    Transitioning { started_at: f64, task: TaskHandle },
}

/// Owns the level number and the transition between levels
#[derive(Debug, Clone)]
pub struct LevelDirector {
    level: u32,
    phase: LevelPhase,
}

impl LevelDirector {
    pub fn new() -> Self {
        Self {
            level: 1,
            phase: LevelPhase::Playing,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> LevelPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, LevelPhase::Transitioning { .. })
    }

    /// Difficulty of the current level
    pub fn config(&self) -> LevelConfig {
        LevelConfig::for_level(self.level)
    }

    /// Whether the vessel is inside the goal band
    pub fn reached_goal(vessel: &Vessel, scaler: &CoordinateScaler) -> bool {
        vessel.pos.y < scaler.y(GOAL_BAND_HEIGHT)
    }

    pub fn should_begin_transition(&self, vessel: &Vessel, scaler: &CoordinateScaler) -> bool {
        !self.is_transitioning() && Self::reached_goal(vessel, scaler)
    }

    /// Enter `Transitioning` and schedule the finish task. No-op (returns
    /// None) if a transition is already running.
    pub fn begin_transition(
        &mut self,
        now: f64,
        timers: &mut Scheduler<DeferredTask>,
    ) -> Option<TaskHandle> {
        if self.is_transitioning() {
            return None;
        }
        let task = timers.schedule(now + TRANSITION_MS, DeferredTask::FinishTransition);
        self.phase = LevelPhase::Transitioning {
            started_at: now,
            task,
        };
        log::info!("Level {} cleared", self.level);
        Some(task)
    }

    /// Leave `Transitioning`, advancing to the next level. Returns the new
    /// level, or None when no transition was running.
    pub fn finish_transition(&mut self) -> Option<u32> {
        if !self.is_transitioning() {
            return None;
        }
        self.level += 1;
        self.phase = LevelPhase::Playing;
        Some(self.level)
    }

    /// Fraction of the transition elapsed (0-1), while transitioning
    pub fn transition_progress(&self, now: f64) -> Option<f32> {
        match self.phase {
            LevelPhase::Transitioning { started_at, .. } => {
                Some(((now - started_at) / TRANSITION_MS).clamp(0.0, 1.0) as f32)
            }
            LevelPhase::Playing => None,
        }
    }
}

impl Default for LevelDirector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scale::SurfaceSize;

    #[test]
    fn test_initial_state() {
        let director = LevelDirector::new();
        assert_eq!(director.level(), 1);
        assert_eq!(director.phase(), LevelPhase::Playing);
        assert_eq!(director.config(), LevelConfig::for_level(1));
    }

    #[test]
    fn test_goal_band_is_scaled() {
        let scaler = CoordinateScaler::new(SurfaceSize::new(800.0, 1200.0));
        let mut vessel = Vessel::spawn(&scaler);
        vessel.pos.y = 99.0;
        assert!(LevelDirector::reached_goal(&vessel, &scaler));
        vessel.pos.y = 100.0;
        assert!(!LevelDirector::reached_goal(&vessel, &scaler));
    }

    #[test]
    fn test_transition_round_trip() {
        let mut director = LevelDirector::new();
        let mut timers = Scheduler::new();

        let task = director.begin_transition(5_000.0, &mut timers);
        assert!(task.is_some());
        assert!(director.is_transitioning());
        assert_eq!(timers.next_due(), Some(6_000.0));

        // Re-entry while already transitioning does nothing
        assert!(director.begin_transition(5_500.0, &mut timers).is_none());
        assert_eq!(timers.len(), 1);

        assert_eq!(director.transition_progress(5_500.0), Some(0.5));
        assert_eq!(director.transition_progress(9_000.0), Some(1.0));

        assert_eq!(
            timers.take_due(6_000.0),
            vec![DeferredTask::FinishTransition]
        );
        assert_eq!(director.finish_transition(), Some(2));
        assert_eq!(director.phase(), LevelPhase::Playing);
        assert_eq!(director.transition_progress(9_000.0), None);
    }

    #[test]
    fn test_finish_without_transition_is_ignored() {
        let mut director = LevelDirector::new();
        assert_eq!(director.finish_transition(), None);
        assert_eq!(director.level(), 1);
    }

    #[test]
    fn test_should_begin_only_once() {
        let scaler = CoordinateScaler::default();
        let mut vessel = Vessel::spawn(&scaler);
        vessel.pos.y = 40.0;
        let mut director = LevelDirector::new();
        let mut timers = Scheduler::new();
        assert!(director.should_begin_transition(&vessel, &scaler));
        director.begin_transition(0.0, &mut timers);
        assert!(!director.should_begin_transition(&vessel, &scaler));
    }
}
