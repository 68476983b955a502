//! Frame loop and run lifecycle
//!
//! The host drives a `Game` with three calls: `handle_input` for every
//! movement command, `frame` once per display refresh, and `poll_timers`
//! whenever a scheduled task comes due between frames. All time values are
//! milliseconds on the host clock.

use std::mem;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{self, Rect};
use super::field::{LevelConfig, ObstacleField};
use super::level::DeferredTask;
use super::paint::{Banner, Hud, Painter};
use super::scale::{CoordinateScaler, SurfaceSize};
use super::state::{Direction, GameEvent, Obstacle, ObstacleKind, RunState, Vessel, WakeParticle};
use super::timer::Scheduler;
use super::wake::WakeParticleSystem;
use crate::consts::*;
use crate::settings::Settings;

/// Mixed into the seed for the cosmetic stream so wake spray never shifts
/// hazard generation.
const FX_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// One game session: vessel, hazard field, wake and level progression
pub struct Game {
    seed: u64,
    /// Gameplay randomness (hazard fields)
    rng: Pcg32,
    /// Cosmetic randomness (wake spray)
    fx_rng: Pcg32,
    settings: Settings,
    scaler: CoordinateScaler,
    /// Surface size to adopt on the next `start`
    pending_surface: Option<SurfaceSize>,
    vessel: Vessel,
    field: ObstacleField,
    wake: WakeParticleSystem,
    run: RunState,
    timers: Scheduler<DeferredTask>,
    events: Vec<GameEvent>,
    running: bool,
}

impl Game {
    pub fn new(seed: u64, surface: SurfaceSize) -> Self {
        Self::with_settings(seed, surface, Settings::default())
    }

    pub fn with_settings(seed: u64, surface: SurfaceSize, settings: Settings) -> Self {
        let scaler = CoordinateScaler::new(surface);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM),
            settings,
            scaler,
            pending_surface: None,
            vessel: Vessel::spawn(&scaler),
            field: ObstacleField::new(),
            wake: WakeParticleSystem::default(),
            run: RunState::new(),
            timers: Scheduler::new(),
            events: Vec::new(),
            running: false,
        }
    }

    /// Begin a fresh run at level 1. Any previous run, including a pending
    /// level transition, is discarded.
    pub fn start(&mut self, now: f64) {
        if let Some(surface) = self.pending_surface.take() {
            self.scaler = CoordinateScaler::new(surface);
        }
        let cancelled = self.timers.cancel_all();
        if cancelled > 0 {
            log::debug!("Discarded {} pending tasks from the previous run", cancelled);
        }

        self.run = RunState::new();
        self.vessel = Vessel::spawn(&self.scaler);
        self.wake = WakeParticleSystem::new(now);
        self.field.generate(1, &self.scaler, &mut self.rng);
        self.running = true;

        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LevelStarted(1));

        let surface = self.scaler.surface();
        log::info!(
            "Run started: seed {}, surface {}x{}, {} hazards",
            self.seed,
            surface.width,
            surface.height,
            self.field.len()
        );
    }

    /// Halt the loop and cancel every pending task. Safe to call repeatedly.
    pub fn stop(&mut self) {
        let cancelled = self.timers.cancel_all();
        if self.running {
            log::info!("Loop stopped ({} pending tasks cancelled)", cancelled);
        }
        self.running = false;
    }

    /// Record a new output surface. It takes effect at the next `start`; the
    /// current run keeps its geometry.
    pub fn resize(&mut self, surface: SurfaceSize) {
        if surface == self.scaler.surface() {
            self.pending_surface = None;
            return;
        }
        log::debug!(
            "Surface resized to {}x{}, applied on next start",
            surface.width,
            surface.height
        );
        self.pending_surface = Some(surface);
    }

    /// Apply one movement command.
    ///
    /// Ignored before `start`, after game over and during a level
    /// transition. A move toward the goal that reduces y scores one point.
    pub fn handle_input(&mut self, direction: Direction, now: f64) {
        self.poll_timers(now);
        if !self.running || self.run.game_over || self.run.is_transitioning() {
            return;
        }

        if self.settings.wake_trail {
            self.wake
                .spawn(&self.vessel, &self.scaler, &mut self.fx_rng, now);
        }

        let step = self.scaler.x(MOVE_STEP);
        if self
            .vessel
            .apply_move(direction, step, self.scaler.playfield())
        {
            self.run.score += 1;
            self.events.push(GameEvent::ScoreChanged(self.run.score));
        }
    }

    /// Map a host key name to a move. Unrecognized keys are ignored; returns
    /// whether the key was a movement key.
    pub fn handle_key(&mut self, key: &str, now: f64) -> bool {
        match Direction::from_key(key, self.settings.wasd_keys) {
            Some(direction) => {
                self.handle_input(direction, now);
                true
            }
            None => false,
        }
    }

    /// Run every deferred task that is due at `now`
    pub fn poll_timers(&mut self, now: f64) {
        for task in self.timers.take_due(now) {
            match task {
                DeferredTask::FinishTransition => self.finish_transition(),
            }
        }
    }

    fn finish_transition(&mut self) {
        if self.run.game_over {
            return;
        }
        let Some(level) = self.run.director.finish_transition() else {
            return;
        };
        self.vessel.return_to_start_row(&self.scaler);
        self.field.generate(level, &self.scaler, &mut self.rng);
        self.events.push(GameEvent::LevelStarted(level));
        log::info!("Level {} started with {} hazards", level, self.field.len());
    }

    /// Advance one display frame and draw it.
    ///
    /// Draw order: background, goal band, wake, hazards, vessel, HUD, banner.
    /// Collision and goal checks run after drawing.
    pub fn frame(&mut self, now: f64, painter: &mut impl Painter) {
        if !self.running {
            return;
        }
        self.poll_timers(now);

        painter.background(self.scaler.surface(), now);
        let flash = if self.settings.effective_goal_flash() {
            self.run.goal_flash
        } else {
            0.0
        };
        painter.goal_band(self.goal_band(), flash);
        self.run.decay_goal_flash();

        self.wake.advance(&self.scaler);
        for particle in self.wake.particles() {
            painter.wake_particle(particle);
        }

        let transitioning = self.run.is_transitioning();
        if !transitioning {
            self.field.advance(self.scaler.surface().width);
        }
        let bob = self.mine_bob(now);
        for obstacle in self.field.obstacles() {
            let offset = match obstacle.kind {
                ObstacleKind::Mine => bob,
                ObstacleKind::Iceberg => 0.0,
            };
            painter.obstacle(obstacle, offset);
        }

        painter.vessel(&self.vessel);

        let level = self.run.level();
        if self.settings.show_hud {
            painter.hud(&Hud::new(level, self.level_config().rows, &self.scaler));
        }
        if let Some(progress) = self.run.director.transition_progress(now) {
            painter.transition_banner(&Banner::level_complete(level, progress, &self.scaler));
        }

        if collision::check(
            &self.vessel,
            self.field.obstacles(),
            &self.scaler,
            transitioning,
        ) {
            self.game_over();
            return;
        }

        if self
            .run
            .director
            .should_begin_transition(&self.vessel, &self.scaler)
            && self
                .run
                .director
                .begin_transition(now, &mut self.timers)
                .is_some()
        {
            self.run.goal_flash = 1.0;
            self.events.push(GameEvent::LevelCleared(level));
        }
    }

    fn game_over(&mut self) {
        self.run.game_over = true;
        self.stop();
        let (score, level) = (self.run.score, self.run.level());
        self.events.push(GameEvent::GameOver { score, level });
        log::info!("Game over: score {} on level {}", score, level);
    }

    /// Goal band across the top of the surface
    pub fn goal_band(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.scaler.surface().width,
            self.scaler.y(GOAL_BAND_HEIGHT),
        )
    }

    fn mine_bob(&self, now: f64) -> f32 {
        if !self.settings.effective_mine_bob() {
            return 0.0;
        }
        (now / MINE_BOB_PERIOD_MS).sin() as f32 * self.scaler.y(MINE_BOB_AMPLITUDE)
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// When the host should call `poll_timers` next, if anything is pending
    pub fn next_timer_due(&self) -> Option<f64> {
        self.timers.next_due()
    }

    // === Accessors ===

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn vessel(&self) -> &Vessel {
        &self.vessel
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.field.obstacles()
    }

    pub fn particles(&self) -> &[WakeParticle] {
        self.wake.particles()
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn level(&self) -> u32 {
        self.run.level()
    }

    pub fn level_config(&self) -> LevelConfig {
        self.run.director.config()
    }

    pub fn scaler(&self) -> &CoordinateScaler {
        &self.scaler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        if !settings.wake_trail {
            self.wake.clear();
        }
        self.settings = settings;
    }
}
