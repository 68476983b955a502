//! Wake trail behind the vessel (cosmetic only)

use rand::Rng;

use super::scale::CoordinateScaler;
use super::state::{Vessel, WakeParticle};
use crate::consts::*;

/// Spawns, advances and expires wake particles
#[derive(Debug, Clone, Default)]
pub struct WakeParticleSystem {
    particles: Vec<WakeParticle>,
    /// Time of the last spawn burst (ms)
    last_spawn_at: f64,
}

impl WakeParticleSystem {
    /// Empty system; the throttle window starts at `now`
    pub fn new(now: f64) -> Self {
        Self {
            particles: Vec::new(),
            last_spawn_at: now,
        }
    }

    /// Whether enough time has passed for another burst
    pub fn ready(&self, now: f64) -> bool {
        now - self.last_spawn_at >= WAKE_SPAWN_INTERVAL_MS
    }

    /// Emit a burst at the vessel's stern. Throttled to one burst per
    /// spawn interval; returns whether particles were emitted.
    pub fn spawn(
        &mut self,
        vessel: &Vessel,
        scaler: &CoordinateScaler,
        rng: &mut impl Rng,
        now: f64,
    ) -> bool {
        if !self.ready(now) {
            return false;
        }
        self.last_spawn_at = now;

        let stern = vessel.orientation.stern();
        let beam = stern.perp();
        let scale = scaler.factors();
        // Stern edge, pulled back inside the hull a little
        let stern_edge = vessel.center() + stern * (vessel.size * 0.5).dot(stern.abs())
            - stern * WAKE_STERN_INSET * scale;

        for _ in 0..WAKE_PARTICLES_PER_SPAWN {
            let jitter = rng.random_range(-WAKE_JITTER..WAKE_JITTER);
            let push = 0.5 + rng.random::<f32>() * 0.5;
            let drift = (rng.random::<f32>() - 0.5) * 0.5;

            self.particles.push(WakeParticle {
                pos: stern_edge + beam * jitter * scale,
                vel: (stern * push + beam * drift) * scale,
                size: rng.random_range(WAKE_MIN_SIZE..WAKE_MAX_SIZE) * scaler.scale_x(),
                alpha: WAKE_START_ALPHA,
            });
        }
        true
    }

    /// Move, grow and fade every particle; drop the fully faded ones
    pub fn advance(&mut self, scaler: &CoordinateScaler) {
        let growth = WAKE_GROWTH * scaler.scale_x();
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.size += growth;
            particle.alpha -= WAKE_ALPHA_DECAY;
        }
        self.particles.retain(|p| p.alpha > 0.0);
    }

    pub fn particles(&self) -> &[WakeParticle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (WakeParticleSystem, Vessel, CoordinateScaler, Pcg32) {
        let scaler = CoordinateScaler::default();
        (
            WakeParticleSystem::new(0.0),
            Vessel::spawn(&scaler),
            scaler,
            Pcg32::seed_from_u64(7),
        )
    }

    #[test]
    fn test_spawn_is_throttled() {
        let (mut wake, vessel, scaler, mut rng) = setup();
        assert!(!wake.spawn(&vessel, &scaler, &mut rng, 10.0));
        assert!(wake.particles().is_empty());

        assert!(wake.spawn(&vessel, &scaler, &mut rng, 32.0));
        assert_eq!(wake.particles().len(), WAKE_PARTICLES_PER_SPAWN);

        // Second call inside the window does nothing
        assert!(!wake.spawn(&vessel, &scaler, &mut rng, 50.0));
        assert_eq!(wake.particles().len(), 3);

        assert!(wake.spawn(&vessel, &scaler, &mut rng, 64.0));
        assert_eq!(wake.particles().len(), 6);
    }

    #[test]
    fn test_heading_up_trails_below_center() {
        let (mut wake, vessel, scaler, mut rng) = setup();
        wake.spawn(&vessel, &scaler, &mut rng, 100.0);
        let center = vessel.center();
        for p in wake.particles() {
            // Stern edge is y + height - inset
            assert!((p.pos.y - (vessel.pos.y + vessel.size.y - WAKE_STERN_INSET)).abs() < 1e-3);
            assert!(p.pos.y > center.y);
            assert!((p.pos.x - center.x).abs() <= WAKE_JITTER);
            assert!(p.vel.y >= 0.5 && p.vel.y <= 1.0);
            assert!(p.vel.x.abs() <= 0.25);
            assert!(p.size >= WAKE_MIN_SIZE && p.size < WAKE_MAX_SIZE);
            assert_eq!(p.alpha, WAKE_START_ALPHA);
        }
    }

    #[test]
    fn test_heading_left_trails_to_the_right() {
        let (mut wake, mut vessel, scaler, mut rng) = setup();
        vessel.orientation = Direction::Left;
        wake.spawn(&vessel, &scaler, &mut rng, 100.0);
        for p in wake.particles() {
            assert!((p.pos.x - (vessel.pos.x + vessel.size.x - WAKE_STERN_INSET)).abs() < 1e-3);
            assert!(p.vel.x > 0.0);
        }
    }

    #[test]
    fn test_advance_moves_grows_and_expires() {
        let (mut wake, vessel, scaler, mut rng) = setup();
        wake.spawn(&vessel, &scaler, &mut rng, 100.0);
        let before: Vec<Vec2> = wake.particles().iter().map(|p| p.pos + p.vel).collect();
        let sizes: Vec<f32> = wake.particles().iter().map(|p| p.size).collect();

        wake.advance(&scaler);
        for (i, p) in wake.particles().iter().enumerate() {
            assert_eq!(p.pos, before[i]);
            assert!((p.size - (sizes[i] + WAKE_GROWTH)).abs() < 1e-5);
            assert!((p.alpha - (WAKE_START_ALPHA - WAKE_ALPHA_DECAY)).abs() < 1e-6);
        }

        // 0.6 / 0.025 = 24 frames to fade out
        for _ in 0..30 {
            wake.advance(&scaler);
        }
        assert!(wake.particles().is_empty());
    }

    #[test]
    fn test_advance_with_no_particles() {
        let mut wake = WakeParticleSystem::default();
        wake.advance(&CoordinateScaler::default());
        assert!(wake.particles().is_empty());
    }

    proptest! {
        #[test]
        fn alpha_strictly_decreases(seed in any::<u64>(), frames in 1usize..40) {
            let scaler = CoordinateScaler::default();
            let vessel = Vessel::spawn(&scaler);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut wake = WakeParticleSystem::new(0.0);
            wake.spawn(&vessel, &scaler, &mut rng, 32.0);
            for _ in 0..frames {
                let before: Vec<f32> = wake.particles().iter().map(|p| p.alpha).collect();
                wake.advance(&scaler);
                for (p, a) in wake.particles().iter().zip(before.iter()) {
                    prop_assert!(p.alpha < *a);
                    prop_assert!(p.alpha > 0.0);
                }
            }
        }
    }
}
