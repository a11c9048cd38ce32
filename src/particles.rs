//! Background particle field.
//!
//! The field is a pure time-driven model: the frontend calls
//! [`ParticleField::advance`] with the current frame time and renders
//! whatever [`ParticleField::live`] returns. Spawns follow a fixed schedule
//! (an initial staggered burst, then one per interval) and every particle is
//! removed once its lifetime has elapsed, so the live count is bounded by
//! `burst + ceil(lifetime / interval)` no matter how long the page is open.

use crate::config::MotionConfig;
use rand::Rng;

const SIZE_PX_RANGE: (f64, f64) = (3.0, 9.0);
const POSITION_PCT_RANGE: (f64, f64) = (0.0, 100.0);
const FLOAT_DURATION_S_RANGE: (f64, f64) = (20.0, 45.0);
const FLOAT_DELAY_S_RANGE: (f64, f64) = (0.0, 5.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleSchedule {
    pub burst_count: u32,
    pub burst_stagger_ms: f64,
    pub spawn_interval_ms: f64,
    pub lifetime_ms: f64,
}

impl ParticleSchedule {
    pub fn from_config(config: &MotionConfig) -> Self {
        Self {
            burst_count: config.particle_burst_count,
            burst_stagger_ms: config.particle_burst_stagger_ms,
            spawn_interval_ms: config.particle_spawn_interval_ms,
            lifetime_ms: config.particle_lifetime_ms,
        }
    }

    /// Upper bound on particles alive at once.
    pub fn max_live(&self) -> usize {
        self.burst_count as usize + self.steady_state_count()
    }

    pub fn steady_state_count(&self) -> usize {
        (self.lifetime_ms / self.spawn_interval_ms).ceil() as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub float_duration_s: f64,
    pub float_delay_s: f64,
    pub color_index: usize,
    pub born_at_ms: f64,
}

impl Particle {
    pub fn style(&self, color: &str) -> String {
        format!(
            "width: {size:.2}px; height: {size:.2}px; left: {left:.2}%; top: {top:.2}%; \
             animation-duration: {duration:.2}s; animation-delay: {delay:.2}s; background: {color};",
            size = self.size_px,
            left = self.left_pct,
            top = self.top_pct,
            duration = self.float_duration_s,
            delay = self.float_delay_s,
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldChange {
    pub spawned: usize,
    pub expired: usize,
}

impl FieldChange {
    pub fn is_empty(&self) -> bool {
        self.spawned == 0 && self.expired == 0
    }
}

pub struct ParticleField<R> {
    rng: R,
    schedule: ParticleSchedule,
    color_count: usize,
    origin_ms: Option<f64>,
    burst_emitted: u32,
    intervals_emitted: u64,
    next_id: u64,
    live: Vec<Particle>,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(schedule: ParticleSchedule, color_count: usize, rng: R) -> Self {
        Self {
            rng,
            schedule,
            color_count,
            origin_ms: None,
            burst_emitted: 0,
            intervals_emitted: 0,
            next_id: 0,
            live: Vec::new(),
        }
    }

    /// Spawns everything scheduled up to `now_ms` and drops expired
    /// particles. The first call fixes the field's origin.
    pub fn advance(&mut self, now_ms: f64) -> FieldChange {
        if self.color_count == 0 {
            return FieldChange::default();
        }

        let origin = *self.origin_ms.get_or_insert(now_ms);
        let mut change = FieldChange::default();

        while self.burst_emitted < self.schedule.burst_count {
            let born_at = origin + f64::from(self.burst_emitted) * self.schedule.burst_stagger_ms;
            if born_at > now_ms {
                break;
            }
            self.burst_emitted += 1;
            change.spawned += self.spawn_unless_stale(born_at, now_ms);
        }

        loop {
            let born_at =
                origin + (self.intervals_emitted + 1) as f64 * self.schedule.spawn_interval_ms;
            if born_at > now_ms {
                break;
            }
            self.intervals_emitted += 1;
            change.spawned += self.spawn_unless_stale(born_at, now_ms);
        }

        let lifetime = self.schedule.lifetime_ms;
        let before = self.live.len();
        self.live.retain(|particle| particle.born_at_ms + lifetime > now_ms);
        change.expired = before - self.live.len();

        change
    }

    // Catching up after a stalled frame loop must not spawn particles that
    // would already be gone.
    fn spawn_unless_stale(&mut self, born_at_ms: f64, now_ms: f64) -> usize {
        if born_at_ms + self.schedule.lifetime_ms <= now_ms {
            return 0;
        }
        let particle = self.roll(born_at_ms);
        self.live.push(particle);
        1
    }

    fn roll(&mut self, born_at_ms: f64) -> Particle {
        let id = self.next_id;
        self.next_id += 1;

        Particle {
            id,
            size_px: self.rng.gen_range(SIZE_PX_RANGE.0..SIZE_PX_RANGE.1),
            left_pct: self.rng.gen_range(POSITION_PCT_RANGE.0..POSITION_PCT_RANGE.1),
            top_pct: self.rng.gen_range(POSITION_PCT_RANGE.0..POSITION_PCT_RANGE.1),
            float_duration_s: self
                .rng
                .gen_range(FLOAT_DURATION_S_RANGE.0..FLOAT_DURATION_S_RANGE.1),
            float_delay_s: self.rng.gen_range(FLOAT_DELAY_S_RANGE.0..FLOAT_DELAY_S_RANGE.1),
            color_index: self.rng.gen_range(0..self.color_count),
            born_at_ms,
        }
    }

    pub fn live(&self) -> &[Particle] {
        &self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashMap;

    fn field(seed: u64) -> ParticleField<StdRng> {
        let schedule = ParticleSchedule::from_config(&MotionConfig::default());
        ParticleField::new(schedule, 3, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn burst_is_staggered() {
        let mut field = field(1);

        assert_eq!(field.advance(0.0).spawned, 1);
        assert_eq!(field.advance(149.0).spawned, 0);
        assert_eq!(field.advance(150.0).spawned, 1);
        assert_eq!(field.advance(5_850.0).spawned, 38 + 2);
        assert_eq!(field.live().len(), 40 + 2);
    }

    #[test]
    fn interval_spawns_one_particle_per_tick() {
        let mut field = field(2);
        field.advance(0.0);
        field.advance(6_000.0);
        let before = field.live().len();

        assert_eq!(field.advance(7_499.0).spawned, 0);
        assert_eq!(field.advance(7_500.0).spawned, 1);
        assert_eq!(field.live().len(), before + 1);
    }

    #[test]
    fn live_count_is_bounded_and_settles_to_steady_state() {
        let mut field = field(3);
        let schedule = ParticleSchedule::from_config(&MotionConfig::default());
        assert_eq!(schedule.steady_state_count(), 16);

        let mut now = 0.0;
        while now < 180_000.0 {
            field.advance(now);
            assert!(field.live().len() <= schedule.max_live(), "at {now}ms: {}", field.live().len());
            if now >= 40_000.0 + 39.0 * 150.0 {
                assert!(field.live().len() <= 16, "at {now}ms: {}", field.live().len());
            }
            now += 16.0;
        }
    }

    #[test]
    fn every_particle_lives_exactly_its_lifetime() {
        let mut field = field(4);
        let mut born: HashMap<u64, f64> = HashMap::new();
        let mut removed_at: HashMap<u64, f64> = HashMap::new();

        let mut now = 0.0;
        while now < 120_000.0 {
            field.advance(now);
            let alive: Vec<u64> = field.live().iter().map(|particle| particle.id).collect();
            for particle in field.live() {
                born.entry(particle.id).or_insert(particle.born_at_ms);
            }
            for (id, _) in born.iter() {
                if !alive.contains(id) {
                    removed_at.entry(*id).or_insert(now);
                }
            }
            now += 10.0;
        }

        assert!(!removed_at.is_empty());
        for (id, removed) in removed_at {
            let age = removed - born[&id];
            assert!(age >= 40_000.0, "particle {id} removed after {age}ms");
            assert!(age < 40_000.0 + 10.0, "particle {id} removed after {age}ms");
        }
    }

    #[test]
    fn stalled_loop_skips_particles_that_would_already_be_gone() {
        let mut field = field(5);
        field.advance(0.0);

        let change = field.advance(300_000.0);
        assert_eq!(field.live().len(), 16);
        assert_eq!(change.spawned, 16);
        assert_eq!(change.expired, 1);
    }

    #[test]
    fn rolled_attributes_stay_in_range() {
        let mut field = field(6);
        field.advance(0.0);
        field.advance(30_000.0);

        for particle in field.live() {
            assert!((3.0..9.0).contains(&particle.size_px));
            assert!((0.0..100.0).contains(&particle.left_pct));
            assert!((0.0..100.0).contains(&particle.top_pct));
            assert!((20.0..45.0).contains(&particle.float_duration_s));
            assert!((0.0..5.0).contains(&particle.float_delay_s));
            assert!(particle.color_index < 3);
        }
    }

    #[test]
    fn same_seed_gives_same_field() {
        let mut first = field(7);
        let mut second = field(7);
        first.advance(0.0);
        second.advance(0.0);
        first.advance(10_000.0);
        second.advance(10_000.0);

        assert_eq!(first.live(), second.live());
    }

    #[test]
    fn no_colors_means_no_particles() {
        let schedule = ParticleSchedule::from_config(&MotionConfig::default());
        let mut field = ParticleField::new(schedule, 0, StdRng::seed_from_u64(8));

        assert!(field.advance(0.0).is_empty());
        assert!(field.advance(10_000.0).is_empty());
        assert!(field.live().is_empty());
    }
}
