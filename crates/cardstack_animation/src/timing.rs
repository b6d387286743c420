//! Timing curves mapping elapsed time to animation progress

use std::time::Duration;

use crate::easing::Easing;
use crate::spring::{Spring, SpringConfig};

/// Integration step for spring sampling
const SPRING_STEP: f32 = 1.0 / 240.0;

/// How progress advances over an animation's duration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimingCurve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
    /// Damped spring from 0 to 1. `initial_velocity` is in units of the
    /// total distance per second.
    Spring {
        damping_ratio: f32,
        initial_velocity: f32,
    },
}

impl Default for TimingCurve {
    fn default() -> Self {
        Self::spring(0.8, 0.4)
    }
}

impl TimingCurve {
    pub fn spring(damping_ratio: f32, initial_velocity: f32) -> Self {
        Self::Spring {
            damping_ratio,
            initial_velocity,
        }
    }

    /// Progress in `0..=1` (springs may overshoot) after `elapsed` of a run
    /// lasting `duration`. `velocity` replaces a spring's initial velocity
    /// and is ignored by bezier curves. Always exactly 1.0 once `elapsed`
    /// reaches `duration`.
    ///
    /// Integrates a spring from the start on every call; runs sampled every
    /// frame should hold a [`CurveSampler`] instead.
    pub fn progress(&self, elapsed: Duration, duration: Duration, velocity: Option<f32>) -> f32 {
        self.sampler(duration, velocity).sample(elapsed)
    }

    /// Incremental sampler for one run of this curve
    pub fn sampler(&self, duration: Duration, velocity: Option<f32>) -> CurveSampler {
        let spring = match *self {
            TimingCurve::Spring {
                damping_ratio,
                initial_velocity,
            } => Some(SpringState::new(
                damping_ratio,
                velocity.unwrap_or(initial_velocity),
                duration.as_secs_f32(),
            )),
            _ => None,
        };
        CurveSampler {
            curve: *self,
            duration,
            spring,
        }
    }
}

/// Progress of a single run, keeping spring state between samples
#[derive(Clone, Copy, Debug)]
pub struct CurveSampler {
    curve: TimingCurve,
    duration: Duration,
    spring: Option<SpringState>,
}

impl CurveSampler {
    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    /// Progress after `elapsed`. A spring only integrates the time since the
    /// previous sample; sampling an earlier time restarts it.
    pub fn sample(&mut self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        if let Some(spring) = &mut self.spring {
            return spring.advance(elapsed.as_secs_f32());
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        match self.curve {
            TimingCurve::Linear => t,
            TimingCurve::EaseIn => Easing::EaseIn.apply(t),
            TimingCurve::EaseOut => Easing::EaseOut.apply(t),
            TimingCurve::EaseInOut => Easing::EaseInOut.apply(t),
            TimingCurve::CubicBezier(x1, y1, x2, y2) => {
                Easing::CubicBezier(x1, y1, x2, y2).apply(t)
            }
            TimingCurve::Spring { .. } => t,
        }
    }

    /// Seconds of spring motion integrated in fixed steps so far
    pub fn integrated_secs(&self) -> f32 {
        self.spring.map_or(0.0, |spring| spring.time)
    }
}

#[derive(Clone, Copy, Debug)]
struct SpringState {
    initial: Spring,
    spring: Spring,
    /// Time covered by whole integration steps
    time: f32,
}

impl SpringState {
    fn new(damping_ratio: f32, initial_velocity: f32, duration: f32) -> Self {
        let mut spring = Spring::unit(SpringConfig::from_damping_ratio(damping_ratio, duration));
        spring.set_target(1.0);
        spring.set_velocity(initial_velocity);
        Self {
            initial: spring,
            spring,
            time: 0.0,
        }
    }

    fn advance(&mut self, elapsed: f32) -> f32 {
        if elapsed < self.time {
            self.spring = self.initial;
            self.time = 0.0;
        }
        while self.time + SPRING_STEP <= elapsed {
            self.spring.step(SPRING_STEP);
            self.time += SPRING_STEP;
        }

        // The partial step is not kept so later samples stay on the fixed grid
        let remainder = elapsed - self.time;
        let mut sample = self.spring;
        if remainder > 0.0 {
            sample.step(remainder);
        }
        sample.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_lands_on_one_at_end() {
        for curve in [
            TimingCurve::Linear,
            TimingCurve::EaseInOut,
            TimingCurve::default(),
        ] {
            assert_eq!(curve.progress(ms(400), ms(400), None), 1.0);
            assert_eq!(curve.progress(ms(900), ms(400), None), 1.0);
        }
    }

    #[test]
    fn test_zero_duration_is_complete() {
        assert_eq!(TimingCurve::default().progress(ms(0), ms(0), None), 1.0);
    }

    #[test]
    fn test_spring_progress_is_monotonic_early() {
        let curve = TimingCurve::default();
        let a = curve.progress(ms(40), ms(400), None);
        let b = curve.progress(ms(120), ms(400), None);
        assert!(a > 0.0);
        assert!(b > a);
        assert!(curve.progress(ms(380), ms(400), None) > 0.95);
    }

    #[test]
    fn test_velocity_override_speeds_up_start() {
        let curve = TimingCurve::default();
        let slow = curve.progress(ms(30), ms(400), None);
        let fast = curve.progress(ms(30), ms(400), Some(8.0));
        assert!(fast > slow);
    }

    #[test]
    fn test_sampler_matches_one_shot_progress() {
        let curve = TimingCurve::default();
        let mut sampler = curve.sampler(ms(400), Some(2.0));
        for elapsed in [0, 16, 33, 50, 120, 250, 399] {
            let incremental = sampler.sample(ms(elapsed));
            let fresh = curve.progress(ms(elapsed), ms(400), Some(2.0));
            assert!((incremental - fresh).abs() < 1e-6, "at {elapsed}ms");
        }
        assert_eq!(sampler.sample(ms(400)), 1.0);
    }

    #[test]
    fn test_sampler_integrates_only_new_time() {
        let mut sampler = TimingCurve::default().sampler(ms(2_000), None);
        sampler.sample(ms(1_000));
        let before = sampler.integrated_secs();
        assert!(before > 0.99 && before <= 1.0);

        sampler.sample(ms(1_016));
        let after = sampler.integrated_secs();
        assert!(after - before < 0.02);

        // Going back in time restarts from the initial state
        let early = sampler.sample(ms(10));
        assert!(sampler.integrated_secs() < 0.011);
        assert!((early - TimingCurve::default().progress(ms(10), ms(2_000), None)).abs() < 1e-6);
    }

    #[test]
    fn test_linear_midpoint() {
        let p = TimingCurve::Linear.progress(ms(200), ms(400), None);
        assert!((p - 0.5).abs() < 1e-5);
    }
}
