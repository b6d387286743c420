//! Interruptible property animator
//!
//! Runs one animation at a time over a set of views. Starting a run captures
//! the views' current values as the start state, lets a closure write the end
//! state, restores the start state, then interpolates between the two on
//! every [`PropertyAnimator::tick`]. A new run supersedes the one in flight
//! and continues from wherever the views currently are.

use std::time::Duration;

use cardstack_core::{AnimatableProps, ViewHandle};
use smallvec::SmallVec;

use crate::timing::{CurveSampler, TimingCurve};

/// Identifies one run of a [`PropertyAnimator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

/// How a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// The run reached its end state
    Finished,
    /// The run was superseded or stopped before it finished
    Interrupted,
}

/// A run ending, reported once per run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunEvent {
    pub run: RunId,
    pub outcome: RunOutcome,
}

pub type RunEvents = SmallVec<[RunEvent; 2]>;

#[derive(Debug)]
struct Track {
    view: ViewHandle,
    from: AnimatableProps,
    to: AnimatableProps,
}

#[derive(Debug)]
struct Run {
    id: RunId,
    started_ms: u64,
    sampler: CurveSampler,
    tracks: SmallVec<[Track; 4]>,
}

/// Single animation runner keyed by a duration and timing curve
#[derive(Debug)]
pub struct PropertyAnimator {
    duration: Duration,
    curve: TimingCurve,
    run: Option<Run>,
    next_id: u64,
    pending: RunEvents,
}

impl PropertyAnimator {
    pub fn new(duration: Duration, curve: TimingCurve) -> Self {
        Self {
            duration,
            curve,
            run: None,
            next_id: 1,
            pending: SmallVec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn timing_curve(&self) -> TimingCurve {
        self.curve
    }

    /// Whether a run is in flight
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// The run in flight, if any
    pub fn current(&self) -> Option<RunId> {
        self.run.as_ref().map(|run| run.id)
    }

    /// Start a run over `views`. `animate` writes the end state; the views
    /// are put back to their current state before this returns.
    ///
    /// `velocity` replaces a spring curve's initial velocity for this run.
    pub fn start(
        &mut self,
        views: &[ViewHandle],
        now_ms: u64,
        velocity: Option<f32>,
        animate: impl FnOnce(),
    ) -> RunId {
        self.stop();

        let from: SmallVec<[AnimatableProps; 4]> =
            views.iter().map(|view| view.get().animatable()).collect();
        animate();

        let tracks = views
            .iter()
            .zip(from)
            .map(|(view, from)| {
                let to = view.get().animatable();
                view.update(|props| props.apply(from));
                Track {
                    view: view.clone(),
                    from,
                    to,
                }
            })
            .collect();

        let id = RunId(self.next_id);
        self.next_id += 1;

        tracing::trace!(?id, duration = ?self.duration, "animation run started");

        self.run = Some(Run {
            id,
            started_ms: now_ms,
            sampler: self.curve.sampler(self.duration, velocity),
            tracks,
        });
        id
    }

    /// Stop the run in flight, leaving the views where they are. The run is
    /// reported as interrupted on the next tick.
    pub fn stop(&mut self) -> Option<RunId> {
        let run = self.run.take()?;
        tracing::trace!(id = ?run.id, "animation run interrupted");
        self.pending.push(RunEvent {
            run: run.id,
            outcome: RunOutcome::Interrupted,
        });
        Some(run.id)
    }

    /// Advance the run in flight and report runs that ended since the last
    /// tick
    pub fn tick(&mut self, now_ms: u64) -> RunEvents {
        let mut events = std::mem::take(&mut self.pending);

        let Some(run) = self.run.as_mut() else {
            return events;
        };

        let elapsed = Duration::from_millis(now_ms.saturating_sub(run.started_ms));
        let finished = elapsed >= self.duration;
        let progress = run.sampler.sample(elapsed);

        for track in &run.tracks {
            let mut props = AnimatableProps::lerp(&track.from, &track.to, progress);
            props.alpha = props.alpha.clamp(0.0, 1.0);
            if finished {
                props = track.to;
            }
            track.view.update(|view| view.apply(props));
        }

        if finished {
            events.push(RunEvent {
                run: run.id,
                outcome: RunOutcome::Finished,
            });
            self.run = None;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstack_core::{Affine2D, Point};

    fn linear(ms: u64) -> PropertyAnimator {
        PropertyAnimator::new(Duration::from_millis(ms), TimingCurve::Linear)
    }

    #[test]
    fn test_start_restores_then_interpolates() {
        let view = ViewHandle::new();
        view.set_alpha(0.0);

        let mut animator = linear(400);
        let id = animator.start(&[view.clone()], 1_000, None, || view.set_alpha(1.0));

        assert_eq!(view.alpha(), 0.0);
        assert!(animator.tick(1_200).is_empty());
        assert!((view.alpha() - 0.5).abs() < 1e-5);

        let events = animator.tick(1_400);
        assert_eq!(
            events.as_slice(),
            &[RunEvent {
                run: id,
                outcome: RunOutcome::Finished
            }]
        );
        assert_eq!(view.alpha(), 1.0);
        assert!(!animator.is_running());
        assert!(animator.tick(1_500).is_empty());
    }

    #[test]
    fn test_new_run_supersedes_from_current_values() {
        let card = ViewHandle::new();
        card.set_transform(Affine2D::translation(0.0, 200.0));

        let mut animator = linear(400);
        let enter = animator.start(&[card.clone()], 0, None, || {
            card.set_transform(Affine2D::IDENTITY)
        });
        animator.tick(200);
        assert_eq!(card.transform().translation_part(), Point::new(0.0, 100.0));

        let exit = animator.start(&[card.clone()], 200, None, || {
            card.set_transform(Affine2D::translation(0.0, 200.0))
        });
        assert_eq!(card.transform().translation_part(), Point::new(0.0, 100.0));

        let events = animator.tick(400);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].run, enter);
        assert_eq!(events[0].outcome, RunOutcome::Interrupted);
        assert_eq!(card.transform().translation_part(), Point::new(0.0, 150.0));

        let events = animator.tick(600);
        assert_eq!(events[0].run, exit);
        assert_eq!(events[0].outcome, RunOutcome::Finished);
    }

    #[test]
    fn test_zero_duration_finishes_on_next_tick() {
        let view = ViewHandle::new();
        let mut animator = linear(0);
        animator.start(&[view.clone()], 10, None, || view.set_alpha(0.25));
        let events = animator.tick(10);
        assert_eq!(events[0].outcome, RunOutcome::Finished);
        assert_eq!(view.alpha(), 0.25);
    }

    #[test]
    fn test_stop_leaves_views_in_place() {
        let view = ViewHandle::new();
        view.set_alpha(0.0);
        let mut animator = linear(100);
        animator.start(&[view.clone()], 0, None, || view.set_alpha(1.0));
        animator.tick(50);
        let stopped = animator.stop();

        assert!(stopped.is_some());
        assert!((view.alpha() - 0.5).abs() < 1e-5);
        assert_eq!(animator.tick(200)[0].outcome, RunOutcome::Interrupted);
        assert!((view.alpha() - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_spring_run_follows_curve_across_ticks() {
        let view = ViewHandle::new();
        view.set_alpha(0.0);
        let curve = TimingCurve::default();
        let mut animator = PropertyAnimator::new(Duration::from_millis(1_000), curve);
        animator.start(&[view.clone()], 0, Some(1.5), || view.set_alpha(1.0));

        for now in [16, 32, 48, 300, 620] {
            animator.tick(now);
            let expected = curve
                .progress(Duration::from_millis(now), Duration::from_millis(1_000), Some(1.5))
                .clamp(0.0, 1.0);
            assert!((view.alpha() - expected).abs() < 1e-5, "at {now}ms");
        }
        assert_eq!(animator.tick(1_000)[0].outcome, RunOutcome::Finished);
    }
}
