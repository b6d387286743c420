//! Cardstack Animation
//!
//! Enter/exit animation for cards.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs configured by damping ratio
//! - **Timing Curves**: Linear, bezier easing and spring progress curves
//! - **Animators**: Pluggable setup/animate/cleanup strategies with slide,
//!   fade and alert variants
//! - **Interruptible**: A new run continues from the current values of the
//!   one it supersedes

pub mod animator;
pub mod context;
pub mod easing;
pub mod property_animator;
pub mod spring;
pub mod timing;

pub use animator::{
    for_kind, AlertAnimator, Animator, FadeAnimator, SharedAnimator, SlideAnimator, WithDuration,
    DEFAULT_DURATION,
};
pub use context::{AnimationContext, AnimationPhase};
pub use easing::Easing;
pub use property_animator::{PropertyAnimator, RunEvent, RunEvents, RunId, RunOutcome};
pub use spring::{Spring, SpringConfig};
pub use timing::{CurveSampler, TimingCurve};
