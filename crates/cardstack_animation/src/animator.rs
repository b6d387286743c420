//! Card animators
//!
//! An [`Animator`] moves a card between its hidden and visible states in
//! three steps:
//!
//! 1. `setup` puts the views into the pre-animation state, synchronously.
//!    Hidden for a presentation, visible for a dismissal. Must be idempotent.
//! 2. `animate` writes only the end-state values. The
//!    [`crate::PropertyAnimator`] captures them and interpolates.
//! 3. `cleanup` runs once after the animation settles, for state that cannot
//!    be interpolated.

use std::sync::Arc;
use std::time::Duration;

use cardstack_core::{Affine2D, Anchor, AnimatorKind};

use crate::context::AnimationContext;
use crate::timing::TimingCurve;

/// Default animation duration
pub const DEFAULT_DURATION: Duration = Duration::from_millis(400);

/// Enter/exit animation strategy for a card
pub trait Animator: Send + Sync {
    /// Put the views into the pre-animation state
    fn setup(&self, _ctx: &AnimationContext) {}

    /// Write the end-state values for the pass
    fn animate(&self, ctx: &AnimationContext);

    /// Finish anything `animate` could not express
    fn cleanup(&self, _ctx: &AnimationContext) {}

    fn duration(&self) -> Duration {
        DEFAULT_DURATION
    }

    fn timing_curve(&self) -> TimingCurve {
        TimingCurve::default()
    }
}

/// Shared animator
pub type SharedAnimator = Arc<dyn Animator>;

/// Built-in animator for `kind`
pub fn for_kind(kind: AnimatorKind) -> SharedAnimator {
    match kind {
        AnimatorKind::Slide => Arc::new(SlideAnimator),
        AnimatorKind::Fade => Arc::new(FadeAnimator),
        AnimatorKind::Alert => Arc::new(AlertAnimator),
    }
}

/// Wraps an animator with a different duration
pub struct WithDuration<A> {
    inner: A,
    duration: Duration,
}

impl<A: Animator> WithDuration<A> {
    pub fn new(inner: A, duration: Duration) -> Self {
        Self { inner, duration }
    }
}

impl<A: Animator> Animator for WithDuration<A> {
    fn setup(&self, ctx: &AnimationContext) {
        self.inner.setup(ctx);
    }

    fn animate(&self, ctx: &AnimationContext) {
        self.inner.animate(ctx);
    }

    fn cleanup(&self, ctx: &AnimationContext) {
        self.inner.cleanup(ctx);
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn timing_curve(&self) -> TimingCurve {
        self.inner.timing_curve()
    }
}

impl Animator for SharedAnimator {
    fn setup(&self, ctx: &AnimationContext) {
        (**self).setup(ctx);
    }

    fn animate(&self, ctx: &AnimationContext) {
        (**self).animate(ctx);
    }

    fn cleanup(&self, ctx: &AnimationContext) {
        (**self).cleanup(ctx);
    }

    fn duration(&self) -> Duration {
        (**self).duration()
    }

    fn timing_curve(&self) -> TimingCurve {
        (**self).timing_curve()
    }
}

// =============================================================================
// Slide
// =============================================================================

/// Slides the card along the anchor axis and fades the overlay
#[derive(Clone, Copy, Debug, Default)]
pub struct SlideAnimator;

impl SlideAnimator {
    /// Transform placing the card just past its anchor edge
    pub fn hidden_transform(ctx: &AnimationContext) -> Affine2D {
        let size = ctx.card_size;
        match ctx.anchor {
            Anchor::Top => Affine2D::translation(0.0, -(size.height + ctx.insets.top)),
            Anchor::Left => Affine2D::translation(-(size.width + ctx.insets.left), 0.0),
            Anchor::Bottom => Affine2D::translation(0.0, size.height + ctx.insets.bottom),
            Anchor::Right => Affine2D::translation(size.width + ctx.insets.right, 0.0),
            Anchor::Center => Affine2D::IDENTITY,
        }
    }

    fn apply(ctx: &AnimationContext, visible: bool) {
        ctx.content_overlay_view
            .set_alpha(if visible { 1.0 } else { 0.0 });
        ctx.card_view.set_transform(if visible {
            Affine2D::IDENTITY
        } else {
            Self::hidden_transform(ctx)
        });
    }
}

impl Animator for SlideAnimator {
    fn setup(&self, ctx: &AnimationContext) {
        Self::apply(ctx, !ctx.is_presentation());
    }

    fn animate(&self, ctx: &AnimationContext) {
        Self::apply(ctx, ctx.is_presentation());
    }
}

// =============================================================================
// Fade
// =============================================================================

/// Cross-fades the card and the overlay
#[derive(Clone, Copy, Debug, Default)]
pub struct FadeAnimator;

impl FadeAnimator {
    fn apply(ctx: &AnimationContext, visible: bool) {
        let alpha = if visible { 1.0 } else { 0.0 };
        ctx.content_overlay_view.set_alpha(alpha);
        ctx.card_view.set_alpha(alpha);
    }
}

impl Animator for FadeAnimator {
    fn setup(&self, ctx: &AnimationContext) {
        Self::apply(ctx, !ctx.is_presentation());
    }

    fn animate(&self, ctx: &AnimationContext) {
        Self::apply(ctx, ctx.is_presentation());
    }
}

// =============================================================================
// Alert
// =============================================================================

/// Fades the card in while it rises 30pt and grows from 90%
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertAnimator;

impl AlertAnimator {
    pub fn hidden_transform() -> Affine2D {
        Affine2D::translation(0.0, 30.0).then(&Affine2D::scale(0.9, 0.9))
    }

    fn apply(ctx: &AnimationContext, visible: bool) {
        let alpha = if visible { 1.0 } else { 0.0 };
        ctx.content_overlay_view.set_alpha(alpha);
        ctx.card_view.update(|props| {
            props.alpha = alpha;
            props.transform = if visible {
                Affine2D::IDENTITY
            } else {
                Self::hidden_transform()
            };
        });
    }
}

impl Animator for AlertAnimator {
    fn setup(&self, ctx: &AnimationContext) {
        Self::apply(ctx, !ctx.is_presentation());
    }

    fn animate(&self, ctx: &AnimationContext) {
        Self::apply(ctx, ctx.is_presentation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AnimationPhase;
    use cardstack_core::{EdgeInsets, Point, Size, ViewHandle};

    fn ctx(phase: AnimationPhase, anchor: Anchor) -> AnimationContext {
        AnimationContext::new(
            phase,
            ViewHandle::new(),
            ViewHandle::new(),
            ViewHandle::new(),
            ViewHandle::new(),
            anchor,
            EdgeInsets::new(10.0, 0.0, 34.0, 0.0),
            Size::new(390.0, 200.0),
        )
    }

    #[test]
    fn test_slide_setup_hides_past_anchor_inset() {
        let ctx = ctx(AnimationPhase::Presentation, Anchor::Bottom);
        SlideAnimator.setup(&ctx);

        assert_eq!(ctx.content_overlay_view.alpha(), 0.0);
        assert_eq!(
            ctx.card_view.transform().translation_part(),
            Point::new(0.0, 234.0)
        );

        SlideAnimator.animate(&ctx);
        assert!(ctx.card_view.transform().is_identity());
        assert_eq!(ctx.content_overlay_view.alpha(), 1.0);
    }

    #[test]
    fn test_slide_top_moves_up() {
        let ctx = ctx(AnimationPhase::Dismissal, Anchor::Top);
        SlideAnimator.animate(&ctx);
        assert_eq!(
            ctx.card_view.transform().translation_part(),
            Point::new(0.0, -210.0)
        );
    }

    #[test]
    fn test_fade_dismissal() {
        let ctx = ctx(AnimationPhase::Dismissal, Anchor::Center);
        FadeAnimator.setup(&ctx);
        assert_eq!(ctx.card_view.alpha(), 1.0);
        FadeAnimator.animate(&ctx);
        assert_eq!(ctx.card_view.alpha(), 0.0);
        assert_eq!(ctx.content_overlay_view.alpha(), 0.0);
    }

    #[test]
    fn test_alert_hidden_state() {
        let ctx = ctx(AnimationPhase::Presentation, Anchor::Center);
        AlertAnimator.setup(&ctx);
        let props = ctx.card_view.get();
        assert_eq!(props.alpha, 0.0);
        assert!(props
            .transform
            .approx_eq(&AlertAnimator::hidden_transform(), 1e-6));
    }

    #[test]
    fn test_defaults_and_overrides() {
        let animator = for_kind(AnimatorKind::Fade);
        assert_eq!(animator.duration(), DEFAULT_DURATION);
        assert_eq!(animator.timing_curve(), TimingCurve::spring(0.8, 0.4));

        let slow = WithDuration::new(animator, Duration::from_secs(1));
        assert_eq!(slow.duration(), Duration::from_secs(1));
    }
}
