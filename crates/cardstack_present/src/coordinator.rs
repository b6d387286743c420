//! Presentation Coordinator - lifecycle of one presented card
//!
//! Each presented card is driven by a [`PresentationCoordinator`]: it lays
//! the card out, runs the animator's setup/animate/cleanup passes, tracks
//! swipe gestures and the auto-dismiss timer, and guards the single-shot
//! dismissal path.
//!
//! The coordinator never calls the host or user callbacks directly. Every
//! side effect is appended to an [`Effect`] list, in order, and the manager
//! runs the list once its lock is released.
//!
//! # States
//!
//! ```text
//! Idle ──PRESENT──▶ Presenting ──ANIMATION_DONE──▶ Presented ◀──PAN_RELEASE── Panning
//!                       │                             │  └─────PAN_BEGIN────────▲ │
//!                       │                          DISMISS                        │
//!                       └───────DISMISS──────────▶ Dismissing ◀────DISMISS────────┘
//!                                                     │
//!                                               ANIMATION_DONE
//!                                                     ▼
//!                                                 Dismissed
//! ```

use std::fmt;
use std::sync::Arc;

use cardstack_animation::{
    animator, AnimationContext, AnimationPhase, Animator, PropertyAnimator, RunId, RunOutcome,
    SharedAnimator, WithDuration,
};
use cardstack_core::{
    insets, CardShape, CardStyle, DismissCallback, DismissalReason, EdgeInsets, Interaction,
    LifecycleCallback, Point, Rect, ResolvedInsets, Size, StateTransitions, ViewHandle,
};

use crate::config::PresenterConfig;
use crate::gesture::{self, PanEvent, PanPhase};
use crate::host::{CardContent, CardSurface, PresentationHost};
use crate::layout;
use crate::timer::DismissTimer;

// =============================================================================
// Card Event Types
// =============================================================================

/// Events for the card state machine
pub mod card_events {
    /// Begin presenting (Idle -> Presenting)
    pub const PRESENT: u32 = 30001;
    /// Animation run finished (Presenting -> Presented, Dismissing -> Dismissed)
    pub const ANIMATION_DONE: u32 = 30002;
    /// Begin dismissing
    pub const DISMISS: u32 = 30003;
    /// Swipe started (Presented -> Panning)
    pub const PAN_BEGIN: u32 = 30004;
    /// Swipe released without dismissing (Panning -> Presented)
    pub const PAN_RELEASE: u32 = 30005;
}

// =============================================================================
// CardState
// =============================================================================

/// Lifecycle state of a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CardState {
    /// Created, not yet shown
    #[default]
    Idle,
    /// Inserted, enter animation pending or running
    Presenting,
    /// Fully shown
    Presented,
    /// Following the user's finger
    Panning,
    /// Exit animation running
    Dismissing,
    /// Removed from the host
    Dismissed,
}

impl CardState {
    /// Whether the card's surface is in the host
    pub fn is_visible(&self) -> bool {
        !matches!(self, CardState::Idle | CardState::Dismissed)
    }

    /// Whether dismissal has started or finished
    pub fn is_dismissing(&self) -> bool {
        matches!(self, CardState::Dismissing | CardState::Dismissed)
    }
}

impl StateTransitions for CardState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use card_events::*;
        use CardState::*;

        match (self, event) {
            (Idle, PRESENT) => Some(Presenting),
            (Presenting, ANIMATION_DONE) => Some(Presented),

            (Presented, PAN_BEGIN) => Some(Panning),
            (Panning, PAN_RELEASE) => Some(Presented),

            // Dismissal can interrupt the enter animation and a swipe
            (Presenting, DISMISS) | (Presented, DISMISS) | (Panning, DISMISS) => {
                Some(Dismissing)
            }
            (Dismissing, ANIMATION_DONE) => Some(Dismissed),

            _ => None,
        }
    }
}

// =============================================================================
// CardHandle
// =============================================================================

/// Handle to a presented (or queued) card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardHandle(u64);

impl CardHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Reconstruct a handle from a raw ID
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// Card
// =============================================================================

/// A card ready to present: content, style and an optional custom animator
#[derive(Clone)]
pub struct Card {
    style: Arc<CardStyle>,
    content: Arc<dyn CardContent>,
    animator: Option<SharedAnimator>,
}

impl Card {
    pub fn new(content: impl CardContent + 'static, style: CardStyle) -> Self {
        Self {
            style: Arc::new(style),
            content: Arc::new(content),
            animator: None,
        }
    }

    /// Present with `animator` instead of the style's built-in variant
    pub fn with_animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Arc::new(animator));
        self
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    fn resolve_animator(&self) -> SharedAnimator {
        let base = self
            .animator
            .clone()
            .unwrap_or_else(|| animator::for_kind(self.style.animation.kind));
        match self.style.animation.duration {
            Some(duration) => Arc::new(WithDuration::new(base, duration)),
            None => base,
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("style", &self.style)
            .field("custom_animator", &self.animator.is_some())
            .finish()
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Continuation run after a card's `did_dismiss`
pub type DismissCompletion = Box<dyn FnOnce() + Send>;

/// Deferred side effect of a coordinator operation
pub enum Effect {
    InsertSurface(CardSurface),
    RemoveSurface(CardSurface),
    ForwardTouch(Point),
    WillPresent(LifecycleCallback),
    DidPresent(LifecycleCallback),
    WillDismiss(DismissCallback, DismissalReason),
    DidDismiss(DismissCallback, DismissalReason),
    Completion(DismissCompletion),
}

impl Effect {
    pub fn run(self, host: &dyn PresentationHost) {
        match self {
            Effect::InsertSurface(surface) => host.insert_surface(&surface),
            Effect::RemoveSurface(surface) => host.remove_surface(&surface),
            Effect::ForwardTouch(location) => host.forward_touch(location),
            Effect::WillPresent(callback) | Effect::DidPresent(callback) => callback(),
            Effect::WillDismiss(callback, reason) | Effect::DidDismiss(callback, reason) => {
                callback(reason)
            }
            Effect::Completion(completion) => completion(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::InsertSurface(_) => "insert_surface",
            Effect::RemoveSurface(_) => "remove_surface",
            Effect::ForwardTouch(_) => "forward_touch",
            Effect::WillPresent(_) => "will_present",
            Effect::DidPresent(_) => "did_present",
            Effect::WillDismiss(..) => "will_dismiss",
            Effect::DidDismiss(..) => "did_dismiss",
            Effect::Completion(_) => "completion",
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::WillDismiss(_, reason) | Effect::DidDismiss(_, reason) => {
                f.debug_tuple(self.name()).field(reason).finish()
            }
            Effect::ForwardTouch(location) => f.debug_tuple(self.name()).field(location).finish(),
            _ => f.write_str(self.name()),
        }
    }
}

/// Result of a tap routed to a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapOutcome {
    /// The tap dismissed the card
    Dismissed,
    /// The tap passed through to the presenting screen
    Forwarded,
    /// The overlay swallowed the tap
    Consumed,
    /// The tap landed on the card itself
    Card,
}

// =============================================================================
// PresentationCoordinator
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunKind {
    Present,
    SnapBack,
    Dismiss,
}

/// Drives one card from presentation to removal
pub struct PresentationCoordinator {
    handle: CardHandle,
    style: Arc<CardStyle>,
    content: Arc<dyn CardContent>,
    animator: SharedAnimator,
    config: PresenterConfig,
    source_view: ViewHandle,
    surface: CardSurface,
    insets: ResolvedInsets,
    state: CardState,
    runner: PropertyAnimator,
    active_run: Option<(RunId, RunKind)>,
    /// Enter animation waits for the tick after insertion
    enter_pending: bool,
    is_being_panned: bool,
    is_being_dismissed: bool,
    dismiss_reason: Option<DismissalReason>,
    timer: Option<DismissTimer>,
    completions: Vec<DismissCompletion>,
}

impl PresentationCoordinator {
    pub fn new(
        handle: CardHandle,
        card: Card,
        source_view: ViewHandle,
        config: PresenterConfig,
    ) -> Self {
        let animator = card.resolve_animator();
        let runner = PropertyAnimator::new(animator.duration(), animator.timing_curve());
        let style = card.style;

        let surface = CardSurface {
            handle,
            container: ViewHandle::new(),
            content_overlay: ViewHandle::new(),
            card: ViewHandle::new(),
            content_frame: Rect::ZERO,
            shape: CardShape::new(Rect::ZERO, &style.corners, &style.shadow),
            content_overlay_style: style.content_overlay,
            background: style.background,
            status_bar: style.status_bar,
            hides_home_indicator: style.behavior.hides_home_indicator,
        };

        Self {
            handle,
            style,
            content: card.content,
            animator,
            config,
            source_view,
            surface,
            insets: ResolvedInsets::default(),
            state: CardState::Idle,
            runner,
            active_run: None,
            enter_pending: false,
            is_being_panned: false,
            is_being_dismissed: false,
            dismiss_reason: None,
            timer: None,
            completions: Vec::new(),
        }
    }

    pub fn handle(&self) -> CardHandle {
        self.handle
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn surface(&self) -> &CardSurface {
        &self.surface
    }

    pub fn insets(&self) -> ResolvedInsets {
        self.insets
    }

    pub fn is_being_panned(&self) -> bool {
        self.is_being_panned
    }

    pub fn is_being_dismissed(&self) -> bool {
        self.is_being_dismissed
    }

    /// The armed auto-dismiss timer
    pub fn timer(&self) -> Option<&DismissTimer> {
        self.timer.as_ref()
    }

    /// Whether an animation run is in flight or about to start
    pub fn is_animating(&self) -> bool {
        self.enter_pending || self.runner.is_running()
    }

    fn transition(&mut self, event: u32) -> bool {
        if let Some(new_state) = self.state.on_event(event) {
            tracing::trace!(handle = ?self.handle, from = ?self.state, to = ?new_state, "card transition");
            self.state = new_state;
            true
        } else {
            false
        }
    }

    fn card_size(&self) -> Size {
        self.surface.card.frame().size
    }

    fn context(&self, phase: AnimationPhase) -> AnimationContext {
        AnimationContext::new(
            phase,
            self.source_view.clone(),
            self.surface.container.clone(),
            self.surface.content_overlay.clone(),
            self.surface.card.clone(),
            self.style.anchor,
            self.insets.card,
            self.card_size(),
        )
    }

    fn start_run(
        &mut self,
        kind: RunKind,
        ctx: &AnimationContext,
        now_ms: u64,
        velocity: Option<f32>,
    ) {
        let animator = &self.animator;
        let run = self
            .runner
            .start(&ctx.views(), now_ms, velocity, || animator.animate(ctx));
        self.active_run = Some((run, kind));
    }

    /// Lay out the card, put it in its pre-animation state and insert it.
    /// The enter animation starts on the next [`Self::tick`].
    ///
    /// `safe_area` of `None` (no foreground window) resolves to zero insets.
    pub fn present(
        &mut self,
        container: Rect,
        safe_area: Option<EdgeInsets>,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if !self.transition(card_events::PRESENT) {
            return false;
        }

        let safe_area = safe_area.unwrap_or_else(|| {
            tracing::debug!("Card {:?}: no safe area available, using zero insets", self.handle);
            EdgeInsets::ZERO
        });
        self.insets =
            insets::resolve_with(&self.style, safe_area, self.config.legacy_status_bar_height);
        let layout = layout::layout_card(&self.style, container, &self.insets, self.content.as_ref());

        self.surface.container.set_frame(container);
        self.surface.content_overlay.update(|props| {
            props.frame = container;
            props.interactive = !self.style.overlay_passes_touches();
        });
        self.surface.card.update(|props| {
            props.frame = layout.frame;
            props.corner_radius = self.style.corners.radius;
        });
        self.surface.content_frame = layout.content_frame;
        self.surface.shape = CardShape::new(
            layout.frame.size.to_rect(),
            &self.style.corners,
            &self.style.shadow,
        );

        self.animator.setup(&self.context(AnimationPhase::Presentation));
        effects.push(Effect::InsertSurface(self.surface.clone()));
        if let Some(callback) = &self.style.lifecycle.will_present {
            effects.push(Effect::WillPresent(callback.clone()));
        }
        self.enter_pending = true;

        tracing::debug!(
            "Card {:?} presenting: anchor={:?} frame={:?}",
            self.handle,
            self.style.anchor,
            layout.frame
        );
        true
    }

    /// Advance animations and the auto-dismiss timer
    pub fn tick(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        if self.enter_pending && self.state == CardState::Presenting {
            self.enter_pending = false;
            let ctx = self.context(AnimationPhase::Presentation);
            self.start_run(RunKind::Present, &ctx, now_ms, None);
        }

        for event in self.runner.tick(now_ms) {
            match self.active_run {
                Some((run, kind)) if run == event.run && event.outcome == RunOutcome::Finished => {
                    self.active_run = None;
                    self.finish_run(kind, now_ms, effects);
                }
                _ => tracing::trace!(handle = ?self.handle, ?event, "animation run superseded"),
            }
        }

        self.poll_timer(now_ms, effects);
    }

    fn finish_run(&mut self, kind: RunKind, now_ms: u64, effects: &mut Vec<Effect>) {
        match kind {
            RunKind::Present => {
                self.animator
                    .cleanup(&self.context(AnimationPhase::Presentation));
                self.transition(card_events::ANIMATION_DONE);
                if let Some(interval) = self.style.duration.as_duration() {
                    self.timer = Some(DismissTimer::new(interval, now_ms));
                }
                if let Some(callback) = &self.style.lifecycle.did_present {
                    effects.push(Effect::DidPresent(callback.clone()));
                }
                tracing::debug!("Card {:?} presented", self.handle);
            }
            RunKind::SnapBack => {
                self.animator
                    .cleanup(&self.context(AnimationPhase::Presentation));
            }
            RunKind::Dismiss => {
                self.animator.cleanup(&self.context(AnimationPhase::Dismissal));
                self.transition(card_events::ANIMATION_DONE);
                effects.push(Effect::RemoveSurface(self.surface.clone()));

                let reason = self.dismiss_reason.unwrap_or_default();
                if let Some(callback) = &self.style.lifecycle.did_dismiss {
                    effects.push(Effect::DidDismiss(callback.clone(), reason));
                }
                effects.extend(self.completions.drain(..).map(Effect::Completion));
                tracing::debug!("Card {:?} dismissed: {:?}", self.handle, reason);
            }
        }
    }

    fn poll_timer(&mut self, now_ms: u64, effects: &mut Vec<Effect>) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if !timer.poll(now_ms) {
            return;
        }
        if self.is_being_panned {
            tracing::trace!(handle = ?self.handle, "auto-dismiss skipped while panning");
            return;
        }

        self.timer = None;
        self.dismiss(DismissalReason::Default, None, now_ms, None, effects);
    }

    /// Dismiss the card. Returns `false`, doing nothing else, if the card is
    /// already dismissing or was never presented; `completion` then runs
    /// once the pending dismissal finishes, or right away.
    ///
    /// `velocity` is the spring's initial velocity, relative to the
    /// remaining distance.
    pub fn dismiss(
        &mut self,
        reason: DismissalReason,
        velocity: Option<f32>,
        now_ms: u64,
        completion: Option<DismissCompletion>,
        effects: &mut Vec<Effect>,
    ) -> bool {
        if self.is_being_dismissed || !self.transition(card_events::DISMISS) {
            if let Some(completion) = completion {
                if self.state == CardState::Dismissing {
                    self.completions.push(completion);
                } else {
                    effects.push(Effect::Completion(completion));
                }
            }
            tracing::debug!(
                "Card {:?}: dismiss ignored in state {:?}",
                self.handle,
                self.state
            );
            return false;
        }

        self.is_being_dismissed = true;
        self.is_being_panned = false;
        self.enter_pending = false;
        self.timer = None;
        self.dismiss_reason = Some(reason);
        self.completions.extend(completion);

        if let Some(callback) = &self.style.lifecycle.will_dismiss {
            effects.push(Effect::WillDismiss(callback.clone(), reason));
        }

        let ctx = self.context(AnimationPhase::Dismissal);
        self.start_run(RunKind::Dismiss, &ctx, now_ms, velocity);

        tracing::debug!("Card {:?} dismissing: {:?}", self.handle, reason);
        true
    }

    /// Feed a swipe sample
    pub fn handle_pan(&mut self, event: PanEvent, now_ms: u64, effects: &mut Vec<Effect>) {
        if !self.style.behavior.swipe_to_dismiss {
            return;
        }

        match event.phase {
            PanPhase::Began => {
                if self.transition(card_events::PAN_BEGIN) {
                    self.is_being_panned = true;
                    // The finger owns the card; drop any snap-back in flight
                    if self.runner.stop().is_some() {
                        self.active_run = None;
                    }
                }
            }
            PanPhase::Changed => {
                if self.state != CardState::Panning {
                    return;
                }
                let frame = gesture::pan_frame(
                    self.style.anchor,
                    self.card_size(),
                    event.translation,
                    &self.config.gesture,
                );
                self.surface.card.set_transform(frame.card_transform);
                if let Some(alpha) = frame.overlay_alpha {
                    self.surface.content_overlay.set_alpha(alpha);
                }
                tracing::trace!(handle = ?self.handle, region = ?frame.region, progress = frame.progress, "pan");
            }
            PanPhase::Ended | PanPhase::Cancelled | PanPhase::Failed => {
                if self.state != CardState::Panning {
                    return;
                }
                self.is_being_panned = false;
                self.release(event, now_ms, effects);
            }
        }
    }

    fn release(&mut self, event: PanEvent, now_ms: u64, effects: &mut Vec<Effect>) {
        let anchor = self.style.anchor;
        let size = self.card_size();
        let offset = gesture::dismiss_component(
            anchor,
            self.surface.card.transform().translation_part(),
        );
        let speed = gesture::dismiss_component(anchor, event.velocity);

        if gesture::should_dismiss(
            anchor,
            size,
            event.translation,
            event.velocity,
            &self.config.gesture,
        ) {
            let velocity = anchor.edge().and_then(|edge| {
                let hidden = gesture::extent(anchor, size) + self.insets.card.get(edge);
                gesture::relative_velocity(speed, hidden - offset)
            });
            self.dismiss(
                DismissalReason::Interactive(Interaction::Swipe),
                velocity,
                now_ms,
                None,
                effects,
            );
        } else {
            self.transition(card_events::PAN_RELEASE);
            let velocity = anchor
                .edge()
                .and_then(|_| gesture::relative_velocity(-speed, offset));
            let ctx = self.context(AnimationPhase::Presentation);
            self.start_run(RunKind::SnapBack, &ctx, now_ms, velocity);
        }
    }

    /// Card frame as currently displayed, including any drag offset
    pub fn displayed_frame(&self) -> Rect {
        let props = self.surface.card.get();
        let offset = props.transform.translation_part();
        props.frame.offset(offset.x, offset.y)
    }

    /// Route a tap at `location` (container coordinates)
    pub fn handle_tap(
        &mut self,
        location: Point,
        now_ms: u64,
        effects: &mut Vec<Effect>,
    ) -> TapOutcome {
        if self.displayed_frame().contains(location) {
            return TapOutcome::Card;
        }

        let behavior = self.style.behavior;
        if behavior.content_overlay_tap_to_dismiss {
            let reason = DismissalReason::Interactive(Interaction::BackgroundTap);
            if self.dismiss(reason, None, now_ms, None, effects) {
                TapOutcome::Dismissed
            } else {
                TapOutcome::Consumed
            }
        } else if behavior.content_overlay_touch_through {
            effects.push(Effect::ForwardTouch(location));
            TapOutcome::Forwarded
        } else {
            TapOutcome::Consumed
        }
    }
}

impl fmt::Debug for PresentationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationCoordinator")
            .field("handle", &self.handle)
            .field("state", &self.state)
            .field("is_being_panned", &self.is_being_panned)
            .field("is_being_dismissed", &self.is_being_dismissed)
            .finish()
    }
}
