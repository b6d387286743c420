//! Fluent construction of [`CardStyle`] values
//!
//! ```ignore
//! let style = CardStyleBuilder::new()
//!     .anchor(Anchor::Top)
//!     .duration_secs(3.0)
//!     .insets(12.0, &[Edge::Left, Edge::Right])
//!     .build();
//! ```

use std::sync::Arc;
use std::time::Duration;

use crate::color::{BackgroundStyle, StatusBarStyle};
use crate::geometry::Edge;
use crate::style::{
    Anchor, AnimatorKind, CardDuration, CardSize, CardStyle, Corners, CornerStyle,
    DismissalReason, InsetCondition, SafeAreaAvoidance, ShadowStyle,
};

/// Mutable builder producing an immutable [`CardStyle`]
#[derive(Clone, Debug, Default)]
pub struct CardStyleBuilder {
    style: CardStyle,
}

impl CardStyleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing style
    pub fn from_style(style: CardStyle) -> Self {
        Self { style }
    }

    /// Set the anchor. The shadow offset follows the anchor unless a shadow
    /// is set afterwards.
    pub fn anchor(&mut self, anchor: Anchor) -> &mut Self {
        self.style.anchor = anchor;
        if self.style.shadow != ShadowStyle::none() {
            let shadow = ShadowStyle::default_for(anchor);
            self.style.shadow.offset = shadow.offset;
        }
        self
    }

    pub fn animator(&mut self, kind: AnimatorKind) -> &mut Self {
        self.style.animation.kind = kind;
        self
    }

    /// Override the animator's duration
    pub fn animation_duration(&mut self, duration: Duration) -> &mut Self {
        self.style.animation.duration = Some(duration);
        self
    }

    pub fn duration(&mut self, duration: CardDuration) -> &mut Self {
        self.style.duration = duration;
        self
    }

    /// Auto-dismiss after `secs` seconds
    pub fn duration_secs(&mut self, secs: f32) -> &mut Self {
        self.duration(CardDuration::Seconds(secs))
    }

    pub fn size(&mut self, size: CardSize) -> &mut Self {
        self.style.size = size;
        self
    }

    /// Set an unconditional inset on several edges
    pub fn insets(&mut self, value: f32, edges: &[Edge]) -> &mut Self {
        self.style
            .edges
            .set_insets(value, edges, InsetCondition::Always);
        self
    }

    /// Set one edge's inset with an explicit condition
    pub fn inset(&mut self, value: f32, edge: Edge, condition: InsetCondition) -> &mut Self {
        self.style.edges.set_inset(value, edge, condition);
        self
    }

    /// Apply the inset only when `predicate` returns true at layout time
    pub fn inset_when<F>(&mut self, value: f32, edge: Edge, predicate: F) -> &mut Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.inset(value, edge, InsetCondition::Custom(Arc::new(predicate)))
    }

    pub fn safe_area_avoidance(
        &mut self,
        avoidance: SafeAreaAvoidance,
        edges: &[Edge],
    ) -> &mut Self {
        self.style.edges.set_safe_area_avoidance(avoidance, edges);
        self
    }

    pub fn corners(&mut self, corners: Corners, radius: f32) -> &mut Self {
        self.style.corners = CornerStyle {
            rounded_corners: corners,
            radius,
        };
        self
    }

    pub fn shadow(&mut self, shadow: ShadowStyle) -> &mut Self {
        self.style.shadow = shadow;
        self
    }

    pub fn content_overlay(&mut self, overlay: BackgroundStyle) -> &mut Self {
        self.style.content_overlay = overlay;
        self
    }

    pub fn background(&mut self, background: BackgroundStyle) -> &mut Self {
        self.style.background = background;
        self
    }

    pub fn status_bar(&mut self, status_bar: StatusBarStyle) -> &mut Self {
        self.style.status_bar = status_bar;
        self
    }

    pub fn hides_home_indicator(&mut self, hides: bool) -> &mut Self {
        self.style.behavior.hides_home_indicator = hides;
        self
    }

    pub fn swipe_to_dismiss(&mut self, enabled: bool) -> &mut Self {
        self.style.behavior.swipe_to_dismiss = enabled;
        self
    }

    pub fn content_overlay_tap_to_dismiss(&mut self, enabled: bool) -> &mut Self {
        self.style.behavior.content_overlay_tap_to_dismiss = enabled;
        self
    }

    pub fn content_overlay_touch_through(&mut self, enabled: bool) -> &mut Self {
        self.style.behavior.content_overlay_touch_through = enabled;
        self
    }

    pub fn dismisses_current_cards_in_context(&mut self, enabled: bool) -> &mut Self {
        self.style.behavior.dismisses_current_cards_in_context = enabled;
        self
    }

    pub fn on_will_present<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.style.lifecycle.will_present = Some(Arc::new(f));
        self
    }

    pub fn on_did_present<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.style.lifecycle.did_present = Some(Arc::new(f));
        self
    }

    pub fn on_will_dismiss<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(DismissalReason) + Send + Sync + 'static,
    {
        self.style.lifecycle.will_dismiss = Some(Arc::new(f));
        self
    }

    pub fn on_did_dismiss<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(DismissalReason) + Send + Sync + 'static,
    {
        self.style.lifecycle.did_dismiss = Some(Arc::new(f));
        self
    }

    /// Snapshot the builder into a style value
    pub fn build(&self) -> CardStyle {
        self.style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_builder_chains() {
        let style = CardStyleBuilder::new()
            .anchor(Anchor::Top)
            .duration_secs(3.0)
            .insets(12.0, &[Edge::Left, Edge::Right])
            .corners(Corners::ALL, 24.0)
            .build();

        assert_eq!(style.anchor, Anchor::Top);
        assert_eq!(style.duration, CardDuration::Seconds(3.0));
        assert_eq!(style.edges.left.inset, 12.0);
        assert_eq!(style.edges.bottom.inset, 0.0);
        assert_eq!(style.corners.radius, 24.0);
    }

    #[test]
    fn test_anchor_moves_default_shadow() {
        let style = CardStyleBuilder::new().anchor(Anchor::Top).build();
        assert_eq!(style.shadow.offset, Size::new(0.0, 2.0));

        let style = CardStyleBuilder::new()
            .shadow(ShadowStyle::none())
            .anchor(Anchor::Top)
            .build();
        assert_eq!(style.shadow, ShadowStyle::none());
    }

    #[test]
    fn test_callbacks_survive_build() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let style = CardStyleBuilder::new()
            .on_did_dismiss(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        if let Some(cb) = &style.lifecycle.did_dismiss {
            cb(DismissalReason::Default);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
