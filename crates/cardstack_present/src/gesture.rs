//! Pan and tap input, and the pure math that turns a drag into card motion
//!
//! Translations are measured from where the drag began, in container
//! points. Edge anchors only track motion along their dismiss axis; a
//! centered card follows both axes at a tenth of the finger's speed.

use cardstack_core::{Affine2D, Anchor, Point, Size};
use serde::{Deserialize, Serialize};

/// Recognizer phase of a pan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl PanPhase {
    /// Whether the drag is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, PanPhase::Ended | PanPhase::Cancelled | PanPhase::Failed)
    }
}

/// One pan sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Offset from the start of the drag
    pub translation: Point,
    /// Points per second
    pub velocity: Point,
}

impl PanEvent {
    pub fn began() -> Self {
        Self {
            phase: PanPhase::Began,
            translation: Point::ZERO,
            velocity: Point::ZERO,
        }
    }

    pub fn changed(translation: Point) -> Self {
        Self {
            phase: PanPhase::Changed,
            translation,
            velocity: Point::ZERO,
        }
    }

    pub fn ended(translation: Point, velocity: Point) -> Self {
        Self {
            phase: PanPhase::Ended,
            translation,
            velocity,
        }
    }

    pub fn cancelled(translation: Point) -> Self {
        Self {
            phase: PanPhase::Cancelled,
            translation,
            velocity: Point::ZERO,
        }
    }
}

/// Thresholds for swipe-to-dismiss
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Release speed in the dismiss direction that dismisses regardless of
    /// distance (points per second)
    pub velocity_threshold: f32,
    /// Damped distance that dismisses a centered card
    pub center_translation_threshold: f32,
    /// Fraction of the finger's motion a centered card follows
    pub center_pan_damping: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 1000.0,
            center_translation_threshold: 20.0,
            center_pan_damping: 0.1,
        }
    }
}

/// Where a drag sits relative to the card's open and closed positions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanRegion {
    /// Dragged toward or past the open position
    Open,
    /// Between open and fully hidden
    Tracking,
    /// Dragged a full card extent or more
    Closed,
}

/// Visual state for one pan sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanFrame {
    pub region: PanRegion,
    pub card_transform: Affine2D,
    /// `None` leaves the overlay untouched
    pub overlay_alpha: Option<f32>,
    /// 0 at the open position, 1 a full extent away
    pub progress: f32,
}

/// Card extent along the dismiss axis
pub fn extent(anchor: Anchor, card_size: Size) -> f32 {
    if anchor.is_vertical() {
        card_size.height
    } else {
        card_size.width
    }
}

/// Signed component of `vector` along the dismiss direction
pub fn dismiss_component(anchor: Anchor, vector: Point) -> f32 {
    let (dx, dy) = anchor.dismiss_direction();
    vector.x * dx + vector.y * dy
}

/// Translation moving the card `distance` points toward dismissal
pub fn dismiss_offset(anchor: Anchor, distance: f32) -> Affine2D {
    let (dx, dy) = anchor.dismiss_direction();
    Affine2D::translation(dx * distance, dy * distance)
}

fn damped(translation: Point, config: &GestureConfig) -> Point {
    translation.scaled(config.center_pan_damping)
}

/// Card transform and overlay opacity for a drag of `translation`
pub fn pan_frame(
    anchor: Anchor,
    card_size: Size,
    translation: Point,
    config: &GestureConfig,
) -> PanFrame {
    if anchor == Anchor::Center {
        let offset = damped(translation, config);
        return PanFrame {
            region: PanRegion::Tracking,
            card_transform: Affine2D::translation(offset.x, offset.y),
            overlay_alpha: None,
            progress: 0.0,
        };
    }

    let extent = extent(anchor, card_size);
    let distance = dismiss_component(anchor, translation);

    if distance <= 0.0 {
        PanFrame {
            region: PanRegion::Open,
            card_transform: Affine2D::IDENTITY,
            overlay_alpha: Some(1.0),
            progress: 0.0,
        }
    } else if distance < extent {
        let progress = distance / extent;
        PanFrame {
            region: PanRegion::Tracking,
            card_transform: dismiss_offset(anchor, distance),
            overlay_alpha: Some(1.0 - progress),
            progress,
        }
    } else {
        PanFrame {
            region: PanRegion::Closed,
            card_transform: dismiss_offset(anchor, extent),
            overlay_alpha: Some(0.0),
            progress: 1.0,
        }
    }
}

/// Whether a drag released at `translation` with `velocity` dismisses the
/// card
///
/// Edge anchors dismiss once the drag covers half the card's extent or the
/// release speed toward the anchor edge reaches the velocity threshold. A
/// centered card compares the larger absolute component of the damped
/// translation and of the velocity.
pub fn should_dismiss(
    anchor: Anchor,
    card_size: Size,
    translation: Point,
    velocity: Point,
    config: &GestureConfig,
) -> bool {
    if anchor == Anchor::Center {
        let offset = damped(translation, config);
        let max_translation = offset.x.abs().max(offset.y.abs());
        let max_velocity = velocity.x.abs().max(velocity.y.abs());
        return max_translation >= config.center_translation_threshold
            || max_velocity >= config.velocity_threshold;
    }

    let threshold = extent(anchor, card_size) / 2.0;
    dismiss_component(anchor, translation) >= threshold
        || dismiss_component(anchor, velocity) >= config.velocity_threshold
}

/// Spring initial velocity for covering `distance` points when released at
/// `speed` points per second toward the destination
pub fn relative_velocity(speed: f32, distance: f32) -> Option<f32> {
    (distance > 1.0 && speed > 0.0).then(|| speed / distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Size = Size::new(390.0, 300.0);

    #[test]
    fn test_bottom_regions() {
        let config = GestureConfig::default();

        let open = pan_frame(Anchor::Bottom, CARD, Point::new(0.0, -40.0), &config);
        assert_eq!(open.region, PanRegion::Open);
        assert!(open.card_transform.is_identity());
        assert_eq!(open.overlay_alpha, Some(1.0));

        let tracking = pan_frame(Anchor::Bottom, CARD, Point::new(25.0, 120.0), &config);
        assert_eq!(tracking.region, PanRegion::Tracking);
        assert_eq!(
            tracking.card_transform.translation_part(),
            Point::new(0.0, 120.0)
        );
        assert!((tracking.overlay_alpha.unwrap_or_default() - 0.6).abs() < 1e-5);

        let closed = pan_frame(Anchor::Bottom, CARD, Point::new(0.0, 500.0), &config);
        assert_eq!(closed.region, PanRegion::Closed);
        assert_eq!(
            closed.card_transform.translation_part(),
            Point::new(0.0, 300.0)
        );
        assert_eq!(closed.overlay_alpha, Some(0.0));
    }

    #[test]
    fn test_closed_offset_points_toward_anchor_edge() {
        let config = GestureConfig::default();
        let top = pan_frame(Anchor::Top, CARD, Point::new(0.0, -400.0), &config);
        assert_eq!(top.card_transform.translation_part(), Point::new(0.0, -300.0));

        let left = pan_frame(Anchor::Left, CARD, Point::new(-500.0, 0.0), &config);
        assert_eq!(left.card_transform.translation_part(), Point::new(-390.0, 0.0));
    }

    #[test]
    fn test_center_is_damped_without_overlay_change() {
        let frame = pan_frame(
            Anchor::Center,
            CARD,
            Point::new(50.0, -100.0),
            &GestureConfig::default(),
        );
        assert_eq!(frame.card_transform.translation_part(), Point::new(5.0, -10.0));
        assert_eq!(frame.overlay_alpha, None);
    }

    #[test]
    fn test_threshold_symmetry() {
        let config = GestureConfig::default();
        let slow = Point::new(0.0, 999.0);

        assert!(should_dismiss(Anchor::Bottom, CARD, Point::new(0.0, 150.0), Point::ZERO, &config));
        assert!(!should_dismiss(Anchor::Bottom, CARD, Point::new(0.0, 149.0), slow, &config));

        assert!(should_dismiss(Anchor::Top, CARD, Point::new(0.0, -150.0), Point::ZERO, &config));
        assert!(!should_dismiss(Anchor::Top, CARD, Point::new(0.0, -149.0), Point::ZERO, &config));

        assert!(should_dismiss(Anchor::Right, CARD, Point::new(195.0, 0.0), Point::ZERO, &config));
        assert!(!should_dismiss(Anchor::Right, CARD, Point::new(194.0, 0.0), Point::ZERO, &config));
    }

    #[test]
    fn test_velocity_must_point_toward_anchor() {
        let config = GestureConfig::default();
        assert!(should_dismiss(
            Anchor::Bottom,
            CARD,
            Point::new(0.0, 10.0),
            Point::new(0.0, 1000.0),
            &config
        ));
        assert!(!should_dismiss(
            Anchor::Bottom,
            CARD,
            Point::new(0.0, 10.0),
            Point::new(0.0, -2000.0),
            &config
        ));
        assert!(should_dismiss(
            Anchor::Left,
            CARD,
            Point::ZERO,
            Point::new(-1200.0, 0.0),
            &config
        ));
    }

    #[test]
    fn test_center_thresholds() {
        let config = GestureConfig::default();
        assert!(should_dismiss(Anchor::Center, CARD, Point::new(0.0, -200.0), Point::ZERO, &config));
        assert!(!should_dismiss(Anchor::Center, CARD, Point::new(150.0, 150.0), Point::ZERO, &config));
        assert!(should_dismiss(Anchor::Center, CARD, Point::ZERO, Point::new(-1000.0, 0.0), &config));
    }

    #[test]
    fn test_relative_velocity() {
        assert_eq!(relative_velocity(1500.0, 150.0), Some(10.0));
        assert_eq!(relative_velocity(-200.0, 150.0), None);
        assert_eq!(relative_velocity(800.0, 0.5), None);
    }
}
