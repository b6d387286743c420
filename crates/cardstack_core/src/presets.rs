//! Named card styles
//!
//! Every preset starts from [`base`], applies its own settings, then hands
//! the builder to the caller's closure for further overrides.
//!
//! ```ignore
//! let style = presets::toast(|make| {
//!     make.duration_secs(5.0);
//! });
//! ```

use crate::builder::CardStyleBuilder;
use crate::geometry::Edge;
use crate::style::{
    Anchor, AnimatorKind, CardStyle, Corners, SafeAreaAvoidance, ShadowStyle,
};

/// The default style: a bottom sheet with no auto-dismiss
pub fn base() -> CardStyle {
    CardStyle::default()
}

fn apply(
    preset: impl FnOnce(&mut CardStyleBuilder),
    overrides: impl FnOnce(&mut CardStyleBuilder),
) -> CardStyle {
    let mut builder = CardStyleBuilder::from_style(base());
    preset(&mut builder);
    overrides(&mut builder);
    builder.build()
}

/// [`base`] with caller overrides
pub fn default(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(|_| {}, overrides)
}

/// Floating bottom sheet inset from the screen edges
pub fn system(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(
        |make| {
            make.anchor(Anchor::Bottom)
                .hides_home_indicator(true)
                .corners(Corners::ALL, 44.0)
                .shadow(ShadowStyle::default_for(Anchor::Bottom))
                .insets(6.0, &Edge::ALL)
                .safe_area_avoidance(SafeAreaAvoidance::None, &Edge::ALL);
        },
        overrides,
    )
}

/// Banner dropping in from the top, dismissed after 3 seconds
pub fn notification(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(
        |make| {
            make.anchor(Anchor::Top)
                .duration_secs(3.0)
                .corners(Corners::ALL, 24.0)
                .shadow(ShadowStyle::default_for(Anchor::Top))
                .insets(12.0, &[Edge::Left, Edge::Right])
                .safe_area_avoidance(SafeAreaAvoidance::Card, &[Edge::Top, Edge::Bottom]);
        },
        overrides,
    )
}

/// Small bottom banner, dismissed after 3 seconds
pub fn toast(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(
        |make| {
            make.anchor(Anchor::Bottom)
                .duration_secs(3.0)
                .corners(Corners::ALL, 16.0)
                .shadow(ShadowStyle::default_for(Anchor::Bottom))
                .insets(12.0, &[Edge::Left, Edge::Right])
                .safe_area_avoidance(SafeAreaAvoidance::Card, &[Edge::Top, Edge::Bottom]);
        },
        overrides,
    )
}

/// Centered dialog
pub fn alert(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(
        |make| {
            let radius = make.build().corners.radius;
            make.anchor(Anchor::Center)
                .animator(AnimatorKind::Alert)
                .corners(Corners::ALL, radius)
                .shadow(ShadowStyle::default_for(Anchor::Center))
                .insets(0.0, &Edge::ALL)
                .safe_area_avoidance(SafeAreaAvoidance::None, &Edge::ALL);
        },
        overrides,
    )
}

/// Edge-to-edge bottom modal whose content pads itself out of the safe area
pub fn full_bleed(overrides: impl FnOnce(&mut CardStyleBuilder)) -> CardStyle {
    apply(
        |make| {
            make.anchor(Anchor::Bottom)
                .corners(Corners::empty(), 0.0)
                .shadow(ShadowStyle::none())
                .insets(0.0, &Edge::ALL)
                .safe_area_avoidance(SafeAreaAvoidance::Content, &Edge::ALL);
        },
        overrides,
    )
}
