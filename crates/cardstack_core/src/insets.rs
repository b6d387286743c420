//! Inset resolution
//!
//! Maps a [`CardStyle`] and the current safe-area snapshot to the insets of
//! the card frame and of the content inside it. Pure: the same inputs always
//! produce the same output.

use smallvec::SmallVec;

use crate::geometry::{Edge, EdgeInsets};
use crate::style::{Anchor, CardStyle, EdgeStyle, InsetCondition, SafeAreaAvoidance};

/// Height of the status bar on devices without a notch
pub const LEGACY_STATUS_BAR_HEIGHT: f32 = 20.0;

/// Output of [`resolve`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedInsets {
    /// Insets of the card frame within its container
    pub card: EdgeInsets,
    /// Padding applied inside the card around its content
    pub content: EdgeInsets,
}

/// Edges whose safe-area rules apply for `anchor`
pub fn active_edges(anchor: Anchor) -> SmallVec<[Edge; 3]> {
    anchor.active_edges()
}

/// Resolve insets using the default legacy status bar height
pub fn resolve(style: &CardStyle, safe_area: EdgeInsets) -> ResolvedInsets {
    resolve_with(style, safe_area, LEGACY_STATUS_BAR_HEIGHT)
}

/// Resolve insets, matching [`InsetCondition::LegacyStatusBarSafeArea`]
/// against `legacy_status_bar_height`
pub fn resolve_with(
    style: &CardStyle,
    safe_area: EdgeInsets,
    legacy_status_bar_height: f32,
) -> ResolvedInsets {
    let mut card = EdgeInsets::ZERO;
    for (edge, rule) in style.edges.iter() {
        if condition_holds(rule, safe_area.get(edge), legacy_status_bar_height) {
            card.set(edge, rule.inset);
        }
    }

    let mut content = EdgeInsets::ZERO;
    for (edge, rule) in style.edges_for_anchor() {
        let safe = safe_area.get(edge);
        match rule.safe_area_avoidance {
            SafeAreaAvoidance::Card => card.add(edge, safe),
            SafeAreaAvoidance::Content => content.add(edge, safe),
            SafeAreaAvoidance::None => {}
        }
    }

    ResolvedInsets { card, content }
}

fn condition_holds(rule: &EdgeStyle, safe_inset: f32, legacy_status_bar_height: f32) -> bool {
    match &rule.inset_condition {
        InsetCondition::Always => true,
        InsetCondition::SafeArea(expected) => (safe_inset != 0.0) == *expected,
        InsetCondition::LegacyStatusBarSafeArea => safe_inset == legacy_status_bar_height,
        InsetCondition::Custom(predicate) => predicate(),
    }
}
