//! Card outline and shadow geometry
//!
//! Renderers clip the card content to the rounded outline and draw the
//! shadow through an even-odd mask: the outer rect minus the outline, so the
//! shadow never shows through a translucent card.

use crate::geometry::Rect;
use crate::style::{CornerStyle, Corners, ShadowStyle};

/// Per-corner radius (clockwise from top-left)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadius {
    pub const ZERO: CornerRadius = CornerRadius {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Radius for each corner in `corners`, zero elsewhere
    pub fn from_corners(corners: Corners, radius: f32) -> Self {
        let pick = |flag: Corners| if corners.contains(flag) { radius } else { 0.0 };
        Self {
            top_left: pick(Corners::TOP_LEFT),
            top_right: pick(Corners::TOP_RIGHT),
            bottom_right: pick(Corners::BOTTOM_RIGHT),
            bottom_left: pick(Corners::BOTTOM_LEFT),
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Shrink radii so adjacent corners never overlap in `bounds`
    pub fn clamped_to(&self, bounds: Rect) -> Self {
        let max = (bounds.width().min(bounds.height()) / 2.0).max(0.0);
        Self {
            top_left: self.top_left.min(max),
            top_right: self.top_right.min(max),
            bottom_right: self.bottom_right.min(max),
            bottom_left: self.bottom_left.min(max),
        }
    }
}

/// Outline, clip and shadow geometry of a card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardShape {
    /// Card bounds in its own coordinate space
    pub bounds: Rect,
    /// Radii of the rounded outline, also used as the content clip
    pub radii: CornerRadius,
    /// Outer rect of the shadow mask
    pub shadow_mask: Rect,
    pub shadow: ShadowStyle,
}

impl CardShape {
    pub fn new(bounds: Rect, corners: &CornerStyle, shadow: &ShadowStyle) -> Self {
        let radii = CornerRadius::from_corners(corners.rounded_corners, corners.radius)
            .clamped_to(bounds);
        let outset = Self::shadow_outset(shadow);

        Self {
            bounds,
            radii,
            shadow_mask: bounds.outset(outset, outset),
            shadow: *shadow,
        }
    }

    /// Distance the shadow mask extends past the card on every side
    pub fn shadow_outset(shadow: &ShadowStyle) -> f32 {
        shadow.radius * 2.0 + shadow.offset.width.max(shadow.offset.height)
    }

    /// Whether a shadow needs to be drawn at all
    pub fn has_shadow(&self) -> bool {
        self.shadow.alpha > 0.0 && self.shadow.color.a > 0.0
    }
}
