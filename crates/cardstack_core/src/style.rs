//! Card style data model
//!
//! A [`CardStyle`] is a plain value: anchor, edge rules, corner and shadow
//! styling, auto-dismiss duration, behavior flags and lifecycle hooks. It is
//! built once (see [`crate::builder`] and [`crate::presets`]) and then shared
//! read-only for the lifetime of one presentation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::color::{BackgroundStyle, Color, StatusBarStyle};
use crate::geometry::{Edge, Size};

// =============================================================================
// Anchor
// =============================================================================

/// Edge (or center) a card is pinned to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Top,
    Left,
    #[default]
    Bottom,
    Right,
    Center,
}

impl Anchor {
    /// The screen edge this anchor attaches to, `None` for center
    pub fn edge(&self) -> Option<Edge> {
        match self {
            Anchor::Top => Some(Edge::Top),
            Anchor::Left => Some(Edge::Left),
            Anchor::Bottom => Some(Edge::Bottom),
            Anchor::Right => Some(Edge::Right),
            Anchor::Center => None,
        }
    }

    /// Edges whose rules apply for this anchor. The edge opposite the anchor
    /// is excluded because the card is open-ended on that side; a centered
    /// card is intrinsically sized and uses none.
    pub fn active_edges(&self) -> SmallVec<[Edge; 3]> {
        match self {
            Anchor::Top => smallvec![Edge::Left, Edge::Top, Edge::Right],
            Anchor::Left => smallvec![Edge::Top, Edge::Left, Edge::Bottom],
            Anchor::Bottom => smallvec![Edge::Left, Edge::Bottom, Edge::Right],
            Anchor::Right => smallvec![Edge::Top, Edge::Right, Edge::Bottom],
            Anchor::Center => SmallVec::new(),
        }
    }

    /// Whether the card travels vertically when it is dismissed
    pub fn is_vertical(&self) -> bool {
        matches!(self, Anchor::Top | Anchor::Bottom)
    }

    /// Unit direction a card moves in to leave the screen. Zero for center.
    pub fn dismiss_direction(&self) -> (f32, f32) {
        match self {
            Anchor::Top => (0.0, -1.0),
            Anchor::Left => (-1.0, 0.0),
            Anchor::Bottom => (0.0, 1.0),
            Anchor::Right => (1.0, 0.0),
            Anchor::Center => (0.0, 0.0),
        }
    }
}

// =============================================================================
// Edges
// =============================================================================

/// How an edge absorbs the device's safe-area inset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeAreaAvoidance {
    /// Ignore the safe area on this edge
    #[default]
    None,
    /// Move the card frame in by the safe-area inset
    Card,
    /// Keep the card frame, pad the content inside it
    Content,
}

/// Predicate for [`InsetCondition::Custom`]
pub type InsetPredicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// When an edge's static inset applies
#[derive(Clone, Default)]
pub enum InsetCondition {
    /// Always apply the inset
    #[default]
    Always,
    /// Apply when `(safe_area_inset != 0) == expected`
    SafeArea(bool),
    /// Apply when the edge's safe-area inset equals the legacy status bar
    /// height (20pt)
    LegacyStatusBarSafeArea,
    /// Apply when the predicate returns true at layout time
    Custom(InsetPredicate),
}

impl fmt::Debug for InsetCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::SafeArea(expected) => f.debug_tuple("SafeArea").field(expected).finish(),
            Self::LegacyStatusBarSafeArea => write!(f, "LegacyStatusBarSafeArea"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Rules for one edge
#[derive(Clone, Debug, Default)]
pub struct EdgeStyle {
    pub inset: f32,
    pub safe_area_avoidance: SafeAreaAvoidance,
    pub inset_condition: InsetCondition,
}

/// Rules for all four edges
#[derive(Clone, Debug, Default)]
pub struct CardEdges {
    pub top: EdgeStyle,
    pub left: EdgeStyle,
    pub bottom: EdgeStyle,
    pub right: EdgeStyle,
}

impl CardEdges {
    pub fn get(&self, edge: Edge) -> &EdgeStyle {
        match edge {
            Edge::Top => &self.top,
            Edge::Left => &self.left,
            Edge::Bottom => &self.bottom,
            Edge::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, edge: Edge) -> &mut EdgeStyle {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Left => &mut self.left,
            Edge::Bottom => &mut self.bottom,
            Edge::Right => &mut self.right,
        }
    }

    /// Zero insets, every edge pads its content out of the safe area
    pub fn content_avoiding() -> Self {
        let mut edges = Self::default();
        edges.set_safe_area_avoidance(SafeAreaAvoidance::Content, &Edge::ALL);
        edges
    }

    /// Set one edge's inset and the condition under which it applies
    pub fn set_inset(&mut self, value: f32, edge: Edge, condition: InsetCondition) {
        let style = self.get_mut(edge);
        style.inset = value;
        style.inset_condition = condition;
    }

    /// Set the inset for several edges
    pub fn set_insets(&mut self, value: f32, edges: &[Edge], condition: InsetCondition) {
        for edge in edges {
            self.set_inset(value, *edge, condition.clone());
        }
    }

    /// Set the safe-area avoidance for several edges
    pub fn set_safe_area_avoidance(&mut self, avoidance: SafeAreaAvoidance, edges: &[Edge]) {
        for edge in edges {
            self.get_mut(*edge).safe_area_avoidance = avoidance;
        }
    }

    /// Iterate `(edge, style)` pairs in top, left, bottom, right order
    pub fn iter(&self) -> impl Iterator<Item = (Edge, &EdgeStyle)> {
        Edge::ALL.into_iter().map(move |edge| (edge, self.get(edge)))
    }
}

// =============================================================================
// Corners & Shadow
// =============================================================================

bitflags! {
    /// Set of rounded corners
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_LEFT = 1 << 2;
        const BOTTOM_RIGHT = 1 << 3;

        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits();
    }
}

/// Corner rounding
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerStyle {
    pub rounded_corners: Corners,
    pub radius: f32,
}

impl CornerStyle {
    /// No rounding
    pub fn none() -> Self {
        Self::default()
    }

    /// Top corners rounded with radius 32, the shape of a bottom sheet
    pub fn sheet() -> Self {
        Self {
            rounded_corners: Corners::TOP,
            radius: 32.0,
        }
    }

    /// Round every corner with `radius`
    pub fn all(radius: f32) -> Self {
        Self {
            rounded_corners: Corners::ALL,
            radius,
        }
    }
}

/// Drop shadow drawn around the card
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowStyle {
    pub color: Color,
    pub radius: f32,
    /// Offset, pointing away from the anchor edge
    pub offset: Size,
    pub alpha: f32,
}

impl ShadowStyle {
    /// Black, radius 8, alpha 0.1, offset 2pt away from the anchor edge
    pub fn default_for(anchor: Anchor) -> Self {
        let offset = match anchor {
            Anchor::Top => Size::new(0.0, 2.0),
            Anchor::Left => Size::new(2.0, 0.0),
            Anchor::Bottom => Size::new(0.0, -2.0),
            Anchor::Right => Size::new(-2.0, 0.0),
            Anchor::Center => Size::ZERO,
        };

        Self {
            color: Color::BLACK,
            radius: 8.0,
            offset,
            alpha: 0.1,
        }
    }

    /// An invisible shadow
    pub fn none() -> Self {
        Self {
            color: Color::TRANSPARENT,
            radius: 0.0,
            offset: Size::ZERO,
            alpha: 0.0,
        }
    }
}

// =============================================================================
// Duration & Size
// =============================================================================

/// How long a card stays up before dismissing itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDuration {
    /// Stay until dismissed
    #[default]
    None,
    /// Dismiss after this many seconds
    Seconds(f32),
}

impl CardDuration {
    /// The delay as a `Duration`. `None` for untimed cards and for values
    /// that are negative or not finite.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            CardDuration::None => None,
            CardDuration::Seconds(secs) => Duration::try_from_secs_f32(*secs).ok(),
        }
    }

    /// Whether the value can be scheduled
    pub fn is_valid(&self) -> bool {
        match self {
            CardDuration::None => true,
            CardDuration::Seconds(secs) => secs.is_finite() && *secs >= 0.0,
        }
    }
}

/// How the card's extent is determined
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSize {
    /// Size to the content
    #[default]
    Content,
    /// Fixed extent along the anchor axis (both axes when centered)
    Fixed(f32),
    /// Fixed size. Edge anchors only use the component along their axis.
    FixedSize(Size),
}

// =============================================================================
// Behavior
// =============================================================================

/// Interaction and policy switches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BehaviorFlags {
    /// Tapping the content overlay dismisses the card
    pub content_overlay_tap_to_dismiss: bool,
    /// The card can be swiped away
    pub swipe_to_dismiss: bool,
    /// Touches on the content overlay reach the presenting screen. Ignored
    /// when tap-to-dismiss is enabled.
    pub content_overlay_touch_through: bool,
    /// Presenting this card first dismisses cards already shown in the same
    /// host context
    pub dismisses_current_cards_in_context: bool,
    /// Ask the host to hide the home indicator while presented
    pub hides_home_indicator: bool,
}

impl Default for BehaviorFlags {
    fn default() -> Self {
        Self {
            content_overlay_tap_to_dismiss: true,
            swipe_to_dismiss: true,
            content_overlay_touch_through: false,
            dismisses_current_cards_in_context: true,
            hides_home_indicator: false,
        }
    }
}

/// Built-in animator variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimatorKind {
    /// Slide along the anchor axis, fade the overlay
    #[default]
    Slide,
    /// Cross-fade card and overlay
    Fade,
    /// Fade and grow from a slightly shrunk, lowered card
    Alert,
}

/// Which animator presents the card and how long it runs
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationStyle {
    pub kind: AnimatorKind,
    /// Overrides the animator's default duration
    pub duration: Option<Duration>,
}

// =============================================================================
// Dismissal & Lifecycle
// =============================================================================

/// The user interaction that dismissed a card
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    Swipe,
    BackgroundTap,
}

/// Why a card was dismissed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DismissalReason {
    /// Programmatic or timer-driven dismissal
    #[default]
    Default,
    /// The user dismissed the card
    Interactive(Interaction),
}

/// Hook without arguments
pub type LifecycleCallback = Arc<dyn Fn() + Send + Sync>;

/// Hook receiving the dismissal reason
pub type DismissCallback = Arc<dyn Fn(DismissalReason) + Send + Sync>;

/// Presentation lifecycle hooks. Each fires at most once per presentation.
#[derive(Clone, Default)]
pub struct LifecycleCallbacks {
    pub will_present: Option<LifecycleCallback>,
    pub did_present: Option<LifecycleCallback>,
    pub will_dismiss: Option<DismissCallback>,
    pub did_dismiss: Option<DismissCallback>,
}

impl fmt::Debug for LifecycleCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleCallbacks")
            .field("will_present", &self.will_present.is_some())
            .field("did_present", &self.did_present.is_some())
            .field("will_dismiss", &self.will_dismiss.is_some())
            .field("did_dismiss", &self.did_dismiss.is_some())
            .finish()
    }
}

// =============================================================================
// CardStyle
// =============================================================================

/// Complete configuration of one card presentation
#[derive(Clone, Debug)]
pub struct CardStyle {
    pub anchor: Anchor,
    pub edges: CardEdges,
    pub corners: CornerStyle,
    pub shadow: ShadowStyle,
    pub duration: CardDuration,
    pub size: CardSize,
    pub behavior: BehaviorFlags,
    pub animation: AnimationStyle,
    pub content_overlay: BackgroundStyle,
    pub background: BackgroundStyle,
    pub status_bar: StatusBarStyle,
    pub lifecycle: LifecycleCallbacks,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            anchor: Anchor::Bottom,
            edges: CardEdges::content_avoiding(),
            corners: CornerStyle::sheet(),
            shadow: ShadowStyle::default_for(Anchor::Bottom),
            duration: CardDuration::None,
            size: CardSize::Content,
            behavior: BehaviorFlags::default(),
            animation: AnimationStyle::default(),
            content_overlay: BackgroundStyle::Color(Color::BLACK.with_alpha(0.5)),
            background: BackgroundStyle::Color(Color::WHITE),
            status_bar: StatusBarStyle::Default,
            lifecycle: LifecycleCallbacks::default(),
        }
    }
}

impl CardStyle {
    /// Edge rules that apply for the configured anchor
    pub fn edges_for_anchor(&self) -> impl Iterator<Item = (Edge, &EdgeStyle)> {
        self.anchor
            .active_edges()
            .into_iter()
            .map(move |edge| (edge, self.edges.get(edge)))
    }

    /// Whether taps on the overlay should pass through to the presenting
    /// screen
    pub fn overlay_passes_touches(&self) -> bool {
        !self.behavior.content_overlay_tap_to_dismiss
            && self.behavior.content_overlay_touch_through
    }
}
