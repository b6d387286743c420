//! Cardstack Core
//!
//! Foundational types for card presentation:
//!
//! - **Geometry**: points, sizes, rects, per-edge insets and affine transforms
//! - **Views**: shared, lockable property handles the host renders from
//! - **Styles**: the immutable [`CardStyle`] value, its builder and presets
//! - **Insets**: resolution of edge rules against the current safe area
//! - **Shape**: rounded outline and shadow mask geometry
//! - **State Machines**: the [`StateTransitions`] trait
//!
//! # Example
//!
//! ```rust
//! use cardstack_core::{insets, presets, EdgeInsets};
//!
//! let style = presets::toast(|make| {
//!     make.duration_secs(5.0);
//! });
//!
//! let resolved = insets::resolve(&style, EdgeInsets::new(47.0, 0.0, 34.0, 0.0));
//! assert_eq!(resolved.card.bottom, 34.0);
//! assert_eq!(resolved.card.left, 12.0);
//! ```

pub mod builder;
pub mod color;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod insets;
pub mod presets;
pub mod shape;
pub mod style;
pub mod view;

pub use builder::CardStyleBuilder;
pub use color::{BackgroundStyle, BlurStyle, Color, StatusBarStyle};
pub use error::{CardError, Result};
pub use fsm::StateTransitions;
pub use geometry::{Affine2D, Edge, EdgeInsets, Point, Rect, Size};
pub use insets::{ResolvedInsets, LEGACY_STATUS_BAR_HEIGHT};
pub use shape::{CardShape, CornerRadius};
pub use style::{
    Anchor, AnimationStyle, AnimatorKind, BehaviorFlags, CardDuration, CardEdges, CardSize,
    CardStyle, CornerStyle, Corners, DismissCallback, DismissalReason, EdgeStyle,
    InsetCondition, InsetPredicate, Interaction, LifecycleCallback, LifecycleCallbacks,
    SafeAreaAvoidance, ShadowStyle,
};
pub use view::{AnimatableProps, ViewHandle, ViewProps};
