//! Seams to the embedding application
//!
//! The host owns the real view hierarchy. The presentation stack tells it
//! which surfaces to show and reads the host's screen, safe area and card
//! content through these traits.

use cardstack_core::{
    BackgroundStyle, CardShape, EdgeInsets, Point, Rect, Size, StatusBarStyle, ViewHandle,
};

use crate::coordinator::CardHandle;

/// The screen cards are presented over
///
/// Methods are called from [`crate::CardManagerExt`] operations after the
/// manager lock is released, except [`PresentationHost::source_view`] and
/// [`PresentationHost::container_bounds`], which must not call back into
/// the manager.
pub trait PresentationHost: Send + Sync {
    /// The presenting screen's root view
    fn source_view(&self) -> ViewHandle;

    /// Area cards are laid out in
    fn container_bounds(&self) -> Rect {
        self.source_view().frame()
    }

    /// Add a card surface on top of the presentation stack, without a
    /// platform transition
    fn insert_surface(&self, surface: &CardSurface);

    /// Remove a card surface
    fn remove_surface(&self, surface: &CardSurface);

    /// Deliver a tap that passed through a card's content overlay to the
    /// presenting screen
    fn forward_touch(&self, location: Point);
}

/// Live safe-area query
pub trait SafeAreaProvider: Send + Sync {
    /// Safe-area insets of the foreground window, `None` when there is no
    /// such window
    fn safe_area(&self) -> Option<EdgeInsets>;
}

impl SafeAreaProvider for EdgeInsets {
    fn safe_area(&self) -> Option<EdgeInsets> {
        Some(*self)
    }
}

impl SafeAreaProvider for Option<EdgeInsets> {
    fn safe_area(&self) -> Option<EdgeInsets> {
        *self
    }
}

/// Host-provided card content
pub trait CardContent: Send + Sync {
    /// Size the content wants within `available`
    fn preferred_size(&self, available: Size) -> Size;
}

/// Content with a fixed size
impl CardContent for Size {
    fn preferred_size(&self, _available: Size) -> Size {
        *self
    }
}

/// Views and render data for one presented card
#[derive(Clone, Debug)]
pub struct CardSurface {
    pub handle: CardHandle,
    /// Full-screen container holding the overlay and the card
    pub container: ViewHandle,
    /// Dimming or blur layer behind the card
    pub content_overlay: ViewHandle,
    pub card: ViewHandle,
    /// Content area in card coordinates
    pub content_frame: Rect,
    /// Outline and shadow geometry in card coordinates
    pub shape: CardShape,
    pub content_overlay_style: BackgroundStyle,
    pub background: BackgroundStyle,
    pub status_bar: StatusBarStyle,
    pub hides_home_indicator: bool,
}
