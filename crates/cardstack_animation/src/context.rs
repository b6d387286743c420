//! Per-pass animation context

use cardstack_core::{Anchor, EdgeInsets, Size, ViewHandle};
use smallvec::SmallVec;

/// Direction of an animation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    Presentation,
    Dismissal,
}

/// Views and geometry handed to an [`crate::Animator`] for one
/// setup/animate/cleanup pass
#[derive(Clone, Debug)]
pub struct AnimationContext {
    pub phase: AnimationPhase,
    /// The screen the card is presented over
    pub source_view: ViewHandle,
    pub container_view: ViewHandle,
    pub content_overlay_view: ViewHandle,
    pub card_view: ViewHandle,
    pub anchor: Anchor,
    /// Resolved card-frame insets
    pub insets: EdgeInsets,
    /// Laid-out card size
    pub card_size: Size,
}

impl AnimationContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        phase: AnimationPhase,
        source_view: ViewHandle,
        container_view: ViewHandle,
        content_overlay_view: ViewHandle,
        card_view: ViewHandle,
        anchor: Anchor,
        insets: EdgeInsets,
        card_size: Size,
    ) -> Self {
        Self {
            phase,
            source_view,
            container_view,
            content_overlay_view,
            card_view,
            anchor,
            insets,
            card_size,
        }
    }

    pub fn is_presentation(&self) -> bool {
        self.phase == AnimationPhase::Presentation
    }

    /// The same views and geometry for another phase
    pub fn with_phase(&self, phase: AnimationPhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    /// Every view an animator may touch
    pub fn views(&self) -> SmallVec<[ViewHandle; 4]> {
        SmallVec::from_buf([
            self.source_view.clone(),
            self.container_view.clone(),
            self.content_overlay_view.clone(),
            self.card_view.clone(),
        ])
    }
}
