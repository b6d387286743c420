//! Animatable view properties
//!
//! The presentation stack never draws. Each surface it manages (container,
//! content overlay, card, and the host's source view) is a [`ViewHandle`]
//! over a small set of properties that the host backend reads when it
//! composites a frame.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::{Affine2D, Rect};

/// Properties of one surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewProps {
    /// Opacity (0.0 = fully transparent)
    pub alpha: f32,
    /// Transform applied around the view's frame
    pub transform: Affine2D,
    /// Layout frame in container coordinates
    pub frame: Rect,
    /// Whether the view consumes touches. Non-interactive views let touches
    /// fall through to whatever is beneath them.
    pub interactive: bool,
    /// Corner radius applied to the view's own layer
    pub corner_radius: f32,
}

impl Default for ViewProps {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            transform: Affine2D::IDENTITY,
            frame: Rect::ZERO,
            interactive: true,
            corner_radius: 0.0,
        }
    }
}

impl ViewProps {
    /// The animatable subset of the properties
    pub fn animatable(&self) -> AnimatableProps {
        AnimatableProps {
            alpha: self.alpha,
            transform: self.transform,
            corner_radius: self.corner_radius,
        }
    }

    /// Overwrite the animatable subset, leaving layout untouched
    pub fn apply(&mut self, props: AnimatableProps) {
        self.alpha = props.alpha;
        self.transform = props.transform;
        self.corner_radius = props.corner_radius;
    }
}

/// The properties an animation runner interpolates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatableProps {
    pub alpha: f32,
    pub transform: Affine2D,
    pub corner_radius: f32,
}

impl AnimatableProps {
    /// Linear interpolation of every property
    pub fn lerp(a: &AnimatableProps, b: &AnimatableProps, t: f32) -> AnimatableProps {
        AnimatableProps {
            alpha: a.alpha + (b.alpha - a.alpha) * t,
            transform: Affine2D::lerp(&a.transform, &b.transform, t),
            corner_radius: a.corner_radius + (b.corner_radius - a.corner_radius) * t,
        }
    }
}

/// Shared handle to a surface's properties
#[derive(Clone, Debug, Default)]
pub struct ViewHandle {
    inner: Arc<Mutex<ViewProps>>,
}

impl ViewHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_props(props: ViewProps) -> Self {
        Self {
            inner: Arc::new(Mutex::new(props)),
        }
    }

    /// Copy of the current properties
    pub fn get(&self) -> ViewProps {
        *self.inner.lock()
    }

    /// Mutate the properties in place
    pub fn update<R>(&self, f: impl FnOnce(&mut ViewProps) -> R) -> R {
        let mut props = self.inner.lock();
        f(&mut *props)
    }

    pub fn alpha(&self) -> f32 {
        self.inner.lock().alpha
    }

    pub fn set_alpha(&self, alpha: f32) {
        self.inner.lock().alpha = alpha;
    }

    pub fn transform(&self) -> Affine2D {
        self.inner.lock().transform
    }

    pub fn set_transform(&self, transform: Affine2D) {
        self.inner.lock().transform = transform;
    }

    pub fn frame(&self) -> Rect {
        self.inner.lock().frame
    }

    pub fn set_frame(&self, frame: Rect) {
        self.inner.lock().frame = frame;
    }

    pub fn set_interactive(&self, interactive: bool) {
        self.inner.lock().interactive = interactive;
    }

    /// Whether two handles point at the same surface
    pub fn same_view(&self, other: &ViewHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
