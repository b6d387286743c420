//! Cardstack Presentation
//!
//! Presents cards (sheets, toasts, notifications, alerts) over a host
//! screen and dismisses them again.
//!
//! # Features
//!
//! - **Coordinators**: one state machine per card covering the enter
//!   animation, swipe tracking, the auto-dismiss timer and dismissal
//! - **Card Manager**: reject, queue, stack or replace policies for cards
//!   presented while another is shown
//! - **Host Seams**: the host supplies its screen, safe area and content
//!   through traits and renders the [`CardSurface`] view handles
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cardstack_core::{presets, EdgeInsets, Point, Size, ViewHandle};
//! use cardstack_present::{
//!     card_manager, Card, CardManagerExt, CardState, CardSurface, PresentationHost,
//!     PresenterConfig,
//! };
//!
//! struct Screen(ViewHandle);
//!
//! impl PresentationHost for Screen {
//!     fn source_view(&self) -> ViewHandle {
//!         self.0.clone()
//!     }
//!     fn insert_surface(&self, _surface: &CardSurface) {}
//!     fn remove_surface(&self, _surface: &CardSurface) {}
//!     fn forward_touch(&self, _location: Point) {}
//! }
//!
//! let manager = card_manager(
//!     Arc::new(Screen(ViewHandle::new())),
//!     Arc::new(EdgeInsets::new(47.0, 0.0, 34.0, 0.0)),
//!     PresenterConfig::default(),
//! );
//!
//! let style = presets::toast(|make| {
//!     make.duration_secs(5.0);
//! });
//! let handle = manager.present(Card::new(Size::new(390.0, 64.0), style)).unwrap();
//!
//! manager.update(0);
//! manager.update(400);
//! assert_eq!(manager.state(handle), Some(CardState::Presented));
//! ```

pub mod config;
pub mod coordinator;
pub mod gesture;
pub mod host;
pub mod layout;
pub mod manager;
pub mod timer;

pub use config::{ConcurrentPresentation, PresenterConfig};
pub use coordinator::{
    card_events, Card, CardHandle, CardState, DismissCompletion, Effect,
    PresentationCoordinator, TapOutcome,
};
pub use gesture::{GestureConfig, PanEvent, PanFrame, PanPhase, PanRegion};
pub use host::{CardContent, CardSurface, PresentationHost, SafeAreaProvider};
pub use layout::CardLayout;
pub use manager::{card_manager, CardManager, CardManagerExt, CardManagerInner};
pub use timer::DismissTimer;
