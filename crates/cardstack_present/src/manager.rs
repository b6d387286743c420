//! Card Manager - presentation stack for one host context
//!
//! Owns every coordinator presented in a host, applies the concurrent
//! presentation policy and routes input to the topmost card.
//!
//! Host calls and lifecycle callbacks are collected while the manager lock
//! is held and run in order after it is released, so a callback may call
//! back into the manager.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cardstack_core::{CardDuration, CardError, DismissalReason, Point, Result};
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::config::{ConcurrentPresentation, PresenterConfig};
use crate::coordinator::{
    Card, CardHandle, CardState, DismissCompletion, Effect, PresentationCoordinator, TapOutcome,
};
use crate::gesture::PanEvent;
use crate::host::{CardSurface, PresentationHost, SafeAreaProvider};

/// A card waiting for the host to become free
struct QueuedCard {
    handle: CardHandle,
    card: Card,
}

// =============================================================================
// CardManagerInner
// =============================================================================

/// Inner state of the card manager
pub struct CardManagerInner {
    host: Arc<dyn PresentationHost>,
    safe_area: Arc<dyn SafeAreaProvider>,
    config: PresenterConfig,
    /// Presented cards, bottom to top
    cards: IndexMap<CardHandle, PresentationCoordinator>,
    /// Cards waiting to be presented, oldest first
    queue: VecDeque<QueuedCard>,
    next_id: AtomicU64,
    /// Current time in milliseconds (set by update())
    current_time_ms: u64,
}

impl CardManagerInner {
    pub fn new(
        host: Arc<dyn PresentationHost>,
        safe_area: Arc<dyn SafeAreaProvider>,
        config: PresenterConfig,
    ) -> Self {
        Self {
            host,
            safe_area,
            config,
            cards: IndexMap::new(),
            queue: VecDeque::new(),
            next_id: AtomicU64::new(1),
            current_time_ms: 0,
        }
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn host(&self) -> Arc<dyn PresentationHost> {
        Arc::clone(&self.host)
    }

    /// Whether any card's surface is in the host
    pub fn has_visible_cards(&self) -> bool {
        self.cards.values().any(|card| card.state().is_visible())
    }

    /// Number of presented cards, including ones still dismissing
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards waiting to be presented
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// State of a card. Queued cards report [`CardState::Idle`].
    pub fn state(&self, handle: CardHandle) -> Option<CardState> {
        if let Some(card) = self.cards.get(&handle) {
            return Some(card.state());
        }
        self.queue
            .iter()
            .any(|queued| queued.handle == handle)
            .then_some(CardState::Idle)
    }

    pub fn surface(&self, handle: CardHandle) -> Option<&CardSurface> {
        self.cards.get(&handle).map(PresentationCoordinator::surface)
    }

    pub fn coordinator(&self, handle: CardHandle) -> Option<&PresentationCoordinator> {
        self.cards.get(&handle)
    }

    /// Present `card`, or queue it, according to its style and the
    /// concurrent presentation policy
    pub fn present(&mut self, card: Card, effects: &mut Vec<Effect>) -> Result<CardHandle> {
        if let CardDuration::Seconds(secs) = card.style().duration {
            if !card.style().duration.is_valid() {
                return Err(CardError::InvalidDuration(secs));
            }
        }

        let busy = self.has_visible_cards() || !self.queue.is_empty();
        if !busy {
            let handle = self.next_handle();
            self.start(handle, card, effects);
            return Ok(handle);
        }

        if card.style().behavior.dismisses_current_cards_in_context {
            let handle = self.next_handle();
            self.dismiss_visible(effects);
            if !self.queue.is_empty() {
                tracing::debug!(
                    "Card {:?} replaces {} queued card(s)",
                    handle,
                    self.queue.len()
                );
                self.queue.clear();
            }
            self.queue.push_back(QueuedCard { handle, card });
            tracing::debug!("Card {:?} queued to replace current cards", handle);
            return Ok(handle);
        }

        match self.config.concurrent_presentation {
            ConcurrentPresentation::Reject => Err(CardError::AlreadyPresenting),
            ConcurrentPresentation::Queue => {
                let handle = self.next_handle();
                self.queue.push_back(QueuedCard { handle, card });
                tracing::debug!(
                    "Card {:?} queued behind {} card(s)",
                    handle,
                    self.cards.len() + self.queue.len() - 1
                );
                Ok(handle)
            }
            ConcurrentPresentation::Stack => {
                let handle = self.next_handle();
                self.start(handle, card, effects);
                Ok(handle)
            }
        }
    }

    fn next_handle(&self) -> CardHandle {
        CardHandle::new(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    fn start(&mut self, handle: CardHandle, card: Card, effects: &mut Vec<Effect>) {
        let mut coordinator =
            PresentationCoordinator::new(handle, card, self.host.source_view(), self.config);
        coordinator.present(
            self.host.container_bounds(),
            self.safe_area.safe_area(),
            effects,
        );
        self.cards.insert(handle, coordinator);
        tracing::debug!(
            "CardManager::start - now have {} card(s)",
            self.cards.len()
        );
    }

    fn dismiss_visible(&mut self, effects: &mut Vec<Effect>) {
        let now = self.current_time_ms;
        for card in self.cards.values_mut() {
            if card.state().is_visible() && !card.is_being_dismissed() {
                card.dismiss(DismissalReason::Default, None, now, None, effects);
            }
        }
    }

    /// Topmost card whose surface is in the host
    fn topmost_visible(&mut self) -> Option<&mut PresentationCoordinator> {
        self.cards
            .values_mut()
            .rev()
            .find(|card| card.state().is_visible())
    }

    /// Dismiss a card. `completion` runs after its `did_dismiss`, right away
    /// for a card that never left the queue.
    pub fn dismiss(
        &mut self,
        handle: CardHandle,
        completion: Option<DismissCompletion>,
        effects: &mut Vec<Effect>,
    ) -> Result<()> {
        if let Some(card) = self.cards.get_mut(&handle) {
            card.dismiss(
                DismissalReason::Default,
                None,
                self.current_time_ms,
                completion,
                effects,
            );
            return Ok(());
        }

        let index = self
            .queue
            .iter()
            .position(|queued| queued.handle == handle)
            .ok_or(CardError::UnknownCard(handle.id()))?;
        self.queue.remove(index);
        effects.extend(completion.map(Effect::Completion));
        tracing::debug!("Card {:?} removed from queue", handle);
        Ok(())
    }

    /// Dismiss the topmost card not already dismissing
    pub fn dismiss_top(&mut self, effects: &mut Vec<Effect>) -> Option<CardHandle> {
        let now = self.current_time_ms;
        let card = self
            .cards
            .values_mut()
            .rev()
            .find(|card| card.state().is_visible() && !card.is_being_dismissed())?;
        card.dismiss(DismissalReason::Default, None, now, None, effects);
        Some(card.handle())
    }

    /// Dismiss every card and drop the queue
    pub fn dismiss_all(&mut self, effects: &mut Vec<Effect>) {
        if !self.queue.is_empty() {
            tracing::debug!("CardManager::dismiss_all - dropping {} queued card(s)", self.queue.len());
            self.queue.clear();
        }
        self.dismiss_visible(effects);
    }

    /// Advance every card - call this every frame
    ///
    /// This handles:
    /// - Starting deferred enter animations
    /// - Finishing animation runs and firing their callbacks
    /// - Auto-dismissing cards whose timer fired
    /// - Removing dismissed cards
    /// - Presenting the next queued card once the host is free
    pub fn update(&mut self, current_time_ms: u64, effects: &mut Vec<Effect>) {
        self.current_time_ms = current_time_ms;

        for card in self.cards.values_mut() {
            card.tick(current_time_ms, effects);
        }

        let count_before = self.cards.len();
        self.cards.retain(|_, card| card.state() != CardState::Dismissed);
        if self.cards.len() != count_before {
            tracing::debug!(
                "CardManager::update - removed {} card(s), {} left",
                count_before - self.cards.len(),
                self.cards.len()
            );
        }

        // A replacing card waits for whatever got stacked after it was queued
        let replaces_current = self
            .queue
            .front()
            .is_some_and(|next| next.card.style().behavior.dismisses_current_cards_in_context);
        if replaces_current {
            self.dismiss_visible(effects);
        }

        if !self.has_visible_cards() {
            if let Some(next) = self.queue.pop_front() {
                tracing::debug!("Card {:?} leaving queue", next.handle);
                self.start(next.handle, next.card, effects);
            }
        }
    }

    /// Feed a pan sample to a card. Only the topmost visible card tracks
    /// pans; samples for cards beneath it are dropped.
    pub fn handle_pan(
        &mut self,
        handle: CardHandle,
        event: PanEvent,
        effects: &mut Vec<Effect>,
    ) -> Result<()> {
        if !self.cards.contains_key(&handle) {
            return Err(CardError::UnknownCard(handle.id()));
        }

        let now = self.current_time_ms;
        match self.topmost_visible() {
            Some(card) if card.handle() == handle => card.handle_pan(event, now, effects),
            _ => tracing::trace!(?handle, "pan ignored for covered card"),
        }
        Ok(())
    }

    /// Route a tap to the topmost card, or to the host when none is shown
    pub fn handle_tap(&mut self, location: Point, effects: &mut Vec<Effect>) -> TapOutcome {
        let now = self.current_time_ms;
        match self.topmost_visible() {
            Some(card) => card.handle_tap(location, now, effects),
            None => {
                effects.push(Effect::ForwardTouch(location));
                TapOutcome::Forwarded
            }
        }
    }
}

// =============================================================================
// CardManager
// =============================================================================

/// Thread-safe card manager
pub type CardManager = Arc<Mutex<CardManagerInner>>;

/// Create a card manager for one host context
pub fn card_manager(
    host: Arc<dyn PresentationHost>,
    safe_area: Arc<dyn SafeAreaProvider>,
    config: PresenterConfig,
) -> CardManager {
    Arc::new(Mutex::new(CardManagerInner::new(host, safe_area, config)))
}

/// Run `f` under the lock, then run its effects against the host
fn with_effects<R>(
    manager: &CardManager,
    f: impl FnOnce(&mut CardManagerInner, &mut Vec<Effect>) -> R,
) -> R {
    let mut effects = Vec::new();
    let (host, result) = {
        let mut inner = manager.lock();
        let result = f(&mut inner, &mut effects);
        (inner.host(), result)
    };

    for effect in effects {
        effect.run(host.as_ref());
    }
    result
}

// =============================================================================
// Extension Trait
// =============================================================================

/// Locking operations on a [`CardManager`]
pub trait CardManagerExt {
    /// Present a card
    fn present(&self, card: Card) -> Result<CardHandle>;
    /// Dismiss a card
    fn dismiss(&self, handle: CardHandle) -> Result<()>;
    /// Dismiss a card, running `completion` after its `did_dismiss`
    fn dismiss_then<F>(&self, handle: CardHandle, completion: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;
    /// Dismiss the topmost card
    fn dismiss_top(&self) -> Option<CardHandle>;
    /// Dismiss every card and drop the queue
    fn dismiss_all(&self);
    /// Advance animations and timers - call every frame
    fn update(&self, current_time_ms: u64);
    /// Feed a pan sample to a card; covered cards ignore it
    fn handle_pan(&self, handle: CardHandle, event: PanEvent) -> Result<()>;
    /// Route a tap to the topmost card
    fn handle_tap(&self, location: Point) -> TapOutcome;
    /// State of a presented or queued card
    fn state(&self, handle: CardHandle) -> Option<CardState>;
    /// Surface of a presented card
    fn surface(&self, handle: CardHandle) -> Option<CardSurface>;
    /// Number of presented cards
    fn card_count(&self) -> usize;
    /// Check if any card is visible
    fn has_visible_cards(&self) -> bool;
}

impl CardManagerExt for CardManager {
    fn present(&self, card: Card) -> Result<CardHandle> {
        with_effects(self, |inner, effects| inner.present(card, effects))
    }

    fn dismiss(&self, handle: CardHandle) -> Result<()> {
        with_effects(self, |inner, effects| inner.dismiss(handle, None, effects))
    }

    fn dismiss_then<F>(&self, handle: CardHandle, completion: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        with_effects(self, |inner, effects| {
            inner.dismiss(handle, Some(Box::new(completion)), effects)
        })
    }

    fn dismiss_top(&self) -> Option<CardHandle> {
        with_effects(self, |inner, effects| inner.dismiss_top(effects))
    }

    fn dismiss_all(&self) {
        with_effects(self, |inner, effects| inner.dismiss_all(effects));
    }

    fn update(&self, current_time_ms: u64) {
        with_effects(self, |inner, effects| inner.update(current_time_ms, effects));
    }

    fn handle_pan(&self, handle: CardHandle, event: PanEvent) -> Result<()> {
        with_effects(self, |inner, effects| inner.handle_pan(handle, event, effects))
    }

    fn handle_tap(&self, location: Point) -> TapOutcome {
        with_effects(self, |inner, effects| inner.handle_tap(location, effects))
    }

    fn state(&self, handle: CardHandle) -> Option<CardState> {
        self.lock().state(handle)
    }

    fn surface(&self, handle: CardHandle) -> Option<CardSurface> {
        self.lock().surface(handle).cloned()
    }

    fn card_count(&self) -> usize {
        self.lock().card_count()
    }

    fn has_visible_cards(&self) -> bool {
        self.lock().has_visible_cards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardstack_core::{presets, CardStyle, EdgeInsets, Rect, Size, ViewHandle, ViewProps};
    use std::sync::atomic::AtomicUsize;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

    /// Host that records every call it receives
    struct RecordingHost {
        source: ViewHandle,
        log: Mutex<Vec<String>>,
    }

    impl RecordingHost {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                source: ViewHandle::with_props(ViewProps {
                    frame: SCREEN,
                    ..ViewProps::default()
                }),
                log: Mutex::new(Vec::new()),
            })
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().clone()
        }

        fn record(&self, entry: String) {
            self.log.lock().push(entry);
        }
    }

    impl PresentationHost for RecordingHost {
        fn source_view(&self) -> ViewHandle {
            self.source.clone()
        }

        fn insert_surface(&self, surface: &CardSurface) {
            self.record(format!("insert {}", surface.handle.id()));
        }

        fn remove_surface(&self, surface: &CardSurface) {
            self.record(format!("remove {}", surface.handle.id()));
        }

        fn forward_touch(&self, location: Point) {
            self.record(format!("forward {} {}", location.x, location.y));
        }
    }

    fn manager(config: PresenterConfig) -> (CardManager, Arc<RecordingHost>) {
        let host = RecordingHost::new();
        let manager = card_manager(
            host.clone(),
            Arc::new(EdgeInsets::new(47.0, 0.0, 34.0, 0.0)),
            config,
        );
        (manager, host)
    }

    fn card(style: CardStyle) -> Card {
        Card::new(Size::new(390.0, 300.0), style)
    }

    fn non_replacing() -> CardStyle {
        presets::default(|make| {
            make.dismisses_current_cards_in_context(false);
        })
    }

    /// Present and finish the enter animation
    fn show(manager: &CardManager, style: CardStyle, now: u64) -> CardHandle {
        let handle = manager.present(card(style)).unwrap();
        manager.update(now);
        manager.update(now + 400);
        handle
    }

    #[test]
    fn test_reject_policy() {
        let (manager, _host) = manager(PresenterConfig::default());
        show(&manager, presets::default(|_| {}), 0);

        let err = manager.present(card(non_replacing())).unwrap_err();
        assert_eq!(err, CardError::AlreadyPresenting);
        assert_eq!(manager.card_count(), 1);
    }

    #[test]
    fn test_queue_policy() {
        let (manager, host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Queue),
        );
        let first = show(&manager, presets::default(|_| {}), 0);
        let second = manager.present(card(non_replacing())).unwrap();
        assert_eq!(manager.state(second), Some(CardState::Idle));
        assert_eq!(manager.state(first), Some(CardState::Presented));

        manager.dismiss(first).unwrap();
        manager.update(500);
        manager.update(900);

        assert_eq!(manager.state(first), None);
        assert_eq!(manager.state(second), Some(CardState::Presenting));
        assert_eq!(host.log(), ["insert 1", "remove 1", "insert 2"]);
    }

    #[test]
    fn test_stack_policy_routes_to_topmost() {
        let (manager, _host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Stack),
        );
        let bottom = show(&manager, presets::default(|_| {}), 0);
        let top = show(&manager, non_replacing(), 1_000);
        assert_eq!(manager.card_count(), 2);

        assert_eq!(manager.handle_tap(Point::new(10.0, 10.0)), TapOutcome::Dismissed);
        assert_eq!(manager.state(top), Some(CardState::Dismissing));
        assert_eq!(manager.state(bottom), Some(CardState::Presented));

        assert_eq!(manager.dismiss_top(), Some(bottom));
    }

    #[test]
    fn test_replace_current_card() {
        let (manager, host) = manager(PresenterConfig::default());
        let first = show(&manager, presets::default(|_| {}), 0);

        let second = manager.present(card(presets::default(|_| {}))).unwrap();
        assert_eq!(manager.state(first), Some(CardState::Dismissing));
        assert_eq!(manager.state(second), Some(CardState::Idle));

        manager.update(600);
        assert_eq!(manager.state(second), Some(CardState::Idle));
        manager.update(800);
        assert_eq!(manager.state(first), None);
        assert_eq!(manager.state(second), Some(CardState::Presenting));
        assert_eq!(host.log(), ["insert 1", "remove 1", "insert 2"]);

        manager.update(900);
        manager.update(1_300);
        assert_eq!(manager.state(second), Some(CardState::Presented));
    }

    #[test]
    fn test_back_to_back_replacements() {
        let (manager, host) = manager(PresenterConfig::default());
        let first = show(&manager, presets::default(|_| {}), 0);

        let second = manager.present(card(presets::default(|_| {}))).unwrap();
        let third = manager.present(card(presets::default(|_| {}))).unwrap();
        assert_eq!(manager.state(first), Some(CardState::Dismissing));
        assert_eq!(manager.state(second), None);
        assert_eq!(manager.state(third), Some(CardState::Idle));

        for step in 1..=40 {
            manager.update(400 + step * 100);
        }

        assert_eq!(manager.state(first), None);
        assert_eq!(manager.state(second), None);
        assert_eq!(manager.state(third), Some(CardState::Presented));
        assert_eq!(host.log(), ["insert 1", "remove 1", "insert 3"]);
    }

    #[test]
    fn test_replacement_drops_queued_card() {
        let (manager, host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Queue),
        );
        show(&manager, presets::default(|_| {}), 0);
        let waiting = manager.present(card(non_replacing())).unwrap();
        let replacing = manager.present(card(presets::default(|_| {}))).unwrap();
        assert_eq!(manager.state(waiting), None);

        for step in 1..=20 {
            manager.update(400 + step * 100);
        }
        assert_eq!(manager.state(replacing), Some(CardState::Presented));
        assert_eq!(host.log(), ["insert 1", "remove 1", "insert 3"]);
    }

    #[test]
    fn test_queued_replacement_dismisses_stacked_card() {
        let (manager, _host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Stack),
        );
        let first = show(&manager, presets::default(|_| {}), 0);
        let replacing = manager.present(card(presets::default(|_| {}))).unwrap();
        // Stacked while the replacement waits for the first card to leave
        let stacked = manager.present(card(non_replacing())).unwrap();
        assert_eq!(manager.state(stacked), Some(CardState::Presenting));

        manager.update(500);
        assert_eq!(manager.state(stacked), Some(CardState::Dismissing));

        for step in 1..=20 {
            manager.update(500 + step * 100);
        }
        assert_eq!(manager.state(first), None);
        assert_eq!(manager.state(stacked), None);
        assert_eq!(manager.state(replacing), Some(CardState::Presented));
    }

    #[test]
    fn test_pan_only_moves_topmost_card() {
        let (manager, _host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Stack),
        );
        let bottom = show(&manager, presets::default(|_| {}), 0);
        let top = show(&manager, non_replacing(), 1_000);

        manager.handle_pan(bottom, PanEvent::began()).unwrap();
        manager
            .handle_pan(bottom, PanEvent::changed(Point::new(0.0, 250.0)))
            .unwrap();
        manager
            .handle_pan(bottom, PanEvent::ended(Point::new(0.0, 250.0), Point::ZERO))
            .unwrap();
        assert_eq!(manager.state(bottom), Some(CardState::Presented));
        let surface = manager.surface(bottom).unwrap();
        assert!(surface.card.transform().is_identity());

        manager.handle_pan(top, PanEvent::began()).unwrap();
        manager
            .handle_pan(top, PanEvent::ended(Point::new(0.0, 250.0), Point::ZERO))
            .unwrap();
        assert_eq!(manager.state(top), Some(CardState::Dismissing));
    }

    #[test]
    fn test_callbacks_run_outside_lock() {
        let (manager, _host) = manager(PresenterConfig::default());
        let seen = Arc::new(AtomicUsize::new(usize::MAX));
        let (inner, count) = (manager.clone(), seen.clone());
        let style = presets::default(move |make| {
            make.on_did_dismiss(move |_| {
                count.store(inner.card_count(), Ordering::SeqCst);
            });
        });

        let handle = show(&manager, style, 0);
        manager.dismiss(handle).unwrap();
        manager.update(1_000);
        manager.update(1_400);

        // The surface is already gone when did_dismiss runs
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_effect_order_on_dismiss() {
        let (manager, host) = manager(PresenterConfig::default());
        let log = Arc::new(parking_lot::Mutex::new(Vec::<String>::new()));
        let (a, b, c) = (log.clone(), log.clone(), host.clone());
        let style = presets::default(move |make| {
            make.on_will_dismiss(move |_| a.lock().push("will_dismiss".into()))
                .on_did_dismiss(move |_| {
                    let removed = c.log().iter().any(|entry| entry == "remove 1");
                    b.lock().push(format!("did_dismiss removed={removed}"));
                });
        });

        let handle = show(&manager, style, 0);
        let done = log.clone();
        manager
            .dismiss_then(handle, move || done.lock().push("completion".into()))
            .unwrap();
        manager.update(1_000);

        assert_eq!(
            log.lock().as_slice(),
            ["will_dismiss", "did_dismiss removed=true", "completion"]
        );
    }

    #[test]
    fn test_dismiss_queued_and_unknown() {
        let (manager, host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Queue),
        );
        show(&manager, presets::default(|_| {}), 0);
        let queued = manager.present(card(non_replacing())).unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let flag = fired.clone();
        manager
            .dismiss_then(queued, move || {
                flag.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(manager.state(queued), None);

        assert_eq!(
            manager.dismiss(CardHandle::from_raw(99)),
            Err(CardError::UnknownCard(99))
        );
        assert_eq!(
            manager.handle_pan(CardHandle::from_raw(99), PanEvent::began()),
            Err(CardError::UnknownCard(99))
        );
        assert_eq!(host.log(), ["insert 1"]);
    }

    #[test]
    fn test_dismiss_all_drops_queue() {
        let (manager, _host) = manager(
            PresenterConfig::default().with_concurrent_presentation(ConcurrentPresentation::Queue),
        );
        let first = show(&manager, presets::default(|_| {}), 0);
        let queued = manager.present(card(non_replacing())).unwrap();

        manager.dismiss_all();
        assert_eq!(manager.state(queued), None);
        assert_eq!(manager.state(first), Some(CardState::Dismissing));

        manager.update(1_000);
        assert!(!manager.has_visible_cards());
        assert_eq!(manager.card_count(), 0);
    }

    #[test]
    fn test_tap_without_cards_forwards() {
        let (manager, host) = manager(PresenterConfig::default());
        assert_eq!(manager.handle_tap(Point::new(5.0, 6.0)), TapOutcome::Forwarded);
        assert_eq!(host.log(), ["forward 5 6"]);
    }

    #[test]
    fn test_invalid_duration() {
        let (manager, _host) = manager(PresenterConfig::default());
        let style = presets::default(|make| {
            make.duration(CardDuration::Seconds(-1.0));
        });
        assert_eq!(
            manager.present(card(style)).unwrap_err(),
            CardError::InvalidDuration(-1.0)
        );
        assert_eq!(manager.card_count(), 0);
    }

    #[test]
    fn test_auto_dismiss_through_manager() {
        let (manager, host) = manager(PresenterConfig::default());
        let handle = show(&manager, presets::toast(|_| {}), 0);
        let surface = manager.surface(handle).unwrap();
        assert_eq!(surface.card.frame().max_y(), 844.0 - 34.0);

        manager.update(3_400);
        assert_eq!(manager.state(handle), Some(CardState::Dismissing));
        manager.update(3_800);
        assert_eq!(manager.state(handle), None);
        assert_eq!(host.log(), ["insert 1", "remove 1"]);
    }
}
