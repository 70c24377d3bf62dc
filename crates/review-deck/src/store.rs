//! Review store
//!
//! Holds the review state and runs the Redux loop: every action passes
//! the middleware chain, then the reducer, then the error-expiry watcher
//! and the subscribed listeners. Remote completions come back through the
//! dispatcher channel and are applied on the store's own thread by
//! `process_pending` or `next_completion`, so the state has exactly one
//! writer.

use crate::actions::ReviewAction;
use crate::deck::{DeckComposer, DeckEntry, DeckLayout, FillerKey};
use crate::dispatcher::Dispatcher;
use crate::domain_models::{Counters, Disposition, ItemKey, ReviewItem, ReviewSource};
use crate::expiry::ErrorExpiry;
use crate::gateway::ReviewGateway;
use crate::gesture::{GestureThresholds, SwipeDirection};
use crate::middleware::{
    DeckMiddleware, DispositionMiddleware, LoadMiddleware, LoggingMiddleware, Middleware,
};
use crate::reducer::reduce;
use crate::state::{QueuePhase, ReviewState, VisibleEntry};
use std::sync::Arc;
use std::time::Duration;
use swipe_config::AppConfig;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;

/// Tunables of a store instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSettings {
    pub gestures: GestureThresholds,
    pub layout: DeckLayout,
    /// How long an error stays up before it clears itself
    pub error_display: Duration,
    /// Fixed seed for filler placement; entropy when `None`
    pub deck_seed: Option<u64>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for StoreSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            gestures: GestureThresholds::from(&config.gesture),
            layout: DeckLayout::from(&config.deck),
            error_display: Duration::from_secs(config.error_display_secs),
            deck_seed: None,
        }
    }
}

/// What the front end should do with a released drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResponse {
    /// The top review card was disposed
    Disposed(Disposition),
    /// The top filler card was dismissed
    Dismissed,
    /// Nothing happened; animate the card back to rest
    SnapBack,
}

type Listener = Box<dyn FnMut(&ReviewState)>;

/// Store - holds the review state and manages the Redux loop
pub struct ReviewStore {
    state: ReviewState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: UnboundedReceiver<ReviewAction>,
    listeners: Vec<Listener>,
    expiry: ErrorExpiry,
    gestures: GestureThresholds,
    next_request: u64,
}

impl ReviewStore {
    /// Build a store with the standard middleware chain
    ///
    /// Remote calls and timers are spawned on `runtime`.
    pub fn new(gateway: Arc<dyn ReviewGateway>, runtime: Handle, settings: StoreSettings) -> Self {
        let composer = match settings.deck_seed {
            Some(seed) => DeckComposer::seeded(settings.layout, seed),
            None => DeckComposer::from_entropy(settings.layout),
        };

        let mut store = Self::bare(runtime.clone(), settings);
        store.add_middleware(Box::new(LoggingMiddleware::new()));
        store.add_middleware(Box::new(LoadMiddleware::new(
            Arc::clone(&gateway),
            runtime.clone(),
        )));
        store.add_middleware(Box::new(DeckMiddleware::new(composer)));
        store.add_middleware(Box::new(DispositionMiddleware::new(gateway, runtime)));
        store
    }

    /// Store without middleware
    pub fn bare(runtime: Handle, settings: StoreSettings) -> Self {
        let (dispatcher, action_rx) = Dispatcher::channel();
        Self {
            state: ReviewState::new(settings.layout.visible),
            middleware: Vec::new(),
            dispatcher,
            action_rx,
            listeners: Vec::new(),
            expiry: ErrorExpiry::new(runtime, settings.error_display),
            gestures: settings.gestures,
            next_request: 0,
        }
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Register an observer called with the new state after every reduced action
    pub fn subscribe(&mut self, listener: impl FnMut(&ReviewState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action, then anything it queued
    pub fn dispatch(&mut self, action: ReviewAction) {
        self.apply(action);
        self.process_pending();
    }

    /// Apply every queued action without waiting; returns how many ran
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action);
            processed += 1;
        }
        processed
    }

    /// Wait for the next queued action (typically a remote completion),
    /// apply it and whatever it queued in turn
    pub async fn next_completion(&mut self) {
        if let Some(action) = self.action_rx.recv().await {
            self.apply(action);
        }
        self.process_pending();
    }

    fn apply(&mut self, action: ReviewAction) {
        let mut should_reduce = true;

        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if should_reduce {
            self.state = reduce(self.state.clone(), &action);
            self.expiry.observe(&self.state, &self.dispatcher);
            for listener in &mut self.listeners {
                listener(&self.state);
            }
        }
    }

    // Operations

    /// Start loading a fresh listing; returns the request id
    pub fn load(&mut self, source: ReviewSource) -> u64 {
        self.next_request += 1;
        let request = self.next_request;
        self.dispatch(ReviewAction::Load { source, request });
        request
    }

    /// Dispose of the item with `key`; a no-op if it is not queued
    pub fn dispose(&mut self, key: ItemKey, disposition: Disposition) {
        self.dispatch(ReviewAction::Dispose { key, disposition });
    }

    /// Dispose of the head of the queue
    pub fn dispose_current(&mut self, direction: SwipeDirection) {
        if let Some(key) = self.state.current().map(|item| item.key.clone()) {
            self.dispose(key, direction.disposition());
        }
    }

    pub fn undo(&mut self) {
        self.dispatch(ReviewAction::Undo);
    }

    pub fn dismiss_filler(&mut self, key: FillerKey) {
        self.dispatch(ReviewAction::DismissFiller(key));
    }

    pub fn clear_error(&mut self) {
        self.dispatch(ReviewAction::ClearError);
    }

    // Presentation boundary

    pub fn visible_deck(&self) -> Vec<VisibleEntry<'_>> {
        self.state.visible_deck()
    }

    pub fn current(&self) -> Option<&ReviewItem> {
        self.state.current()
    }

    pub fn counters(&self) -> Counters {
        self.state.counters
    }

    pub fn total_count(&self) -> usize {
        self.state.total_count()
    }

    pub fn current_error_message(&self) -> Option<String> {
        self.state.current_error_message()
    }

    pub fn phase(&self) -> QueuePhase {
        self.state.phase()
    }

    /// A swipe finished on the top card
    pub fn on_gesture_completed(&mut self, direction: SwipeDirection) {
        match self.state.deck.top().cloned() {
            Some(DeckEntry::Review(key)) => self.dispose(key, direction.disposition()),
            Some(DeckEntry::Filler(key)) => self.dismiss_filler(key),
            None => {}
        }
    }

    /// A drag on the top card was released
    pub fn on_drag_released(&mut self, offset: f64, velocity: f64) -> DragResponse {
        match self.state.deck.top().cloned() {
            Some(DeckEntry::Review(key)) => {
                match self.gestures.classify(offset, velocity).disposition() {
                    Some(disposition) => {
                        self.dispose(key, disposition);
                        DragResponse::Disposed(disposition)
                    }
                    None => DragResponse::SnapBack,
                }
            }
            Some(DeckEntry::Filler(key)) => {
                if self.gestures.classify_dismissal(offset, velocity) {
                    self.dismiss_filler(key);
                    DragResponse::Dismissed
                } else {
                    DragResponse::SnapBack
                }
            }
            None => DragResponse::SnapBack,
        }
    }

    pub fn on_filler_dismissed(&mut self, key: FillerKey) {
        self.dismiss_filler(key);
    }

    pub fn on_undo_requested(&mut self) {
        self.undo();
    }

    pub fn on_error_dismissed(&mut self) {
        self.clear_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::scripted::ScriptedGateway;
    use crate::state::{EntryKind, EntryPayload};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn key(n: u64) -> ItemKey {
        ItemKey::new("X/repo", n)
    }

    fn item(n: u64) -> ReviewItem {
        ReviewItem::new(key(n), format!("PR {}", n))
    }

    fn settings() -> StoreSettings {
        StoreSettings {
            deck_seed: Some(17),
            ..StoreSettings::default()
        }
    }

    fn store_with(gateway: &Arc<ScriptedGateway>) -> ReviewStore {
        let gateway: Arc<dyn ReviewGateway> = gateway.clone();
        ReviewStore::new(gateway, Handle::current(), settings())
    }

    async fn loaded_store(items: Vec<ReviewItem>) -> (ReviewStore, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::with_items(items));
        let mut store = store_with(&gateway);
        store.load(ReviewSource::Repository("X/repo".to_string()));
        assert_eq!(store.phase(), QueuePhase::Loading);
        store.next_completion().await;
        (store, gateway)
    }

    fn queue_numbers(store: &ReviewStore) -> Vec<u64> {
        store.state().queue.iter().map(|i| i.key.number).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_merge_failure_does_not_roll_back() {
        let (mut store, gateway) = loaded_store(vec![item(1), item(2), item(3)]).await;
        assert_eq!(store.phase(), QueuePhase::Ready);

        let visible = store.visible_deck();
        assert!(!visible.is_empty() && visible.len() <= 3);
        assert_eq!(visible[0].key, "pr-X/repo-1");
        assert!(matches!(visible[0].payload, EntryPayload::Review(i) if i.title == "PR 1"));
        assert!(visible[0].is_interactive());
        assert!(visible[1..].iter().all(|e| !e.is_interactive()));

        gateway.fail_disposition(key(1), "Base branch was modified");
        store.on_gesture_completed(SwipeDirection::Right);

        assert_eq!(queue_numbers(&store), vec![2, 3]);
        assert_eq!(
            store.counters(),
            Counters {
                reviewed: 1,
                merged: 1,
                closed: 0
            }
        );
        assert_eq!(store.total_count(), 3);
        assert!(store.current_error_message().is_none());

        store.next_completion().await;

        assert_eq!(gateway.dispositions(), vec![(key(1), Disposition::Merge)]);
        assert_eq!(
            store.current_error_message().as_deref(),
            Some("Failed to merge X/repo#1: Base branch was modified")
        );
        assert_eq!(queue_numbers(&store), vec![2, 3]);
        assert_eq!(store.phase(), QueuePhase::Ready);
    }

    #[tokio::test]
    async fn test_load_failure_sets_failed_phase() {
        let gateway = Arc::new(ScriptedGateway::default());
        gateway.set_listing(Err("502 Bad Gateway".to_string()));
        let mut store = store_with(&gateway);

        store.load(ReviewSource::AllRepositories);
        store.next_completion().await;

        assert_eq!(store.phase(), QueuePhase::Failed);
        assert!(store.visible_deck().is_empty());
        assert_eq!(
            store.current_error_message().as_deref(),
            Some("Failed to load pull requests: 502 Bad Gateway")
        );
        assert_eq!(gateway.list_calls(), vec![ReviewSource::AllRepositories]);
    }

    #[tokio::test]
    async fn test_duplicates_in_listing_are_dropped() {
        let (store, _) = loaded_store(vec![item(1), item(2), item(1)]).await;
        assert_eq!(queue_numbers(&store), vec![1, 2]);
        assert_eq!(store.total_count(), 2);
    }

    #[tokio::test]
    async fn test_undo_close_and_refuse_merge() {
        let (mut store, gateway) = loaded_store(vec![item(1), item(2)]).await;

        store.dispose_current(SwipeDirection::Left);
        assert_eq!(queue_numbers(&store), vec![2]);
        store.on_undo_requested();
        assert_eq!(queue_numbers(&store), vec![1, 2]);
        assert_eq!(store.counters(), Counters::default());
        assert_eq!(store.visible_deck()[0].key, "pr-X/repo-1");

        store.dispose_current(SwipeDirection::Right);
        store.undo();
        assert_eq!(queue_numbers(&store), vec![2]);
        assert_eq!(store.state().history.len(), 1);
        assert!(store
            .current_error_message()
            .is_some_and(|m| m.starts_with("Cannot undo a merged pull request")));

        // Undo never reaches the gateway
        store.next_completion().await;
        assert_eq!(
            gateway.dispositions(),
            vec![(key(1), Disposition::Close), (key(1), Disposition::Merge)]
        );
    }

    #[tokio::test]
    async fn test_disposing_unknown_item_calls_nothing() {
        let (mut store, gateway) = loaded_store(vec![item(1)]).await;
        store.dispose(key(99), Disposition::Merge);
        tokio::task::yield_now().await;
        store.process_pending();

        assert!(gateway.dispositions().is_empty());
        assert_eq!(store.counters(), Counters::default());
        assert_eq!(queue_numbers(&store), vec![1]);
    }

    #[tokio::test]
    async fn test_rapid_swipes_with_out_of_order_completions() {
        let (mut store, gateway) = loaded_store(vec![item(1), item(2), item(3)]).await;
        gateway.hold(key(1));
        gateway.fail_disposition(key(2), "403 Forbidden");

        store.dispose(key(1), Disposition::Merge);
        store.dispose(key(2), Disposition::Close);
        assert_eq!(queue_numbers(&store), vec![3]);
        let counters = store.counters();
        let history: Vec<ItemKey> = store
            .state()
            .history
            .iter()
            .map(|entry| entry.item.key.clone())
            .collect();
        assert_eq!(history, vec![key(1), key(2)]);

        // The second swipe answers while the first is still pending
        store.next_completion().await;
        assert_eq!(
            store.current_error_message().as_deref(),
            Some("Failed to close X/repo#2: 403 Forbidden")
        );

        gateway.release(&key(1));
        store.next_completion().await;

        assert_eq!(
            gateway.dispositions(),
            vec![(key(1), Disposition::Merge), (key(2), Disposition::Close)]
        );
        assert_eq!(queue_numbers(&store), vec![3]);
        assert_eq!(store.counters(), counters);
        assert_eq!(store.state().history.len(), 2);
        assert_eq!(store.state().history[0].item.key, key(1));
        assert_eq!(store.state().history[1].item.key, key(2));
        // The success of the first swipe leaves the second one's error up
        assert_eq!(
            store.current_error_message().as_deref(),
            Some("Failed to close X/repo#2: 403 Forbidden")
        );
    }

    #[tokio::test]
    async fn test_drag_on_filler_dismisses_it() {
        let (mut store, _) = loaded_store(vec![item(1), item(2)]).await;
        // Two items always place the filler between them
        assert_eq!(store.visible_deck()[1].kind(), EntryKind::Filler);

        assert_eq!(store.on_drag_released(50.0, 0.0), DragResponse::SnapBack);
        assert_eq!(
            store.on_drag_released(121.0, 0.0),
            DragResponse::Disposed(Disposition::Merge)
        );

        let deck = store.visible_deck();
        assert_eq!(deck[0].kind(), EntryKind::Filler);
        assert_eq!(deck[0].key, "ad-0");

        assert_eq!(store.on_drag_released(0.0, 100.0), DragResponse::SnapBack);
        assert_eq!(store.on_drag_released(-130.0, 0.0), DragResponse::Dismissed);
        assert_eq!(store.visible_deck()[0].key, "pr-X/repo-2");
        assert_eq!(queue_numbers(&store), vec![2]);
        assert_eq!(store.counters().reviewed, 1);
    }

    #[tokio::test]
    async fn test_gesture_on_filler_dismisses_without_disposing() {
        let (mut store, _) = loaded_store(vec![item(1), item(2)]).await;
        store.dispose(key(1), Disposition::Close);

        store.on_gesture_completed(SwipeDirection::Right);
        assert_eq!(store.state().deck.filler_count(), 0);
        assert_eq!(queue_numbers(&store), vec![2]);
        assert_eq!(store.counters().merged, 0);
    }

    #[tokio::test]
    async fn test_reload_resets_session() {
        let (mut store, gateway) = loaded_store(vec![item(1), item(2)]).await;
        store.dispose_current(SwipeDirection::Left);
        store.next_completion().await;

        gateway.set_listing(Ok(vec![item(5)]));
        store.load(ReviewSource::Repository("X/repo".to_string()));
        // The previous queue stays in place while loading
        assert_eq!(queue_numbers(&store), vec![2]);
        store.next_completion().await;

        assert_eq!(queue_numbers(&store), vec![5]);
        assert_eq!(store.counters(), Counters::default());
        assert!(store.state().history.is_empty());
    }

    #[tokio::test]
    async fn test_listeners_see_every_reduced_action() {
        let (mut store, _) = loaded_store(vec![item(1), item(2)]).await;
        let seen = Rc::new(Cell::new(0));
        let observed = Rc::clone(&seen);
        store.subscribe(move |state| {
            assert!(state.counters.is_consistent());
            observed.set(observed.get() + 1);
        });

        store.dispose_current(SwipeDirection::Left);
        store.undo();
        store.clear_error();
        assert_eq!(seen.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_timeout_only_clears_its_own_error() {
        let gateway = Arc::new(ScriptedGateway::default());
        gateway.set_listing(Err("first".to_string()));
        let mut store = store_with(&gateway);
        let start = tokio::time::Instant::now();

        store.load(ReviewSource::AllRepositories);
        store.next_completion().await;
        assert!(store.current_error_message().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        gateway.set_listing(Err("second".to_string()));
        store.load(ReviewSource::AllRepositories);
        store.next_completion().await;

        // First timer fires at 4s and leaves the newer error alone
        store.next_completion().await;
        assert_eq!(
            store.current_error_message().as_deref(),
            Some("Failed to load pull requests: second")
        );

        store.next_completion().await;
        assert!(store.current_error_message().is_none());
        assert_eq!(store.phase(), QueuePhase::Empty);
        assert!(start.elapsed() >= Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_error_dismissed_explicitly() {
        let (mut store, _) = loaded_store(vec![item(1)]).await;
        store.dispose_current(SwipeDirection::Right);
        store.undo();
        assert!(store.current_error_message().is_some());
        store.on_error_dismissed();
        assert!(store.current_error_message().is_none());
    }
}
