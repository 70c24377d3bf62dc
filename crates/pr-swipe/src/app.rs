//! Application shell around the review store
//!
//! Translates commands from the keymap into store triggers and exposes
//! the screen view model. Owns nothing the store does not already own
//! apart from session details for the header.

use crate::browser::open_url;
use crate::keymap::{Command, Keymap};
use crate::view_models::ScreenViewModel;
use ratatui::crossterm::event::KeyEvent;
use review_deck::{EntryPayload, ReviewSource, ReviewStore, SwipeDirection};
use tokio::runtime::Handle;

pub struct App {
    store: ReviewStore,
    keymap: Keymap,
    user: String,
    source: ReviewSource,
    runtime: Handle,
    running: bool,
}

impl App {
    pub fn new(
        store: ReviewStore,
        keymap: Keymap,
        user: impl Into<String>,
        source: ReviewSource,
        runtime: Handle,
    ) -> Self {
        Self {
            store,
            keymap,
            user: user.into(),
            source,
            runtime,
            running: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Kick off the first load
    pub fn start(&mut self) {
        log::info!("Loading pull requests from {}", self.source);
        self.store.load(self.source.clone());
    }

    /// Apply remote completions and expired timers
    pub fn tick(&mut self) {
        let processed = self.store.process_pending();
        if processed > 0 {
            log::trace!("Applied {} pending action(s)", processed);
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        if let Some(command) = self.keymap.command_for(key) {
            self.execute(command);
        }
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Merge => self.store.on_gesture_completed(SwipeDirection::Right),
            Command::Close => self.store.on_gesture_completed(SwipeDirection::Left),
            Command::Undo => self.store.on_undo_requested(),
            Command::DismissError => self.store.on_error_dismissed(),
            Command::Reload => {
                self.store.load(self.source.clone());
            }
            Command::OpenInBrowser => self.open_top_card(),
            Command::Quit => self.running = false,
        }
    }

    fn open_top_card(&self) {
        let url = self
            .store
            .visible_deck()
            .first()
            .and_then(|entry| match entry.payload {
                EntryPayload::Review(item) => Some(item.html_url.clone()),
                EntryPayload::Filler(_) => None,
            });

        if let Some(url) = url {
            self.runtime.spawn(open_url(url));
        }
    }

    pub fn view_model(&self) -> ScreenViewModel {
        ScreenViewModel::from_state(self.store.state(), &self.user, self.keymap.help_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::default_keymap;
    use crate::view_models::BodyViewModel;
    use async_trait::async_trait;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use review_deck::{Disposition, GatewayError, ItemKey, ReviewGateway, ReviewItem, StoreSettings};
    use std::sync::{Arc, Mutex};

    /// Always lists the same items, accepts and records every disposition
    #[derive(Default)]
    struct StaticGateway {
        items: Vec<ReviewItem>,
        applied: Mutex<Vec<(u64, Disposition)>>,
    }

    impl StaticGateway {
        fn applied(&self) -> Vec<(u64, Disposition)> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReviewGateway for StaticGateway {
        async fn list_review_items(
            &self,
            _source: &ReviewSource,
        ) -> Result<Vec<ReviewItem>, GatewayError> {
            Ok(self.items.clone())
        }

        async fn apply_disposition(
            &self,
            item: &ReviewItem,
            disposition: Disposition,
        ) -> Result<(), GatewayError> {
            self.applied
                .lock()
                .unwrap()
                .push((item.key.number, disposition));
            Ok(())
        }
    }

    fn items(numbers: &[u64]) -> Vec<ReviewItem> {
        numbers
            .iter()
            .map(|&n| ReviewItem::new(ItemKey::new("octo/app", n), format!("PR {}", n)))
            .collect()
    }

    fn app(numbers: &[u64]) -> (App, Arc<StaticGateway>) {
        let gateway = Arc::new(StaticGateway {
            items: items(numbers),
            ..StaticGateway::default()
        });
        let store = ReviewStore::new(
            gateway.clone(),
            Handle::current(),
            StoreSettings {
                deck_seed: Some(1),
                ..StoreSettings::default()
            },
        );
        let app = App::new(
            store,
            default_keymap(),
            "octocat",
            ReviewSource::Repository("octo/app".to_string()),
            Handle::current(),
        );
        (app, gateway)
    }

    async fn settle(app: &mut App) {
        for _ in 0..5 {
            tokio::task::yield_now().await;
            app.tick();
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_keys_drive_the_store() {
        let (mut app, gateway) = app(&[1, 2, 3]);
        app.start();
        assert_eq!(app.view_model().body, BodyViewModel::Loading);

        settle(&mut app).await;
        assert_eq!(app.store().total_count(), 3);

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.store().counters().closed, 1);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.store().counters().closed, 0);
        assert_eq!(app.store().current().map(|i| i.key.number), Some(1));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.store().counters().merged, 1);

        press(&mut app, KeyCode::Char('u'));
        assert!(app.view_model().error.is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.view_model().error.is_none());

        settle(&mut app).await;
        assert_eq!(
            gateway.applied(),
            vec![(1, Disposition::Close), (1, Disposition::Merge)]
        );

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.is_running());
    }

    #[tokio::test]
    async fn test_swipes_ignored_while_reloading() {
        let (mut app, gateway) = app(&[1, 2]);
        app.start();
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.view_model().body, BodyViewModel::Loading);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.store().counters().reviewed, 0);
        assert!(app.view_model().error.is_none());

        settle(&mut app).await;
        assert!(gateway.applied().is_empty());
        assert_eq!(app.store().total_count(), 2);

        press(&mut app, KeyCode::Char('l'));
        settle(&mut app).await;
        assert_eq!(gateway.applied(), vec![(1, Disposition::Merge)]);
    }
}
