//! Deck Middleware
//!
//! Turns a fetched listing into a `Loaded` action: drops duplicate keys,
//! then composes the deck. This is the only place the composer runs, so
//! filler placement happens exactly once per load.

use crate::actions::ReviewAction;
use crate::deck::DeckComposer;
use crate::dispatcher::Dispatcher;
use crate::domain_models::dedup_items;
use crate::middleware::Middleware;
use crate::state::ReviewState;
use rand::Rng;

pub struct DeckMiddleware<R: Rng + Send> {
    composer: DeckComposer<R>,
}

impl<R: Rng + Send> DeckMiddleware<R> {
    pub fn new(composer: DeckComposer<R>) -> Self {
        Self { composer }
    }
}

impl<R: Rng + Send> Middleware for DeckMiddleware<R> {
    fn handle(
        &mut self,
        action: &ReviewAction,
        state: &ReviewState,
        dispatcher: &Dispatcher,
    ) -> bool {
        let ReviewAction::Fetched { request, items } = action else {
            return true;
        };

        if state.pending_load != Some(*request) {
            log::debug!("DeckMiddleware: dropping stale listing #{}", request);
            return false;
        }

        let items = dedup_items(items.clone());
        let deck = self.composer.compose(&items);
        dispatcher.dispatch(ReviewAction::Loaded {
            request: *request,
            items,
            deck,
        });

        false
    }
}
