use crate::actions::ReviewAction;
use crate::domain_models::Disposition;
use crate::domain_models::{Counters, HistoryEntry};
use crate::error::ReviewError;
use crate::state::ReviewState;

/// Reducer - pure function that produces new state from current state + action
///
/// Remote completions only ever touch the error signal here; queue,
/// history, counters and deck change in response to local triggers alone.
pub fn reduce(mut state: ReviewState, action: &ReviewAction) -> ReviewState {
    match action {
        ReviewAction::Load { source, request } => {
            // The current queue stays on screen until the new listing replaces it
            state.source = Some(source.clone());
            state.loading = true;
            state.pending_load = Some(*request);
            state.error = None;
        }
        ReviewAction::Loaded {
            request,
            items,
            deck,
        } => {
            if state.pending_load != Some(*request) {
                log::debug!("Ignoring stale listing #{}", request);
                return state;
            }
            state.queue = items.clone();
            state.deck = deck.clone();
            state.history.clear();
            state.counters = Counters::default();
            state.loading = false;
            state.pending_load = None;
        }
        ReviewAction::LoadFailed { request, message } => {
            if state.pending_load != Some(*request) {
                log::debug!("Ignoring failure of stale listing #{}", request);
                return state;
            }
            state.queue.clear();
            state.deck.clear();
            state.history.clear();
            state.counters = Counters::default();
            state.loading = false;
            state.pending_load = None;
            state.raise(ReviewError::Load(message.clone()));
        }
        ReviewAction::Dispose { key, disposition } => {
            // Matched by key, not position; an unknown key is a no-op
            if state.loading {
                return state;
            }
            let Some(index) = state.queue.iter().position(|item| &item.key == key) else {
                return state;
            };
            let item = state.queue.remove(index);
            state.deck.remove_review(key);
            state.counters.record(*disposition);
            state.history.push(HistoryEntry {
                item,
                disposition: *disposition,
            });
        }
        ReviewAction::DispositionFailed {
            key,
            disposition,
            reason,
        } => {
            state.raise(ReviewError::Disposition {
                key: key.clone(),
                disposition: *disposition,
                reason: reason.clone(),
            });
        }
        ReviewAction::Undo if state.loading => {}
        ReviewAction::Undo => match state.history.last() {
            None => {}
            Some(entry) if entry.disposition == Disposition::Merge => {
                let key = entry.item.key.clone();
                state.raise(ReviewError::UndoRefused { key });
            }
            Some(_) => {
                if let Some(entry) = state.history.pop() {
                    state.counters.revert(entry.disposition);
                    state.deck.restore_review(entry.item.key.clone());
                    state.queue.insert(0, entry.item);
                }
            }
        },
        ReviewAction::DismissFiller(key) => {
            state.deck.remove_filler(*key);
        }
        ReviewAction::ClearError => {
            state.error = None;
        }
        ReviewAction::ErrorExpired { generation } => {
            if state.error.as_ref().map(|e| e.generation) == Some(*generation) {
                state.error = None;
            }
        }
        ReviewAction::Fetched { .. } | ReviewAction::DispositionSucceeded { .. } => {}
    }

    state
}
