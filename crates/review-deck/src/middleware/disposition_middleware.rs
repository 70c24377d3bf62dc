//! Disposition Middleware
//!
//! Launches the remote merge/close for a `Dispose` action. The local
//! removal is done by the reducer right after this returns and is never
//! rolled back. The spawned task is not joined; its only way back into
//! the store is a `DispositionSucceeded` or `DispositionFailed` action,
//! and the reducer lets those touch nothing but the error signal.
//! Failed calls are reported once and never retried. Nothing is sent
//! while a listing is in flight, since the queue on hand is about to be
//! replaced.

use crate::actions::ReviewAction;
use crate::dispatcher::Dispatcher;
use crate::gateway::ReviewGateway;
use crate::middleware::Middleware;
use crate::state::ReviewState;
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct DispositionMiddleware {
    gateway: Arc<dyn ReviewGateway>,
    runtime: Handle,
}

impl DispositionMiddleware {
    pub fn new(gateway: Arc<dyn ReviewGateway>, runtime: Handle) -> Self {
        Self { gateway, runtime }
    }
}

impl Middleware for DispositionMiddleware {
    fn handle(
        &mut self,
        action: &ReviewAction,
        state: &ReviewState,
        dispatcher: &Dispatcher,
    ) -> bool {
        let ReviewAction::Dispose { key, disposition } = action else {
            return true;
        };

        if state.loading {
            log::debug!("DispositionMiddleware: listing in flight, ignoring {}", key);
            return false;
        }

        let Some(item) = state.find(key).cloned() else {
            log::debug!("DispositionMiddleware: {} is not queued, ignoring", key);
            return false;
        };

        let gateway = Arc::clone(&self.gateway);
        let dispatcher = dispatcher.clone();
        let disposition = *disposition;

        self.runtime.spawn(async move {
            let key = item.key.clone();
            match gateway.apply_disposition(&item, disposition).await {
                Ok(()) => {
                    log::info!("{} {}", key, disposition.past_tense());
                    dispatcher.dispatch(ReviewAction::DispositionSucceeded { key, disposition });
                }
                Err(e) => {
                    log::warn!("Failed to {} {}: {}", disposition, key, e);
                    dispatcher.dispatch(ReviewAction::DispositionFailed {
                        key,
                        disposition,
                        reason: e.to_string(),
                    });
                }
            }
        });

        true
    }
}
