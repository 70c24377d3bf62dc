//! Load Middleware
//!
//! Fetches the listing for a `Load` action on the runtime and reports
//! back with `Fetched` or `LoadFailed`.

use crate::actions::ReviewAction;
use crate::dispatcher::Dispatcher;
use crate::gateway::ReviewGateway;
use crate::middleware::Middleware;
use crate::state::ReviewState;
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct LoadMiddleware {
    gateway: Arc<dyn ReviewGateway>,
    runtime: Handle,
}

impl LoadMiddleware {
    pub fn new(gateway: Arc<dyn ReviewGateway>, runtime: Handle) -> Self {
        Self { gateway, runtime }
    }
}

impl Middleware for LoadMiddleware {
    fn handle(
        &mut self,
        action: &ReviewAction,
        _state: &ReviewState,
        dispatcher: &Dispatcher,
    ) -> bool {
        if let ReviewAction::Load { source, request } = action {
            let gateway = Arc::clone(&self.gateway);
            let dispatcher = dispatcher.clone();
            let source = source.clone();
            let request = *request;

            self.runtime.spawn(async move {
                match gateway.list_review_items(&source).await {
                    Ok(items) => {
                        log::info!(
                            "LoadMiddleware: fetched {} item(s) from {}",
                            items.len(),
                            source
                        );
                        dispatcher.dispatch(ReviewAction::Fetched { request, items });
                    }
                    Err(e) => {
                        log::error!("LoadMiddleware: failed to load {}: {}", source, e);
                        dispatcher.dispatch(ReviewAction::LoadFailed {
                            request,
                            message: e.to_string(),
                        });
                    }
                }
            });
        }

        true
    }
}
