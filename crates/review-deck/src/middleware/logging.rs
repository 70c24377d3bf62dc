use crate::actions::ReviewAction;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::ReviewState;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(
        &mut self,
        action: &ReviewAction,
        _state: &ReviewState,
        _dispatcher: &Dispatcher,
    ) -> bool {
        log::debug!("Action: {}", action.summary());
        true
    }
}
