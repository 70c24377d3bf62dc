use crate::actions::ReviewAction;
use crate::dispatcher::Dispatcher;
use crate::state::ReviewState;

pub mod deck_middleware;
pub mod disposition_middleware;
pub mod load_middleware;
pub mod logging;

pub use deck_middleware::DeckMiddleware;
pub use disposition_middleware::DispositionMiddleware;
pub use load_middleware::LoadMiddleware;
pub use logging::LoggingMiddleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware runs on the store's thread and must not block. Remote work
/// is spawned onto the runtime and reports back through the dispatcher.
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current state, before this action is reduced
    /// - `dispatcher`: Use to dispatch follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(
        &mut self,
        action: &ReviewAction,
        state: &ReviewState,
        dispatcher: &Dispatcher,
    ) -> bool;
}
