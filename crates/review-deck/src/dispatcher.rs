//! Dispatcher for re-entering the store
//!
//! Middleware and spawned remote calls never touch the state directly.
//! They send follow-up actions through the dispatcher; the store drains
//! the channel on its own thread and runs each action through the full
//! middleware chain and reducer.

use crate::actions::ReviewAction;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Sending half of the store's action channel
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: UnboundedSender<ReviewAction>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver the store drains
    pub fn channel() -> (Self, UnboundedReceiver<ReviewAction>) {
        let (action_tx, action_rx) = unbounded_channel();
        (Self { action_tx }, action_rx)
    }

    /// Queue an action for the store
    ///
    /// Safe to call from any thread or task.
    pub fn dispatch(&self, action: ReviewAction) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e.0.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_is_received_in_order() {
        let (dispatcher, mut rx) = Dispatcher::channel();
        dispatcher.dispatch(ReviewAction::Undo);
        dispatcher.clone().dispatch(ReviewAction::ClearError);

        assert!(matches!(rx.try_recv(), Ok(ReviewAction::Undo)));
        assert!(matches!(rx.try_recv(), Ok(ReviewAction::ClearError)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_after_receiver_dropped_does_not_panic() {
        let (dispatcher, rx) = Dispatcher::channel();
        drop(rx);
        dispatcher.dispatch(ReviewAction::Undo);
    }
}
