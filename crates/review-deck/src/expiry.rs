//! Error display timeout
//!
//! Watches the error signal after every reduced action. Each newly raised
//! error arms one timer; when it fires it dispatches `ErrorExpired` with
//! the generation it was armed for, so a newer error is left alone.

use crate::actions::ReviewAction;
use crate::dispatcher::Dispatcher;
use crate::state::ReviewState;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::Instant;

pub struct ErrorExpiry {
    runtime: Handle,
    timeout: Duration,
    armed_generation: u64,
}

impl ErrorExpiry {
    pub fn new(runtime: Handle, timeout: Duration) -> Self {
        Self {
            runtime,
            timeout,
            armed_generation: 0,
        }
    }

    pub fn observe(&mut self, state: &ReviewState, dispatcher: &Dispatcher) {
        let Some(signal) = &state.error else {
            return;
        };
        if signal.generation == self.armed_generation {
            return;
        }

        self.armed_generation = signal.generation;
        let generation = signal.generation;
        let dispatcher = dispatcher.clone();
        // Deadline taken now; the task may not be polled right away
        let deadline = Instant::now() + self.timeout;

        self.runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            dispatcher.dispatch(ReviewAction::ErrorExpired { generation });
        });
    }
}
