//! In-memory gateway for tests

use super::ReviewGateway;
use crate::domain_models::{Disposition, ItemKey, ReviewItem, ReviewSource};
use crate::error::GatewayError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Returns a scripted listing and records every disposition it receives
///
/// A held key's disposition does not answer until it is released.
#[derive(Default)]
pub struct ScriptedGateway {
    listing: Mutex<Option<Result<Vec<ReviewItem>, String>>>,
    failures: Mutex<HashMap<ItemKey, String>>,
    dispositions: Mutex<Vec<(ItemKey, Disposition)>>,
    list_calls: Mutex<Vec<ReviewSource>>,
    gates: Mutex<HashMap<ItemKey, Arc<Notify>>>,
}

impl ScriptedGateway {
    pub fn with_items(items: Vec<ReviewItem>) -> Self {
        let gateway = Self::default();
        gateway.set_listing(Ok(items));
        gateway
    }

    pub fn set_listing(&self, listing: Result<Vec<ReviewItem>, String>) {
        *self.listing.lock().unwrap() = Some(listing);
    }

    /// Make the next disposition of `key` fail with `reason`
    pub fn fail_disposition(&self, key: ItemKey, reason: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(key, reason.to_string());
    }

    /// Keep the disposition of `key` pending until `release` is called
    pub fn hold(&self, key: ItemKey) {
        self.gates
            .lock()
            .unwrap()
            .insert(key, Arc::new(Notify::new()));
    }

    pub fn release(&self, key: &ItemKey) {
        if let Some(gate) = self.gates.lock().unwrap().remove(key) {
            gate.notify_one();
        }
    }

    pub fn dispositions(&self) -> Vec<(ItemKey, Disposition)> {
        self.dispositions.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ReviewSource> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewGateway for ScriptedGateway {
    async fn list_review_items(
        &self,
        source: &ReviewSource,
    ) -> Result<Vec<ReviewItem>, GatewayError> {
        self.list_calls.lock().unwrap().push(source.clone());
        match self.listing.lock().unwrap().clone() {
            Some(Ok(items)) => Ok(items),
            Some(Err(reason)) => Err(GatewayError::Remote(reason)),
            None => Ok(Vec::new()),
        }
    }

    async fn apply_disposition(
        &self,
        item: &ReviewItem,
        disposition: Disposition,
    ) -> Result<(), GatewayError> {
        self.dispositions
            .lock()
            .unwrap()
            .push((item.key.clone(), disposition));
        let gate = self.gates.lock().unwrap().get(&item.key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.failures.lock().unwrap().remove(&item.key) {
            Some(reason) => Err(GatewayError::Remote(reason)),
            None => Ok(()),
        }
    }
}
