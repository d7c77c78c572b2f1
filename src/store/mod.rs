//! The state store that consumes fetch notifications.
//!
//! [`AccountState`] is a plain reducer target. [`StoreActor`] owns one inside
//! a task and applies every notification it receives, in arrival order.

pub mod actor;

pub use actor::*;

use crate::actions::{FetchAction, Notification};
use crate::api::{FetchError, ResourceKind};
use crate::products::ProductCollection;
use serde_json::Value;

/// What the store knows about one collection.
///
/// `data` and `error` follow last-write-wins: whichever terminal notification
/// arrives last decides them. `pending` counts fetches still in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceState {
    pub pending: usize,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl ResourceState {
    pub fn is_fetching(&self) -> bool {
        self.pending > 0
    }

    pub fn reduce(&mut self, action: &FetchAction) {
        match action {
            FetchAction::Requested => {
                self.pending += 1;
            }
            FetchAction::Succeeded { payload } => {
                self.pending = self.pending.saturating_sub(1);
                self.data = Some(payload.clone());
                self.error = None;
            }
            FetchAction::Failed { message } => {
                self.pending = self.pending.saturating_sub(1);
                self.error = Some(message.clone());
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountState {
    pub orders: ResourceState,
    pub products: ResourceState,
    pub subscriptions: ResourceState,
}

impl AccountState {
    pub fn resource(&self, kind: ResourceKind) -> &ResourceState {
        match kind {
            ResourceKind::Orders => &self.orders,
            ResourceKind::Products => &self.products,
            ResourceKind::Subscriptions => &self.subscriptions,
        }
    }

    fn resource_mut(&mut self, kind: ResourceKind) -> &mut ResourceState {
        match kind {
            ResourceKind::Orders => &mut self.orders,
            ResourceKind::Products => &mut self.products,
            ResourceKind::Subscriptions => &mut self.subscriptions,
        }
    }

    pub fn reduce(&mut self, notification: &Notification) {
        self.resource_mut(notification.resource).reduce(&notification.action);
    }

    /// The last received product payload, parsed. Empty before the first success.
    pub fn product_collection(&self) -> Result<ProductCollection, FetchError> {
        match &self.products.data {
            Some(payload) => ProductCollection::from_json(payload),
            None => Ok(ProductCollection::default()),
        }
    }
}
