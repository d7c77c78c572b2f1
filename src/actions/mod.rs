//! Three-phase fetch notifications and the dispatcher that emits them.
//!
//! Every fetch produces `Requested` followed by exactly one of `Succeeded`
//! or `Failed`. Notifications are delivered to a [`Dispatch`] sink, usually
//! the [`StoreClient`](crate::store::StoreClient).

pub mod dispatcher;

pub use dispatcher::*;

use crate::api::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

/// The phase of one fetch attempt.
///
/// Serialized with a `type` tag: `REQUEST`, `SUCCESS` (with `payload`) or
/// `FAILURE` (with `message`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FetchAction {
    #[serde(rename = "REQUEST")]
    Requested,
    #[serde(rename = "SUCCESS")]
    Succeeded { payload: Value },
    #[serde(rename = "FAILURE")]
    Failed { message: String },
}

impl FetchAction {
    pub fn phase(&self) -> &'static str {
        match self {
            FetchAction::Requested => "REQUEST",
            FetchAction::Succeeded { .. } => "SUCCESS",
            FetchAction::Failed { .. } => "FAILURE",
        }
    }

    /// True for `Succeeded` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FetchAction::Requested)
    }
}

/// A fetch action tagged with the collection it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub resource: ResourceKind,
    #[serde(flatten)]
    pub action: FetchAction,
}

impl Notification {
    pub fn new(resource: ResourceKind, action: FetchAction) -> Self {
        Self { resource, action }
    }

    /// Action type name as the UI store knows it, e.g. `GET_ORDERS_SUCCESS`.
    pub fn action_type(&self) -> String {
        format!(
            "GET_{}_{}",
            self.resource.collection().to_uppercase(),
            self.action.phase()
        )
    }
}

/// Receiver of notifications. Delivery is synchronous and never fails from
/// the caller's point of view.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, notification: Notification);
}

impl Dispatch for mpsc::UnboundedSender<Notification> {
    fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.send(notification) {
            tracing::debug!(action = %e.0.action_type(), "Notification dropped, receiver closed");
        }
    }
}
