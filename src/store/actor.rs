use super::AccountState;
use crate::actions::{Dispatch, Notification};
use std::collections::VecDeque;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

/// Errors returned when talking to the store task.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
}

/// Messages handled by the [`StoreActor`].
#[derive(Debug)]
pub enum StoreRequest {
    Dispatch(Notification),
    Snapshot {
        respond_to: oneshot::Sender<AccountState>,
    },
    History {
        respond_to: oneshot::Sender<Vec<Notification>>,
    },
}

/// Number of recent notifications a store keeps by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Owns the [`AccountState`] and applies notifications one at a time.
///
/// Requests are processed sequentially, so the state needs no lock. A
/// snapshot taken after a dispatch always reflects that dispatch. Only the
/// most recent `history_limit` notifications are kept.
pub struct StoreActor {
    receiver: mpsc::UnboundedReceiver<StoreRequest>,
    state: AccountState,
    history: VecDeque<Notification>,
    history_limit: usize,
    reduced: usize,
}

impl StoreActor {
    pub fn new() -> (Self, StoreClient) {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A store that remembers at most `limit` notifications. `0` keeps none.
    pub fn with_history_limit(limit: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            state: AccountState::default(),
            history: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            history_limit: limit,
            reduced: 0,
        };
        (actor, StoreClient { sender })
    }

    /// Runs until every [`StoreClient`] has been dropped.
    pub async fn run(mut self) {
        info!("Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch(notification) => {
                    debug!(action = %notification.action_type(), "Reduce");
                    self.state.reduce(&notification);
                    self.reduced += 1;
                    if self.history_limit == 0 {
                        continue;
                    }
                    if self.history.len() == self.history_limit {
                        self.history.pop_front();
                    }
                    self.history.push_back(notification);
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(self.state.clone());
                }
                StoreRequest::History { respond_to } => {
                    let _ = respond_to.send(self.history.iter().cloned().collect());
                }
            }
        }

        info!(notifications = self.reduced, "Store stopped");
    }
}

/// Handle to a running [`StoreActor`].
#[derive(Debug, Clone)]
pub struct StoreClient {
    sender: mpsc::UnboundedSender<StoreRequest>,
}

impl StoreClient {
    /// Current state of every collection.
    pub async fn snapshot(&self) -> Result<AccountState, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }

    /// The most recent notifications applied, oldest first.
    pub async fn history(&self) -> Result<Vec<Notification>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::History { respond_to })
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)
    }
}

impl Dispatch for StoreClient {
    fn dispatch(&self, notification: Notification) {
        if self.sender.send(StoreRequest::Dispatch(notification)).is_err() {
            debug!("Store closed, notification dropped");
        }
    }
}
