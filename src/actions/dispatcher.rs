use super::{Dispatch, FetchAction, Notification};
use crate::api::{fetch_collection, RequestContext, ResourceFetcher, ResourceKind};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

/// Wraps a [`ResourceFetcher`] in the request/success/failure protocol.
///
/// Invoking an operation emits `Requested` and spawns the fetch before it
/// returns. The terminal notification is emitted by the spawned task, so it
/// arrives even if the returned future is dropped. Awaiting that future waits
/// for the terminal notification; it always completes with `()`, failures
/// included. Must be called from within a Tokio runtime. Concurrent invocations are not
/// coalesced: each one gets its own `Requested` and terminal pair.
pub struct ActionDispatcher<F, D> {
    fetcher: Arc<F>,
    sink: Arc<D>,
    context: Arc<RequestContext>,
}

impl<F, D> Clone for ActionDispatcher<F, D> {
    fn clone(&self) -> Self {
        Self {
            fetcher: self.fetcher.clone(),
            sink: self.sink.clone(),
            context: self.context.clone(),
        }
    }
}

impl<F, D> ActionDispatcher<F, D>
where
    F: ResourceFetcher + 'static,
    D: Dispatch + 'static,
{
    pub fn new(fetcher: F, sink: D, context: RequestContext) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sink: Arc::new(sink),
            context: Arc::new(context),
        }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Retrieves all orders for the current user.
    pub fn get_orders(&self) -> impl Future<Output = ()> + Send + 'static {
        self.fetch_resource(ResourceKind::Orders)
    }

    /// Retrieves all products the current user owns.
    pub fn get_products(&self) -> impl Future<Output = ()> + Send + 'static {
        self.fetch_resource(ResourceKind::Products)
    }

    /// Retrieves all subscriptions for the current user.
    pub fn get_subscriptions(&self) -> impl Future<Output = ()> + Send + 'static {
        self.fetch_resource(ResourceKind::Subscriptions)
    }

    /// Emits `Requested`, spawns the fetch and returns a future that resolves
    /// once the terminal notification has been emitted.
    pub fn fetch_resource(&self, kind: ResourceKind) -> impl Future<Output = ()> + Send + 'static {
        info!(resource = %kind, "Dispatching request");
        self.sink.dispatch(Notification::new(kind, FetchAction::Requested));

        let fetcher = self.fetcher.clone();
        let sink = self.sink.clone();
        let context = self.context.clone();
        let span = tracing::info_span!("fetch_resource", resource = %kind);

        let task = async move {
            let action = match fetch_collection(fetcher.as_ref(), &context, kind).await {
                Ok(payload) => {
                    info!("Fetch succeeded");
                    FetchAction::Succeeded { payload }
                }
                Err(e) => {
                    warn!(error = %e, status = ?e.status(), "Fetch failed");
                    FetchAction::Failed { message: e.display_message() }
                }
            };
            sink.dispatch(Notification::new(kind, action));
        }
        .instrument(span);

        let handle = tokio::spawn(task);
        async move {
            if let Err(e) = handle.await {
                error!(resource = %kind, error = %e, "Fetch task failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockFetcher;
    use crate::api::FetchError;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = rx.try_recv() {
            out.push(n);
        }
        out
    }

    #[tokio::test]
    async fn requested_is_emitted_before_the_future_is_polled() {
        let mock = MockFetcher::new();
        mock.expect_fetch("Customers/1/orders/").return_ok(json!([]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ActionDispatcher::new(mock.clone(), tx, RequestContext::new("http://api.test", "1"));

        let pending = dispatcher.get_orders();
        assert_eq!(
            drain(&mut rx),
            vec![Notification::new(ResourceKind::Orders, FetchAction::Requested)]
        );

        pending.await;
        assert_eq!(
            drain(&mut rx),
            vec![Notification::new(ResourceKind::Orders, FetchAction::Succeeded { payload: json!([]) })]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn dropping_the_future_still_finishes_the_fetch() {
        let mock = MockFetcher::new();
        mock.expect_fetch("Customers/1/orders/").return_ok(json!([{"id": 9}]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ActionDispatcher::new(mock.clone(), tx, RequestContext::new("http://api.test", "1"));

        drop(dispatcher.get_orders());

        assert_eq!(rx.recv().await.unwrap().action, FetchAction::Requested);
        assert_eq!(
            rx.recv().await.unwrap().action,
            FetchAction::Succeeded { payload: json!([{"id": 9}]) }
        );
        assert_eq!(mock.requests().len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn failure_is_reported_once_and_swallowed() {
        let mock = MockFetcher::new();
        mock.expect_fetch("Customers/1/products/").return_err(FetchError::Api {
            status: 500,
            message: "boom".into(),
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = ActionDispatcher::new(mock.clone(), tx, RequestContext::new("http://api.test", "1"));

        dispatcher.get_products().await;

        let notifications = drain(&mut rx);
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].action, FetchAction::Requested);
        assert_eq!(notifications[1].action, FetchAction::Failed { message: "boom".into() });
        mock.verify();
    }
}
