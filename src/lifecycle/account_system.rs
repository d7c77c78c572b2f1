use crate::actions::ActionDispatcher;
use crate::api::{HttpFetcher, RequestContext, ResourceFetcher};
use crate::store::{StoreActor, StoreClient};
use tracing::{error, info};

/// Runtime orchestrator for one signed-in customer.
///
/// `AccountSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store task
/// - **Dependency Wiring**: Pointing the dispatcher's notifications at the store
///
/// # Example
///
/// ```ignore
/// let system = AccountSystem::new(context);
///
/// system.dispatcher.get_orders().await;
/// let state = system.store.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct AccountSystem<F = HttpFetcher> {
    /// Issues fetches and reports their progress to the store
    pub dispatcher: ActionDispatcher<F, StoreClient>,

    /// Read side of the store
    pub store: StoreClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl AccountSystem<HttpFetcher> {
    /// Starts a system that talks to the backend over HTTP.
    pub fn new(context: RequestContext) -> Self {
        Self::with_fetcher(HttpFetcher::default(), context)
    }
}

impl<F> AccountSystem<F>
where
    F: ResourceFetcher + 'static,
{
    /// Starts a system around any fetcher, e.g. a mock in tests.
    pub fn with_fetcher(fetcher: F, context: RequestContext) -> Self {
        let (store_actor, store) = StoreActor::new();
        let store_handle = tokio::spawn(store_actor.run());

        info!(user_id = %context.user_id, api_base = %context.api_base, "Account system started");

        Self {
            dispatcher: ActionDispatcher::new(fetcher, store.clone(), context),
            store,
            handles: vec![store_handle],
        }
    }

    /// Drops every client and waits for the store task to finish.
    ///
    /// Fetch futures that are still alive keep the store open until they complete.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down account system...");

        drop(self.dispatcher);
        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Account system shutdown complete.");
        Ok(())
    }
}
