use my_account::actions::{FetchAction, Notification};
use my_account::api::mock::MockFetcher;
use my_account::api::{FetchError, RequestContext, ResourceKind};
use my_account::lifecycle::AccountSystem;
use my_account::products::to_display_records;
use serde_json::json;

fn context() -> RequestContext {
    RequestContext::new("http://api.test", "7").with_access_token("token")
}

/// Real store, mocked backend.
/// A 500 with a server message ends in exactly one Failed carrying that message.
#[tokio::test]
async fn server_error_yields_single_failure_notification() {
    let mock = MockFetcher::new();
    mock.expect_fetch("Customers/7/orders/").return_err(FetchError::Api {
        status: 500,
        message: "boom".into(),
    });

    let system = AccountSystem::with_fetcher(mock.clone(), context());
    system.dispatcher.get_orders().await;

    let history = system.store.history().await.unwrap();
    assert_eq!(
        history,
        vec![
            Notification::new(ResourceKind::Orders, FetchAction::Requested),
            Notification::new(ResourceKind::Orders, FetchAction::Failed { message: "boom".into() }),
        ]
    );
    assert!(!history
        .iter()
        .any(|n| matches!(n.action, FetchAction::Succeeded { .. })));

    let state = system.store.snapshot().await.unwrap();
    assert_eq!(state.orders.error.as_deref(), Some("boom"));
    assert!(!state.orders.is_fetching());

    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn empty_collection_succeeds_with_empty_payload() {
    let mock = MockFetcher::new();
    mock.expect_fetch("Customers/7/products/").return_ok(json!([]));

    let system = AccountSystem::with_fetcher(mock.clone(), context());
    system.dispatcher.get_products().await;

    let state = system.store.snapshot().await.unwrap();
    assert_eq!(state.products.data, Some(json!([])));

    let collection = state.product_collection().unwrap();
    let groups = my_account::products::filter_out_duplicates_as_array(&collection);
    assert!(to_display_records(&groups).is_empty());

    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn requests_carry_context_path_and_token() {
    let mock = MockFetcher::new();
    mock.expect_fetch("Customers/7/subscriptions/").return_ok(json!({}));

    let system = AccountSystem::with_fetcher(mock.clone(), context());
    system.dispatcher.get_subscriptions().await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://api.test/Customers/7/subscriptions/");
    assert_eq!(requests[0].access_token.as_deref(), Some("token"));

    system.shutdown().await.unwrap();
}

/// A rapid double trigger is not coalesced: two Requested, two terminals.
#[tokio::test]
async fn concurrent_invocations_each_get_their_own_pair() {
    let mock = MockFetcher::new();
    mock.expect_fetch("Customers/7/orders/").return_ok(json!([{"id": 1}]));
    mock.expect_fetch("Customers/7/orders/").return_err(FetchError::Network("connection reset".into()));

    let system = AccountSystem::with_fetcher(mock.clone(), context());
    let first = system.dispatcher.get_orders();
    let second = system.dispatcher.get_orders();

    let state = system.store.snapshot().await.unwrap();
    assert_eq!(state.orders.pending, 2);

    tokio::join!(first, second);

    let history = system.store.history().await.unwrap();
    let phases: Vec<_> = history.iter().map(|n| n.action.phase()).collect();
    assert_eq!(&phases[..2], &["REQUEST", "REQUEST"]);
    assert_eq!(history.iter().filter(|n| n.action.is_terminal()).count(), 2);

    let state = system.store.snapshot().await.unwrap();
    assert!(!state.orders.is_fetching());

    mock.verify();
    system.shutdown().await.unwrap();
}

/// Dropping the returned future does not cancel the fetch; the store still
/// sees the terminal notification and stops reporting the fetch as pending.
#[tokio::test]
async fn dropped_future_still_reaches_a_terminal_state() {
    let mock = MockFetcher::new();
    mock.expect_fetch("Customers/7/orders/").return_ok(json!([{"id": 1}]));

    let system = AccountSystem::with_fetcher(mock.clone(), context());
    drop(system.dispatcher.get_orders());

    let state = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        loop {
            let state = system.store.snapshot().await.unwrap();
            if !state.orders.is_fetching() {
                return state;
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("fetch should finish without being awaited");

    assert_eq!(state.orders.pending, 0);
    assert_eq!(state.orders.data, Some(json!([{"id": 1}])));

    let history = system.store.history().await.unwrap();
    assert!(history.last().unwrap().action.is_terminal());
    assert_eq!(mock.requests().len(), 1);

    mock.verify();
    system.shutdown().await.unwrap();
}
