use axum::routing::get;
use axum::{Json, Router};
use my_account::actions::FetchAction;
use my_account::api::RequestContext;
use my_account::lifecycle::AccountSystem;
use my_account::products::{
    get_cares, get_plugins_for_site_type, sort_by_popularity, to_display_records, ProductId,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

fn catalog() -> Value {
    json!({
        "p1": {"id": 1, "glNumber": "82105", "type": "plugin", "name": "WooCommerce SEO",
               "currentVersion": "5.8", "icon": "woo.png",
               "downloads": [{"name": "Download", "file": "https://dl.test/woo.zip"}]},
        "p2": {"id": 2, "glNumber": "82101", "type": "plugin", "name": "Yoast SEO Premium &amp; more",
               "currentVersion": "7.0", "icon": "premium.png",
               "downloads": [{"name": "Download", "file": "https://dl.test/premium.zip"}]},
        "p3": {"id": 3, "glNumber": "82101", "type": "plugin", "name": "Yoast SEO Premium &amp; more",
               "currentVersion": "7.0", "icon": "premium.png", "downloads": []},
        "p4": {"id": 4, "glNumber": "99999", "type": "plugin", "name": "Legacy plugin"},
        "p5": {"id": 5, "glNumber": "70001", "type": "care", "name": "Care fund"},
        "p6": {"id": 6, "type": "plugin", "name": "Broken entry"}
    })
}

async fn spawn_backend() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/api/Customers/:user_id/products/", get(|| async { Json(catalog()) }))
        .route(
            "/api/Customers/:user_id/orders/",
            get(|| async { Json(json!([{"id": "order_1", "total": 8900}])) }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

/// Full end-to-end test: HTTP backend, real dispatcher, real store, normalizer.
#[tokio::test]
async fn test_full_account_system_integration() {
    let base = spawn_backend().await;
    let system = AccountSystem::new(RequestContext::new(base, "42"));

    tokio::join!(system.dispatcher.get_orders(), system.dispatcher.get_products());

    let state = system.store.snapshot().await.unwrap();
    assert_eq!(state.orders.data, Some(json!([{"id": "order_1", "total": 8900}])));
    assert!(state.products.error.is_none());

    // Malformed entry p6 is skipped while parsing.
    let collection = state.product_collection().unwrap();
    assert_eq!(collection.len(), 5);

    let plugins = sort_by_popularity(get_plugins_for_site_type("wordpress", &collection));
    let gl_numbers: Vec<_> = plugins.iter().map(|p| p.gl_number.as_str()).collect();
    assert_eq!(gl_numbers, vec!["82101", "82105", "99999"]);
    assert_eq!(plugins[0].ids, vec![ProductId::from(2i64), ProductId::from(3i64)]);

    let records = to_display_records(&plugins);
    assert_eq!(records[0].name, "Yoast SEO Premium & more");
    assert_eq!(records[0].category, "plugin");
    assert_eq!(records[0].buttons.len(), 1);
    assert!(records[2].buttons.is_empty());

    let cares = get_cares(&collection);
    assert_eq!(cares.len(), 1);
    assert_eq!(cares[0].ids, vec![ProductId::from(5i64)]);

    let history = system.store.history().await.unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history
            .iter()
            .filter(|n| matches!(n.action, FetchAction::Succeeded { .. }))
            .count(),
        2
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_reports_failure_without_panicking() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let system = AccountSystem::new(RequestContext::new(format!("http://{addr}/api"), "42"));
    system.dispatcher.get_orders().await;

    let state = system.store.snapshot().await.unwrap();
    assert!(state.orders.data.is_none());
    let message = state.orders.error.expect("failure should be recorded");
    assert!(message.starts_with("Network error"));

    system.shutdown().await.unwrap();
}
