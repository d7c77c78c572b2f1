//! # My Account demo
//!
//! Fetches the configured customer's orders and products, then logs what a
//! download page would show.
//!
//! ```bash
//! USER_ID=42 ACCESS_TOKEN=... RUST_LOG=info cargo run
//! ```

use my_account::config::Settings;
use my_account::lifecycle::{setup_tracing, AccountSystem};
use my_account::products::{get_plugins_for_site_type, sort_by_popularity, to_display_records};
use serde_json::Value;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = Settings::from_env();
    info!(shop_url = %settings.shop_url(), "Starting account demo");

    let context = settings
        .request_context()
        .ok_or_else(|| "USER_ID is not set".to_string())?;

    let system = AccountSystem::new(context);

    // Both fetches emit their Requested notification right here.
    let orders = system.dispatcher.get_orders();
    let products = system.dispatcher.get_products();

    let span = tracing::info_span!("initial_load");
    async {
        tokio::join!(orders, products);
    }
    .instrument(span)
    .await;

    let state = system.store.snapshot().await.map_err(|e| e.to_string())?;

    match (&state.orders.data, &state.orders.error) {
        (_, Some(message)) => error!(%message, "Could not load orders"),
        (Some(orders), None) => {
            let count = match orders {
                Value::Array(items) => items.len(),
                Value::Object(map) => map.len(),
                _ => 0,
            };
            info!(count, "Orders loaded");
        }
        (None, None) => info!("No orders received"),
    }

    if let Some(message) = &state.products.error {
        error!(%message, "Could not load products");
    } else {
        let collection = state.product_collection().map_err(|e| e.to_string())?;
        let plugins = sort_by_popularity(get_plugins_for_site_type("wordpress", &collection));
        for record in to_display_records(&plugins) {
            info!(
                gl_number = %record.gl_number,
                name = %record.name,
                downloads = record.buttons.len(),
                "Plugin"
            );
        }
    }

    system.shutdown().await?;

    info!("Account demo completed");
    Ok(())
}
