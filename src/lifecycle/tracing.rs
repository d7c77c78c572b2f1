//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//! The format is compact and hides the module prefix (`with_target(false)`);
//! the level comes from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Dispatches**: every `Requested` with its `resource` field
//! - **Fetches**: URL at debug level, status and byte count of each response
//! - **Failures**: `error` and `status` fields on every failed fetch
//! - **Store**: startup, shutdown and each reduced action at debug level
//! - **Malformed data**: one warning per skipped product entry
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo run
//!
//! # Show URLs and reduced actions
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP layer
//! RUST_LOG=my_account::api=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Account system started user_id="42" api_base="http://localhost:3000/api"
//! INFO Dispatching request resource=orders
//! INFO fetch_resource: Fetch succeeded resource=orders
//! ```
//!
//! **With `RUST_LOG=debug`**, a failing fetch:
//!
//! ```text
//! INFO Dispatching request resource=products
//! DEBUG fetch_resource:fetch_collection: Fetching collection url=http://localhost:3000/api/Customers/42/products/
//! WARN fetch_resource:fetch_collection: Backend rejected request status=500 message="boom"
//! WARN fetch_resource: Fetch failed error=boom status=Some(500)
//! DEBUG Reduce action=GET_PRODUCTS_FAILURE
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
