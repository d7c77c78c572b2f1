//! # My Account
//!
//! > **The data layer behind a customer account page.**
//!
//! This crate fetches a customer's collections (orders, products,
//! subscriptions) from the backend REST API, reports every fetch to a state
//! store as a three-phase notification, and turns raw product collections
//! into records a download page can render directly.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Explicit results, notifications on top
//! [`api::fetch_collection`] returns a plain `Result`. The
//! [`ActionDispatcher`](actions::ActionDispatcher) layers the
//! `Requested` → `Succeeded` | `Failed` protocol over it and swallows the
//! failure once it has been reported, so a broken fetch never reaches the
//! caller as an error.
//!
//! ### Explicit context
//! There is no global HTTP client or token holder. Every request is built from a
//! [`RequestContext`](api::RequestContext) handed in by the caller.
//!
//! ### Pure normalization
//! Everything in [`products`] is a pure function of a received collection.
//! Results are recomputed on demand and never patched.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Fetcher ([`api`])
//! - **Role**: Builds authenticated GET requests and maps responses to JSON or a [`FetchError`](api::FetchError).
//! - **Key items**: [`ResourceFetcher`](api::ResourceFetcher), [`HttpFetcher`](api::HttpFetcher), [`MockFetcher`](api::mock::MockFetcher).
//!
//! ### 2. The Dispatcher ([`actions`])
//! - **Role**: One operation per collection, each emitting its notifications to a [`Dispatch`](actions::Dispatch) sink.
//! - **Key items**: [`Notification`](actions::Notification), [`FetchAction`](actions::FetchAction).
//!
//! ### 3. The Store ([`store`])
//! - **Role**: A single task that reduces notifications into per-collection state.
//! - **Key items**: [`StoreActor`](store::StoreActor), [`StoreClient`](store::StoreClient), [`AccountState`](store::AccountState).
//!
//! ### 4. The Normalizer ([`products`])
//! - **Role**: Merges entries by GL number, filters by type, orders by popularity and builds display records.
//!
//! ### 5. The Orchestrator ([`lifecycle`]) and [`config`]
//! - **Role**: Resolves [`Settings`](config::Settings), wires the dispatcher to the store, sets up tracing.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! USER_ID=42 RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod actions;
pub mod api;
pub mod config;
pub mod lifecycle;
pub mod products;
pub mod store;
