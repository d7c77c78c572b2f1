//! Remote resource fetching against the account backend.
//!
//! Requests are built from an explicit [`RequestContext`] that is passed in at
//! call time; there is no process-wide client or token holder.
//!
//! # Main Components
//!
//! - [`prepare_internal_request`] - Builds an authenticated GET for a path under the API origin
//! - [`ResourceFetcher`] - The async seam that performs a request
//! - [`HttpFetcher`] - The `reqwest` implementation
//! - [`fetch_collection`] - Fetches a user-scoped collection and returns an explicit `Result`
//!
//! # Testing
//!
//! See [`mock`] for a fetcher driven by expectations instead of a network.

pub mod error;
pub mod fetcher;
pub mod mock;

pub use error::*;
pub use fetcher::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, instrument};

/// The collections a customer can fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Orders,
    Products,
    Subscriptions,
}

impl ResourceKind {
    /// Collection segment used in the backend path.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Orders => "orders",
            ResourceKind::Products => "products",
            ResourceKind::Subscriptions => "subscriptions",
        }
    }

    /// Path of this collection for one customer, e.g. `Customers/42/orders/`.
    pub fn path_for(&self, user_id: &str) -> String {
        format!("Customers/{}/{}/", user_id, self.collection())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// Everything a request needs to reach the backend on behalf of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub api_base: String,
    pub user_id: String,
    pub access_token: Option<String>,
}

impl RequestContext {
    pub fn new(api_base: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            user_id: user_id.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// A prepared GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub access_token: Option<String>,
}

/// Builds a request for `path` relative to the context's API origin.
pub fn prepare_internal_request(context: &RequestContext, path: &str) -> ApiRequest {
    let base = context.api_base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    ApiRequest {
        url: format!("{}/{}", base, path),
        access_token: context.access_token.clone(),
    }
}

/// Fetches the `kind` collection of the context's user.
///
/// No retries happen here; the caller decides what to do with a failure.
#[instrument(skip(fetcher, context), fields(user_id = %context.user_id))]
pub async fn fetch_collection<F>(
    fetcher: &F,
    context: &RequestContext,
    kind: ResourceKind,
) -> Result<Value, FetchError>
where
    F: ResourceFetcher + ?Sized,
{
    let request = prepare_internal_request(context, &kind.path_for(&context.user_id));
    debug!(url = %request.url, "Fetching collection");
    fetcher.fetch(&request).await
}
