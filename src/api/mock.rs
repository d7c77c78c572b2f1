//! # Mock Fetcher
//!
//! Utilities for testing dispatchers without a backend.
//!
//! Create a [`MockFetcher`], queue expectations with [`MockFetcher::expect_fetch`],
//! hand it to the code under test, then call [`MockFetcher::verify`].

use super::{ApiRequest, FetchError, ResourceFetcher};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// An expected request and the response to return for it.
struct Expectation {
    path: String,
    response: Result<Value, FetchError>,
}

/// A fetcher with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request whose URL does not end with
/// the next expected path panics.
///
/// # Example
/// ```ignore
/// let mock = MockFetcher::new();
/// mock.expect_fetch("Customers/1/orders/").return_ok(json!([]));
///
/// let dispatcher = ActionDispatcher::new(mock.clone(), sink, context);
/// dispatcher.get_orders().await;
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockFetcher {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    seen: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockFetcher {
    /// Creates a new mock fetcher with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request whose URL ends with `path`.
    pub fn expect_fetch(&self, path: impl Into<String>) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

#[async_trait]
impl ResourceFetcher for MockFetcher {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value, FetchError> {
        self.seen.lock().unwrap().push(request.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();

        match expectation {
            Some(Expectation { path, response }) if request.url.ends_with(&path) => response,
            Some(Expectation { path, .. }) => {
                panic!("Unexpected request {}, expected path {}", request.url, path)
            }
            None => panic!("Unexpected request {}, no expectations left", request.url),
        }
    }
}

/// Builder for `fetch` expectations.
pub struct FetchExpectationBuilder {
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl FetchExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Value) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            path: self.path,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FetchError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation {
            path: self.path,
            response: Err(error),
        });
    }
}
