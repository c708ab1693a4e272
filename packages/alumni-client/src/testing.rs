//! Testing utilities including a mock transport.
//!
//! Useful for exercising the dispatcher and client without making real
//! network calls.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::dispatch::Method;
use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, Transport};

type Canned = Result<HttpResponse, TransportError>;

/// Mock transport for testing.
///
/// Responses are looked up first by exact `(method, path)` route, then taken
/// from a FIFO queue. Every request is recorded, including ones that found
/// no canned response.
///
/// # Example
///
/// ```rust
/// use alumni_client::testing::MockTransport;
/// use alumni_client::transport::HttpResponse;
/// use alumni_client::Method;
///
/// let mock = MockTransport::new()
///     .with_route(Method::Get, "/events/", HttpResponse::new(200, "[]"));
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockTransport {
    routes: Arc<RwLock<HashMap<(Method, String), Canned>>>,
    queue: Arc<RwLock<VecDeque<Canned>>>,
    requests: Arc<RwLock<Vec<HttpRequest>>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unrouted request.
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a transport failure for the next unrouted request.
    pub fn with_failure(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    /// Always answer `method path` with this response.
    pub fn with_route(self, method: Method, path: &str, response: HttpResponse) -> Self {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_string()), Ok(response));
        self
    }

    /// Sleep before answering, so concurrent requests overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push(&self, canned: Canned) {
        self.queue
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(canned);
    }

    /// Number of requests that reached the transport.
    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn lookup(&self, request: &HttpRequest) -> Canned {
        let path = path_of(&request.url);
        let routed = self
            .routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(request.method, path.to_string()))
            .cloned();

        routed.unwrap_or_else(|| {
            self.queue
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or_else(|| {
                    Err(TransportError::Network(format!(
                        "no mock response for {} {}",
                        request.method, path
                    )))
                })
        })
    }
}

/// Path component of an absolute URL (`http://host:port/path` → `/path`).
fn path_of(url: &str) -> &str {
    let after_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    after_scheme
        .find('/')
        .map(|idx| &after_scheme[idx..])
        .unwrap_or("/")
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.lookup(&request)
    }
}
