//! Transport seam between the dispatcher and the network.
//!
//! The dispatcher produces a fully built [`HttpRequest`] (URL, headers,
//! encoded body) and hands it to a [`Transport`]. Production code uses
//! [`ReqwestTransport`]; tests use
//! [`MockTransport`](crate::testing::MockTransport).

mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;

use crate::dispatch::{FilePart, Method};
use crate::error::TransportError;

/// Body after encoding by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EncodedBody {
    #[default]
    Empty,
    /// Serialized JSON text. The dispatcher sets the content type.
    Text(String),
    /// Single-file multipart body. The transport sets the boundary header.
    Multipart(FilePart),
}

/// One outgoing HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: EncodedBody,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status code and unparsed body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues exactly one HTTP request per call. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}
