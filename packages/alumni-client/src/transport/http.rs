//! reqwest-backed transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::warn;

use super::{EncodedBody, HttpRequest, HttpResponse, Transport};
use crate::dispatch::Method;
use crate::error::TransportError;

/// Production transport. Uses reqwest's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            EncodedBody::Empty => builder,
            EncodedBody::Text(text) => builder.body(text),
            EncodedBody::Multipart(part) => {
                let mime = mime_guess::from_path(&part.file_name).first_or_octet_stream();
                let file = Part::bytes(part.bytes)
                    .file_name(part.file_name)
                    .mime_str(mime.as_ref())
                    .map_err(|e| TransportError::Network(e.to_string()))?;
                builder.multipart(Form::new().part(part.field, file))
            }
        };

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "Request failed");
            TransportError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            warn!(url = %request.url, status, error = %e, "Failed to read response body");
            TransportError::Body(e.to_string())
        })?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
