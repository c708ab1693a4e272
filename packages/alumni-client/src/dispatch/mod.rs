//! Request dispatch and outcome classification.
//!
//! Every operation goes through [`Dispatcher::dispatch`]:
//!
//! 1. Authenticated requests without a stored credential fail fast with
//!    [`Outcome::PreconditionError`]; the transport is never called.
//! 2. Headers are built per body kind. JSON bodies get
//!    `Content-Type: application/json`; multipart bodies leave the content
//!    type to the transport so it can add the boundary.
//! 3. The credential is read from the [`SessionStore`] at this point, so a
//!    credential replaced between calls is always the one sent.
//! 4. The body is parsed as JSON whatever the status code, then classified.

mod outcome;
mod request;

pub use outcome::{service_error_message, Outcome, OutcomeStatus, NO_CREDENTIAL_MESSAGE};
pub use request::{FilePart, Method, RequestBody, RequestDescriptor, DEFAULT_FILE_FIELD};

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::session::SessionStore;
use crate::transport::{EncodedBody, HttpRequest, HttpResponse, Transport};

pub struct Dispatcher<T> {
    transport: T,
    session: Arc<SessionStore>,
    base_url: String,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>, transport: T) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Issue one request and classify the result. Never fails.
    pub async fn dispatch(&self, descriptor: &RequestDescriptor) -> Outcome {
        let credential = if descriptor.authenticated {
            match self.session.credential() {
                Some(token) => Some(token),
                None => {
                    debug!(
                        method = %descriptor.method,
                        path = %descriptor.path,
                        "Authenticated request without credential, not sending"
                    );
                    return Outcome::no_credential();
                }
            }
        } else {
            None
        };

        let request = self.build_request(descriptor, credential.as_deref());
        let start = Instant::now();

        let outcome = match self.transport.send(request).await {
            Ok(response) => interpret(response),
            Err(e) => {
                warn!(
                    method = %descriptor.method,
                    path = %descriptor.path,
                    error = %e,
                    "Transport error"
                );
                Outcome::TransportError {
                    message: e.to_string(),
                }
            }
        };

        debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            status = ?outcome.status(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        outcome
    }

    fn build_request(
        &self,
        descriptor: &RequestDescriptor,
        credential: Option<&str>,
    ) -> HttpRequest {
        let mut headers = Vec::new();

        let body = match &descriptor.body {
            RequestBody::None => EncodedBody::Empty,
            RequestBody::Json(value) => {
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                EncodedBody::Text(value.to_string())
            }
            RequestBody::Multipart(part) => EncodedBody::Multipart(part.clone()),
        };

        if let Some(token) = credential {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        HttpRequest {
            method: descriptor.method,
            url: join_url(&self.base_url, &descriptor.path),
            headers,
            body,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Classify a raw response. The body must be JSON on every status.
pub fn interpret(response: HttpResponse) -> Outcome {
    let payload: serde_json::Value = match serde_json::from_slice(&response.body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(status = response.status, error = %e, "Response body is not JSON");
            return Outcome::TransportError {
                message: format!("invalid JSON response (HTTP {}): {}", response.status, e),
            };
        }
    };

    if response.is_success() {
        Outcome::Success { payload }
    } else {
        let message = service_error_message(response.status, &payload);
        Outcome::ServiceError {
            status_code: response.status,
            payload,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTransport;
    use serde_json::json;

    fn dispatcher(mock: MockTransport) -> Dispatcher<MockTransport> {
        Dispatcher::new("http://api.test/", Arc::new(SessionStore::in_memory()), mock)
    }

    #[test]
    fn test_interpret_success() {
        let outcome = interpret(HttpResponse::json(200, &json!({"id": "e1"})));
        assert_eq!(outcome, Outcome::Success { payload: json!({"id": "e1"}) });
    }

    #[test]
    fn test_interpret_service_error() {
        let outcome = interpret(HttpResponse::json(403, &json!({"detail": "Not an admin"})));
        assert_eq!(
            outcome,
            Outcome::ServiceError {
                status_code: 403,
                payload: json!({"detail": "Not an admin"}),
                message: "Not an admin".into(),
            }
        );
    }

    #[test]
    fn test_interpret_non_json_is_transport_error() {
        let outcome = interpret(HttpResponse::new(502, "<html>Bad Gateway</html>"));
        assert_eq!(outcome.status(), OutcomeStatus::TransportError);
        assert!(outcome.message().unwrap().contains("HTTP 502"));

        let empty = interpret(HttpResponse::new(200, Vec::new()));
        assert_eq!(empty.status(), OutcomeStatus::TransportError);
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://a", "/events/"), "http://a/events/");
        assert_eq!(join_url("http://a", "profile/me"), "http://a/profile/me");
    }

    #[tokio::test]
    async fn test_json_body_gets_content_type_and_no_auth_when_public() {
        let mock = MockTransport::new().with_response(HttpResponse::json(200, &json!({})));
        let dispatcher = dispatcher(mock);
        dispatcher.session().set_credential("h.e.s").unwrap();

        let descriptor = RequestDescriptor::post("/auth/login")
            .with_json_value(json!({"email": "a@b.com", "password": "x"}));
        dispatcher.dispatch(&descriptor).await;

        let sent = dispatcher.transport().last_request().unwrap();
        assert_eq!(sent.url, "http://api.test/auth/login");
        assert_eq!(sent.header("content-type"), Some("application/json"));
        assert_eq!(sent.header("authorization"), None);
        assert_eq!(
            sent.body,
            EncodedBody::Text(r#"{"email":"a@b.com","password":"x"}"#.into())
        );
    }

    #[tokio::test]
    async fn test_multipart_leaves_content_type_to_transport() {
        let mock =
            MockTransport::new().with_response(HttpResponse::json(200, &json!({"added": 2})));
        let dispatcher = dispatcher(mock);
        dispatcher.session().set_credential("tok").unwrap();

        let part = FilePart::new("emails.xlsx", vec![1, 2, 3]);
        let descriptor = RequestDescriptor::post("/admin/upload-allowed-emails")
            .authenticated()
            .with_file(part.clone());
        dispatcher.dispatch(&descriptor).await;

        let sent = dispatcher.transport().last_request().unwrap();
        assert_eq!(sent.header("content-type"), None);
        assert_eq!(sent.header("authorization"), Some("Bearer tok"));
        assert_eq!(sent.body, EncodedBody::Multipart(part));
    }

    #[tokio::test]
    async fn test_bodyless_request_has_no_content_type() {
        let mock = MockTransport::new().with_response(HttpResponse::json(200, &json!([])));
        let dispatcher = dispatcher(mock);

        dispatcher.dispatch(&RequestDescriptor::get("/events/")).await;

        let sent = dispatcher.transport().last_request().unwrap();
        assert!(sent.headers.is_empty());
        assert_eq!(sent.body, EncodedBody::Empty);
    }
}
