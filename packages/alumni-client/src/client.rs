//! Client facade wiring the session store, dispatcher and operation tables.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, Outcome, RequestDescriptor};
use crate::error::Result;
use crate::session::{FileBackend, Session, SessionStore};
use crate::transport::{ReqwestTransport, Transport};

pub struct AlumniClient<T> {
    session: Arc<SessionStore>,
    dispatcher: Dispatcher<T>,
}

impl AlumniClient<ReqwestTransport> {
    /// Production client: file-backed session, reqwest transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        let session = Arc::new(SessionStore::open(FileBackend::new(&config.session_path)));
        Self::new(&config.base_url, session, ReqwestTransport::new())
    }
}

impl<T: Transport> AlumniClient<T> {
    pub fn new(base_url: &str, session: Arc<SessionStore>, transport: T) -> Self {
        let dispatcher = Dispatcher::new(base_url, Arc::clone(&session), transport);
        Self { session, dispatcher }
    }

    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Dispatch a descriptor with no post-processing.
    pub async fn dispatch(&self, descriptor: &RequestDescriptor) -> Outcome {
        self.dispatcher.dispatch(descriptor).await
    }

    /// Dispatch a descriptor built from an [`Operation`](crate::api::Operation).
    ///
    /// When the descriptor issues a credential and succeeds with a string
    /// `access_token`, the token is stored and the role recomputed. A
    /// failure to persist is logged; the outcome is returned unchanged.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> Outcome {
        let outcome = self.dispatcher.dispatch(descriptor).await;

        if descriptor.issues_credential {
            if let Some(token) = outcome.access_token() {
                if let Err(e) = self.session.set_credential(token) {
                    warn!(
                        path = %descriptor.path,
                        error = %e,
                        "Credential stored in memory but not persisted"
                    );
                }
                info!(path = %descriptor.path, role = %self.session.get().role, "Signed in");
            }
        }

        outcome
    }

    /// Forget the stored credential.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{auth, events};
    use crate::session::Role;
    use crate::testing::MockTransport;
    use crate::transport::HttpResponse;
    use serde_json::json;

    fn client(mock: MockTransport) -> AlumniClient<MockTransport> {
        AlumniClient::new("http://api.test", Arc::new(SessionStore::in_memory()), mock)
    }

    #[tokio::test]
    async fn test_login_stores_credential() {
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJ1c2VyX3R5cGUiOiJhZG1pbiJ9.sig";
        let client = client(MockTransport::new().with_response(HttpResponse::json(
            200,
            &json!({"access_token": token, "token_type": "bearer"}),
        )));

        let descriptor = auth::login(&auth::Credentials::new("a@b.com", "x")).unwrap();
        let outcome = client.execute(&descriptor).await;

        assert!(outcome.is_success());
        assert_eq!(client.session().credential.as_deref(), Some(token));
        assert_eq!(client.session().role, Role::Administrator);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let client = client(MockTransport::new().with_response(HttpResponse::json(
            401,
            &json!({"detail": "Incorrect email or password"}),
        )));

        let descriptor = auth::login(&auth::Credentials::new("a@b.com", "bad")).unwrap();
        client.execute(&descriptor).await;

        assert_eq!(client.session(), Session::default());
    }

    #[tokio::test]
    async fn test_non_issuing_operation_ignores_access_token() {
        let client = client(
            MockTransport::new()
                .with_response(HttpResponse::json(200, &json!({"access_token": "h.e.s"}))),
        );

        let descriptor = events::list().unwrap();
        client.execute(&descriptor).await;

        assert!(client.session().credential.is_none());
    }

    #[tokio::test]
    async fn test_verify_without_token_keeps_previous_credential() {
        let client = client(
            MockTransport::new().with_response(HttpResponse::json(200, &json!({"message": "ok"}))),
        );
        client.session_store().set_credential("previous").unwrap();

        let descriptor = auth::verify_email(&auth::VerifyEmailRequest {
            email: "a@b.com".into(),
            verification_code: "123456".into(),
        })
        .unwrap();
        client.execute(&descriptor).await;

        assert_eq!(client.session().credential.as_deref(), Some("previous"));
    }

    #[tokio::test]
    async fn test_only_credential_issuing_descriptors_store_tokens() {
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJ1c2VyX3R5cGUiOiJtZW1iZXIifQ.sig";
        let response = HttpResponse::json(200, &json!({"access_token": token}));
        let client = client(
            MockTransport::new()
                .with_response(response.clone())
                .with_response(response),
        );
        let body = json!({"email": "a@b.com", "password": "x"});

        let plain = RequestDescriptor::post("/auth/login").with_json_value(body);
        client.execute(&plain).await;
        assert!(client.session().credential.is_none());

        let issuing = plain.clone().issuing_credential();
        client.execute(&issuing).await;
        assert_eq!(client.session().credential.as_deref(), Some(token));
        assert_eq!(client.session().role, Role::Member);
    }

    #[tokio::test]
    async fn test_login_succeeds_when_session_cannot_be_saved() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = Arc::new(SessionStore::open(FileBackend::new(blocker.join("session.json"))));

        let client = AlumniClient::new(
            "http://api.test",
            store,
            MockTransport::new().with_response(HttpResponse::json(
                200,
                &json!({"access_token": "h.e.s", "token_type": "bearer"}),
            )),
        );

        let descriptor = auth::login(&auth::Credentials::new("a@b.com", "x")).unwrap();
        let outcome = client.execute(&descriptor).await;

        assert!(outcome.is_success());
        assert_eq!(client.session().credential.as_deref(), Some("h.e.s"));
        assert_eq!(client.session().role, Role::Member);
    }

    #[tokio::test]
    async fn test_logout() {
        let client = client(MockTransport::new());
        client.session_store().set_credential("h.e.s").unwrap();

        client.logout().unwrap();
        client.logout().unwrap();

        assert_eq!(client.session().role, Role::Anonymous);
        assert!(client.session().credential.is_none());
    }
}
