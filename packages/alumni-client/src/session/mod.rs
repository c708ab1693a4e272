//! Session store: the current bearer credential and its derived role.
//!
//! The store is the only mutable state shared between requests. Writes
//! compute the role first and then publish credential and role together, so
//! a reader never sees a credential paired with a stale role.

mod backend;

pub use backend::{FileBackend, MemoryBackend, PersistedSession, SessionBackend};

use serde::Serialize;
use std::fmt;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};

use crate::claims::extract_role;
use crate::error::Result;

/// Coarse authorization role, derived from the stored credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Anonymous,
    Member,
    Administrator,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Administrator
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Member => "member",
            Role::Administrator => "administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub credential: Option<String>,
    pub role: Role,
}

impl Session {
    fn with_credential(token: String) -> Self {
        let role = extract_role(&token);
        Self {
            credential: Some(token),
            role,
        }
    }

    /// A credential is present. Expiry is not inspected.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            auth_token: self.credential.clone(),
            is_admin: self.role.is_admin(),
        }
    }
}

/// Holds the session and mirrors every change to a [`SessionBackend`].
pub struct SessionStore {
    state: RwLock<Session>,
    backend: Box<dyn SessionBackend>,
}

impl SessionStore {
    /// Open a store, hydrating from the backend.
    ///
    /// The role is re-derived from the persisted credential rather than
    /// trusted from the persisted flag. A backend that cannot be read yields
    /// an anonymous session.
    pub fn open(backend: impl SessionBackend + 'static) -> Self {
        let session = match backend.load() {
            Ok(Some(persisted)) => {
                let session = persisted
                    .auth_token
                    .clone()
                    .map(Session::with_credential)
                    .unwrap_or_default();
                if session.credential.is_some() && persisted.is_admin != session.role.is_admin() {
                    debug!(
                        persisted_admin = persisted.is_admin,
                        derived_role = %session.role,
                        "Persisted role flag disagrees with credential, using derived role"
                    );
                }
                session
            }
            Ok(None) => Session::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load persisted session, starting anonymous");
                Session::default()
            }
        };

        debug!(
            role = %session.role,
            authenticated = session.is_authenticated(),
            "Session hydrated"
        );

        Self {
            state: RwLock::new(session),
            backend: Box::new(backend),
        }
    }

    /// In-memory store with no prior session.
    pub fn in_memory() -> Self {
        Self::open(MemoryBackend::new())
    }

    pub fn get(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn credential(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .credential
            .clone()
    }

    /// Store a credential and recompute the role.
    ///
    /// Any string is accepted. The in-memory session is always updated; an
    /// error means only that the new state could not be persisted.
    pub fn set_credential(&self, token: impl Into<String>) -> Result<()> {
        let next = Session::with_credential(token.into());
        info!(role = %next.role, "Credential stored");
        self.publish(next)
    }

    /// Remove the credential and reset to anonymous. Idempotent.
    pub fn clear(&self) -> Result<()> {
        info!("Session cleared");
        self.publish(Session::default())
    }

    fn publish(&self, next: Session) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let persisted = next.to_persisted();
        *state = next;
        // Persist under the lock so disk order matches memory order.
        self.backend.save(&persisted)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.get();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .field("role", &session.role)
            .finish()
    }
}
