//! Session and request-dispatch core for the alumni network API.
//!
//! Every operation follows one path:
//!
//! ```text
//! typed params ─► Operation table ─► RequestDescriptor ─► Dispatcher ─► Outcome ─► present() ─► DisplayResult
//!                                                           ▲
//!                                                    SessionStore (credential, role)
//! ```
//!
//! The [`SessionStore`] holds the bearer credential and a coarse role
//! derived from its claims. The role only gates what an interface offers;
//! the remote service makes every access-control decision.
//!
//! # Example
//!
//! ```rust,ignore
//! use alumni_client::{api::auth, present, AlumniClient, ClientConfig};
//!
//! let client = AlumniClient::from_config(&ClientConfig::from_env()?);
//!
//! let login = auth::login(&auth::Credentials::new("ada@example.org", "secret"))?;
//! let outcome = client.execute(&login).await;
//! println!("{}", present(&outcome).text);
//! println!("role: {}", client.session().role);
//! ```

pub mod api;
pub mod claims;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod present;
pub mod session;
pub mod testing;
pub mod transport;

pub use api::{BodyShape, Domain, Operation};
pub use claims::{decode_claims, extract_role, ClaimError, ClaimSet};
pub use client::AlumniClient;
pub use config::ClientConfig;
pub use dispatch::{
    Dispatcher, FilePart, Method, Outcome, OutcomeStatus, RequestBody, RequestDescriptor,
};
pub use error::{ClientError, Result, TransportError};
pub use present::{present, DisplayResult};
pub use session::{FileBackend, MemoryBackend, Role, Session, SessionBackend, SessionStore};
pub use transport::{ReqwestTransport, Transport};
