//! Resource domains as declarative operation tables.
//!
//! Each remote operation is an [`Operation`] entry: method, path template,
//! whether it needs a credential, and the body shape it takes. Domain
//! modules add typed request structs and one builder per operation, all of
//! which go through the same three descriptor constructors here. The
//! dispatcher never special-cases an operation.

pub mod admin;
pub mod auth;
pub mod events;
pub mod profile;

use serde::Serialize;
use std::fmt;

use crate::dispatch::{FilePart, Method, RequestDescriptor};
use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Auth,
    Profile,
    Events,
    Admin,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Auth => "auth",
            Domain::Profile => "profile",
            Domain::Events => "events",
            Domain::Admin => "admin",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    None,
    Json,
    Multipart,
}

/// One remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub domain: Domain,
    pub name: &'static str,
    pub method: Method,
    /// Path with `{name}` placeholders, filled in order.
    pub path: &'static str,
    pub authenticated: bool,
    pub body: BodyShape,
    /// A successful response carries a fresh `access_token`.
    pub issues_credential: bool,
}

impl Operation {
    pub const fn new(
        domain: Domain,
        name: &'static str,
        method: Method,
        path: &'static str,
        authenticated: bool,
        body: BodyShape,
    ) -> Self {
        Self {
            domain,
            name,
            method,
            path,
            authenticated,
            body,
            issues_credential: false,
        }
    }

    pub const fn issuing_credential(mut self) -> Self {
        self.issues_credential = true;
        self
    }

    /// `domain.name`, e.g. `events.join`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.domain, self.name)
    }

    /// Placeholder names in the path template, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            names.push(&rest[open + 1..open + close]);
            rest = &rest[open + close + 1..];
        }
        names
    }

    /// Fill the path template. Parameters are percent-encoded exactly as
    /// given and must be non-empty: an empty id would address a different
    /// route.
    pub fn resolve_path(&self, params: &[&str]) -> Result<String> {
        let names = self.path_params();
        if names.len() != params.len() {
            return Err(ClientError::InvalidRequest(format!(
                "{} expects {} path parameter(s) ({}), got {}",
                self.key(),
                names.len(),
                names.join(", "),
                params.len()
            )));
        }

        let mut path = self.path.to_string();
        for (name, value) in names.iter().zip(params) {
            if value.is_empty() {
                return Err(ClientError::InvalidRequest(format!(
                    "{}: path parameter `{}` must not be empty",
                    self.key(),
                    name
                )));
            }
            path = path.replacen(&format!("{{{}}}", name), &urlencoding::encode(value), 1);
        }
        Ok(path)
    }

    fn base_descriptor(&self, params: &[&str], shape: BodyShape) -> Result<RequestDescriptor> {
        if self.body != shape {
            return Err(ClientError::InvalidRequest(format!(
                "{} takes a {:?} body, not {:?}",
                self.key(),
                self.body,
                shape
            )));
        }
        let mut descriptor = RequestDescriptor::new(self.method, self.resolve_path(params)?);
        descriptor.authenticated = self.authenticated;
        descriptor.issues_credential = self.issues_credential;
        Ok(descriptor)
    }

    /// Descriptor for an operation without a body.
    pub fn descriptor(&self, params: &[&str]) -> Result<RequestDescriptor> {
        self.base_descriptor(params, BodyShape::None)
    }

    pub fn json_descriptor<T: Serialize>(
        &self,
        params: &[&str],
        body: &T,
    ) -> Result<RequestDescriptor> {
        self.base_descriptor(params, BodyShape::Json)?.with_json(body)
    }

    pub fn multipart_descriptor(
        &self,
        params: &[&str],
        part: FilePart,
    ) -> Result<RequestDescriptor> {
        Ok(self.base_descriptor(params, BodyShape::Multipart)?.with_file(part))
    }
}

/// Every operation, in display order.
pub const ALL: &[Operation] = &[
    auth::LOGIN,
    auth::REGISTER,
    auth::VERIFY_EMAIL,
    auth::RESEND_VERIFICATION,
    auth::REQUEST_MANUAL_VERIFICATION,
    auth::VERIFY_GRADUATE,
    auth::IMPORT_ALUMNI,
    auth::ADD_ADMIN,
    profile::GET_OWN,
    profile::UPDATE_OWN,
    profile::LIST_ALL,
    profile::GET_BY_ID,
    events::CREATE,
    events::LIST,
    events::GET,
    events::LIST_OWNED,
    events::LIST_OWNED_PENDING,
    events::LIST_JOINED,
    events::UPDATE,
    events::DELETE,
    events::JOIN,
    events::LEAVE,
    events::LIST_PARTICIPANTS,
    admin::UPLOAD_ALLOWED_EMAILS,
    admin::LIST_USERS,
    admin::LIST_BANNED,
    admin::VERIFY_USER,
    admin::UNVERIFY_USER,
    admin::BAN_USER,
    admin::UNBAN_USER,
    admin::LIST_EVENTS,
    admin::APPROVE_EVENT,
    admin::DECLINE_EVENT,
    admin::UNAPPROVE_EVENT,
    admin::EVENT_SETTINGS,
    admin::TOGGLE_AUTO_APPROVE,
];

/// Look up an operation by its `domain.name` key.
pub fn find(key: &str) -> Option<&'static Operation> {
    ALL.iter().find(|op| op.key() == key)
}

/// Request body carrying only an email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

impl EmailRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}
