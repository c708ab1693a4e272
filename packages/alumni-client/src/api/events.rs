//! Event and membership operations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BodyShape, Domain, Operation};
use crate::dispatch::{Method, RequestDescriptor};
use crate::error::Result;

pub const CREATE: Operation = Operation::new(
    Domain::Events,
    "create",
    Method::Post,
    "/events/",
    true,
    BodyShape::Json,
);

pub const LIST: Operation = Operation::new(
    Domain::Events,
    "list",
    Method::Get,
    "/events/",
    false,
    BodyShape::None,
);

pub const GET: Operation = Operation::new(
    Domain::Events,
    "get",
    Method::Get,
    "/events/{id}",
    true,
    BodyShape::None,
);

pub const LIST_OWNED: Operation = Operation::new(
    Domain::Events,
    "list-owned",
    Method::Get,
    "/events/owner",
    true,
    BodyShape::None,
);

/// Owned events still waiting for admin approval.
pub const LIST_OWNED_PENDING: Operation = Operation::new(
    Domain::Events,
    "list-owned-pending",
    Method::Get,
    "/events/owner/pending",
    true,
    BodyShape::None,
);

pub const LIST_JOINED: Operation = Operation::new(
    Domain::Events,
    "list-joined",
    Method::Get,
    "/events/participant",
    true,
    BodyShape::None,
);

pub const UPDATE: Operation = Operation::new(
    Domain::Events,
    "update",
    Method::Put,
    "/events/{id}",
    true,
    BodyShape::Json,
);

pub const DELETE: Operation = Operation::new(
    Domain::Events,
    "delete",
    Method::Delete,
    "/events/{id}",
    true,
    BodyShape::None,
);

pub const JOIN: Operation = Operation::new(
    Domain::Events,
    "join",
    Method::Post,
    "/events/{id}/participants",
    true,
    BodyShape::None,
);

pub const LEAVE: Operation = Operation::new(
    Domain::Events,
    "leave",
    Method::Delete,
    "/events/{id}/participants",
    true,
    BodyShape::None,
);

pub const LIST_PARTICIPANTS: Operation = Operation::new(
    Domain::Events,
    "list-participants",
    Method::Get,
    "/events/{id}/participants",
    true,
    BodyShape::None,
);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Serialized as ISO-8601.
    pub datetime: DateTime<Utc>,
    pub cost: f64,
    pub is_online: bool,
    /// Sent as `null` when absent.
    pub cover: Option<String>,
}

/// Partial event update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

pub fn create(event: &NewEvent) -> Result<RequestDescriptor> {
    CREATE.json_descriptor(&[], event)
}

pub fn list() -> Result<RequestDescriptor> {
    LIST.descriptor(&[])
}

pub fn get(event_id: &str) -> Result<RequestDescriptor> {
    GET.descriptor(&[event_id])
}

pub fn list_owned() -> Result<RequestDescriptor> {
    LIST_OWNED.descriptor(&[])
}

pub fn list_owned_pending() -> Result<RequestDescriptor> {
    LIST_OWNED_PENDING.descriptor(&[])
}

pub fn list_joined() -> Result<RequestDescriptor> {
    LIST_JOINED.descriptor(&[])
}

pub fn update(event_id: &str, update: &EventUpdate) -> Result<RequestDescriptor> {
    UPDATE.json_descriptor(&[event_id], update)
}

pub fn delete(event_id: &str) -> Result<RequestDescriptor> {
    DELETE.descriptor(&[event_id])
}

pub fn join(event_id: &str) -> Result<RequestDescriptor> {
    JOIN.descriptor(&[event_id])
}

pub fn leave(event_id: &str) -> Result<RequestDescriptor> {
    LEAVE.descriptor(&[event_id])
}

pub fn list_participants(event_id: &str) -> Result<RequestDescriptor> {
    LIST_PARTICIPANTS.descriptor(&[event_id])
}
