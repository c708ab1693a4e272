//! Administrative moderation operations.

use serde::Serialize;

use super::{BodyShape, Domain, EmailRequest, Operation};
use crate::dispatch::{FilePart, Method, RequestDescriptor};
use crate::error::Result;

pub const UPLOAD_ALLOWED_EMAILS: Operation = Operation::new(
    Domain::Admin,
    "upload-allowed-emails",
    Method::Post,
    "/admin/upload-allowed-emails",
    true,
    BodyShape::Multipart,
);

pub const LIST_USERS: Operation = Operation::new(
    Domain::Admin,
    "list-users",
    Method::Get,
    "/admin/users",
    true,
    BodyShape::None,
);

pub const LIST_BANNED: Operation = Operation::new(
    Domain::Admin,
    "list-banned",
    Method::Get,
    "/admin/banned",
    true,
    BodyShape::None,
);

pub const VERIFY_USER: Operation = Operation::new(
    Domain::Admin,
    "verify-user",
    Method::Post,
    "/admin/verify",
    true,
    BodyShape::Json,
);

pub const UNVERIFY_USER: Operation = Operation::new(
    Domain::Admin,
    "unverify-user",
    Method::Post,
    "/admin/unverify",
    true,
    BodyShape::Json,
);

pub const BAN_USER: Operation = Operation::new(
    Domain::Admin,
    "ban-user",
    Method::Post,
    "/admin/ban",
    true,
    BodyShape::Json,
);

pub const UNBAN_USER: Operation = Operation::new(
    Domain::Admin,
    "unban-user",
    Method::Post,
    "/admin/unban",
    true,
    BodyShape::Json,
);

pub const LIST_EVENTS: Operation = Operation::new(
    Domain::Admin,
    "list-events",
    Method::Get,
    "/admin/events",
    true,
    BodyShape::None,
);

pub const APPROVE_EVENT: Operation = Operation::new(
    Domain::Admin,
    "approve-event",
    Method::Post,
    "/admin/approve-event",
    true,
    BodyShape::Json,
);

pub const DECLINE_EVENT: Operation = Operation::new(
    Domain::Admin,
    "decline-event",
    Method::Post,
    "/admin/decline-event",
    true,
    BodyShape::Json,
);

pub const UNAPPROVE_EVENT: Operation = Operation::new(
    Domain::Admin,
    "unapprove-event",
    Method::Post,
    "/admin/events/unapprove/{id}",
    true,
    BodyShape::None,
);

pub const EVENT_SETTINGS: Operation = Operation::new(
    Domain::Admin,
    "event-settings",
    Method::Get,
    "/admin/settings/events",
    true,
    BodyShape::None,
);

pub const TOGGLE_AUTO_APPROVE: Operation = Operation::new(
    Domain::Admin,
    "toggle-auto-approve",
    Method::Post,
    "/admin/settings/events/toggle-auto-approve",
    true,
    BodyShape::None,
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventIdRequest {
    pub event_id: String,
}

pub fn upload_allowed_emails(file: FilePart) -> Result<RequestDescriptor> {
    UPLOAD_ALLOWED_EMAILS.multipart_descriptor(&[], file)
}

pub fn list_users() -> Result<RequestDescriptor> {
    LIST_USERS.descriptor(&[])
}

pub fn list_banned() -> Result<RequestDescriptor> {
    LIST_BANNED.descriptor(&[])
}

pub fn verify_user(email: impl Into<String>) -> Result<RequestDescriptor> {
    VERIFY_USER.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn unverify_user(email: impl Into<String>) -> Result<RequestDescriptor> {
    UNVERIFY_USER.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn ban_user(email: impl Into<String>) -> Result<RequestDescriptor> {
    BAN_USER.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn unban_user(email: impl Into<String>) -> Result<RequestDescriptor> {
    UNBAN_USER.json_descriptor(&[], &EmailRequest::new(email))
}

pub fn list_events() -> Result<RequestDescriptor> {
    LIST_EVENTS.descriptor(&[])
}

pub fn approve_event(event_id: impl Into<String>) -> Result<RequestDescriptor> {
    APPROVE_EVENT.json_descriptor(
        &[],
        &EventIdRequest {
            event_id: event_id.into(),
        },
    )
}

pub fn decline_event(event_id: impl Into<String>) -> Result<RequestDescriptor> {
    DECLINE_EVENT.json_descriptor(
        &[],
        &EventIdRequest {
            event_id: event_id.into(),
        },
    )
}

pub fn unapprove_event(event_id: &str) -> Result<RequestDescriptor> {
    UNAPPROVE_EVENT.descriptor(&[event_id])
}

pub fn event_settings() -> Result<RequestDescriptor> {
    EVENT_SETTINGS.descriptor(&[])
}

pub fn toggle_auto_approve() -> Result<RequestDescriptor> {
    TOGGLE_AUTO_APPROVE.descriptor(&[])
}
