//! Profile operations.

use serde::Serialize;

use super::{BodyShape, Domain, Operation};
use crate::dispatch::{Method, RequestDescriptor};
use crate::error::Result;

pub const GET_OWN: Operation = Operation::new(
    Domain::Profile,
    "get-own",
    Method::Get,
    "/profile/me",
    true,
    BodyShape::None,
);

pub const UPDATE_OWN: Operation = Operation::new(
    Domain::Profile,
    "update-own",
    Method::Put,
    "/profile/me",
    true,
    BodyShape::Json,
);

pub const LIST_ALL: Operation = Operation::new(
    Domain::Profile,
    "list-all",
    Method::Get,
    "/profile/all",
    true,
    BodyShape::None,
);

pub const GET_BY_ID: Operation = Operation::new(
    Domain::Profile,
    "get-by-id",
    Method::Get,
    "/profile/{id}",
    true,
    BodyShape::None,
);

/// Partial profile update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_location: Option<bool>,
}

pub fn get_own() -> Result<RequestDescriptor> {
    GET_OWN.descriptor(&[])
}

pub fn update_own(update: &ProfileUpdate) -> Result<RequestDescriptor> {
    UPDATE_OWN.json_descriptor(&[], update)
}

pub fn list_all() -> Result<RequestDescriptor> {
    LIST_ALL.descriptor(&[])
}

pub fn get_by_id(user_id: &str) -> Result<RequestDescriptor> {
    GET_BY_ID.descriptor(&[user_id])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RequestBody;
    use serde_json::json;

    #[test]
    fn test_update_sends_only_set_fields() {
        let update = ProfileUpdate {
            biography: Some("Physicist".into()),
            show_location: Some(false),
            ..Default::default()
        };
        let descriptor = update_own(&update).unwrap();
        assert_eq!(descriptor.method, Method::Put);
        assert_eq!(
            descriptor.body,
            RequestBody::Json(json!({"biography": "Physicist", "show_location": false}))
        );
    }

    #[test]
    fn test_get_by_id_path() {
        assert_eq!(get_by_id("u-42").unwrap().path, "/profile/u-42");
        assert!(get_by_id("").is_err());
    }
}
