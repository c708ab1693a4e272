use serde_json::Value;

/// Message for an authenticated request attempted without a credential.
pub const NO_CREDENTIAL_MESSAGE: &str = "no credential available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    ServiceError,
    TransportError,
    PreconditionError,
}

/// Uniform result of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx with a JSON body.
    Success { payload: Value },
    /// Non-2xx with a JSON body, as reported by the service.
    ServiceError {
        status_code: u16,
        payload: Value,
        message: String,
    },
    /// Network failure or a body that is not JSON.
    TransportError { message: String },
    /// Authenticated request with no stored credential. Nothing was sent.
    PreconditionError { message: String },
}

impl Outcome {
    pub fn no_credential() -> Self {
        Outcome::PreconditionError {
            message: NO_CREDENTIAL_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            Outcome::Success { .. } => OutcomeStatus::Success,
            Outcome::ServiceError { .. } => OutcomeStatus::ServiceError,
            Outcome::TransportError { .. } => OutcomeStatus::TransportError,
            Outcome::PreconditionError { .. } => OutcomeStatus::PreconditionError,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success { payload } | Outcome::ServiceError { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::ServiceError { message, .. }
            | Outcome::TransportError { message }
            | Outcome::PreconditionError { message } => Some(message),
        }
    }

    /// `access_token` from a successful authentication response.
    pub fn access_token(&self) -> Option<&str> {
        match self {
            Outcome::Success { payload } => payload.get("access_token")?.as_str(),
            _ => None,
        }
    }
}

/// Summarize a service error body.
///
/// Prefers `detail` (a string, or a list of validation errors carrying `msg`),
/// then `message`, then falls back to the status code.
pub fn service_error_message(status_code: u16, payload: &Value) -> String {
    match payload.get("detail") {
        Some(Value::String(detail)) => return detail.clone(),
        Some(Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !msgs.is_empty() {
                return msgs.join("; ");
            }
        }
        _ => {}
    }

    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    format!("HTTP {}", status_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_string() {
        let msg = service_error_message(401, &json!({"detail": "invalid credentials"}));
        assert_eq!(msg, "invalid credentials");
    }

    #[test]
    fn test_validation_detail_list() {
        let payload = json!({"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "password"], "msg": "field required"}
        ]});
        assert_eq!(
            service_error_message(422, &payload),
            "value is not a valid email address; field required"
        );
    }

    #[test]
    fn test_message_then_status_fallback() {
        assert_eq!(service_error_message(500, &json!({"message": "boom"})), "boom");
        assert_eq!(service_error_message(404, &json!(["x"])), "HTTP 404");
        assert_eq!(service_error_message(400, &json!({"detail": []})), "HTTP 400");
    }

    #[test]
    fn test_accessors() {
        let ok = Outcome::Success {
            payload: json!({"access_token": "h.e.s", "token_type": "bearer"}),
        };
        assert_eq!(ok.status(), OutcomeStatus::Success);
        assert_eq!(ok.access_token(), Some("h.e.s"));
        assert_eq!(ok.message(), None);

        let pre = Outcome::no_credential();
        assert_eq!(pre.status(), OutcomeStatus::PreconditionError);
        assert_eq!(pre.payload(), None);
        assert_eq!(pre.message(), Some(NO_CREDENTIAL_MESSAGE));
        assert_eq!(pre.access_token(), None);
    }
}
