//! Result normalization for display.
//!
//! Every operation renders through [`present`], so callers have a single
//! display path whatever produced the outcome.

use serde::Serialize;
use serde_json::Value;

use crate::dispatch::Outcome;

/// Text and error flag handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayResult {
    pub text: String,
    pub is_error: bool,
}

pub fn present(outcome: &Outcome) -> DisplayResult {
    match outcome {
        Outcome::Success { payload } => DisplayResult {
            text: render_value(payload),
            is_error: false,
        },
        Outcome::ServiceError { payload, message, .. } => DisplayResult {
            text: if is_structured(payload) {
                render_value(payload)
            } else {
                message.clone()
            },
            is_error: true,
        },
        Outcome::PreconditionError { message } => DisplayResult {
            text: message.clone(),
            is_error: true,
        },
        Outcome::TransportError { message } => {
            let message = if message.is_empty() {
                "Unknown error"
            } else {
                message.as_str()
            };
            DisplayResult {
                text: format!("Error: {}", message),
                is_error: true,
            }
        }
    }
}

fn is_structured(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Pretty JSON for objects and arrays, raw text for scalars.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NO_CREDENTIAL_MESSAGE;
    use serde_json::json;

    #[test]
    fn test_success_object_is_pretty_printed() {
        let display = present(&Outcome::Success {
            payload: json!({"access_token": "h.e.s"}),
        });
        assert!(!display.is_error);
        assert_eq!(display.text, "{\n  \"access_token\": \"h.e.s\"\n}");
    }

    #[test]
    fn test_success_string_is_raw() {
        let display = present(&Outcome::Success {
            payload: json!("Event deleted"),
        });
        assert_eq!(display.text, "Event deleted");
        assert!(!display.is_error);
    }

    #[test]
    fn test_success_number_and_null() {
        assert_eq!(present(&Outcome::Success { payload: json!(3) }).text, "3");
        assert_eq!(present(&Outcome::Success { payload: Value::Null }).text, "null");
    }

    #[test]
    fn test_service_error_shows_payload_verbatim() {
        let payload = json!({"detail": "invalid credentials"});
        let display = present(&Outcome::ServiceError {
            status_code: 401,
            payload: payload.clone(),
            message: "invalid credentials".into(),
        });
        assert!(display.is_error);
        assert_eq!(display.text, serde_json::to_string_pretty(&payload).unwrap());
    }

    #[test]
    fn test_service_error_scalar_payload_uses_message() {
        let display = present(&Outcome::ServiceError {
            status_code: 500,
            payload: json!("oops"),
            message: "HTTP 500".into(),
        });
        assert_eq!(display.text, "HTTP 500");
        assert!(display.is_error);
    }

    #[test]
    fn test_precondition_error() {
        let display = present(&Outcome::no_credential());
        assert_eq!(display.text, NO_CREDENTIAL_MESSAGE);
        assert!(display.is_error);
    }

    #[test]
    fn test_transport_error_prefix_and_fallback() {
        let display = present(&Outcome::TransportError {
            message: "connection refused".into(),
        });
        assert_eq!(display.text, "Error: connection refused");
        assert!(display.is_error);

        let empty = present(&Outcome::TransportError { message: String::new() });
        assert_eq!(empty.text, "Error: Unknown error");
    }

    #[test]
    fn test_only_success_is_not_an_error() {
        let outcomes = [
            Outcome::Success { payload: json!([]) },
            Outcome::ServiceError {
                status_code: 400,
                payload: json!({}),
                message: "HTTP 400".into(),
            },
            Outcome::TransportError { message: "x".into() },
            Outcome::no_credential(),
        ];
        for outcome in &outcomes {
            assert_eq!(present(outcome).is_error, !outcome.is_success());
        }
    }
}
