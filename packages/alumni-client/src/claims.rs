//! Claim extraction from bearer credentials.
//!
//! The credential is a three-part signed token (`header.payload.signature`).
//! Only the payload is read, and the signature is never checked. The role
//! derived here is advisory: it decides which operations the interface
//! offers, never what the remote service permits. The service remains the
//! only authority on access control.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::session::Role;

/// Claim value marking an administrator credential.
pub const ADMIN_USER_TYPE: &str = "admin";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Why a credential's claims could not be read.
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("expected 3 dot-separated segments, found {0}")]
    Malformed(usize),

    #[error("payload segment is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not a JSON claim object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried in a credential's payload segment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClaimSet {
    #[serde(default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub exp: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClaimSet {
    pub fn is_admin(&self) -> bool {
        self.user_type.as_deref() == Some(ADMIN_USER_TYPE)
    }

    /// Expiry as stated by the token. Advisory only.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let secs = match self.exp.as_ref()? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
            _ => return None,
        };
        DateTime::from_timestamp(secs, 0)
    }
}

/// Decode the payload segment of a credential without verifying it.
pub fn decode_claims(token: &str) -> Result<ClaimSet, ClaimError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClaimError::Malformed(parts.len()));
    }

    let payload = URL_SAFE_LENIENT
        .decode(parts[1])
        .or_else(|_| STANDARD_LENIENT.decode(parts[1]))?;

    Ok(serde_json::from_slice(&payload)?)
}

/// Derive the coarse role for a freshly stored credential.
///
/// Never fails: anything that cannot be decoded resolves to [`Role::Member`].
pub fn extract_role(token: &str) -> Role {
    match decode_claims(token) {
        Ok(claims) if claims.is_admin() => Role::Administrator,
        Ok(_) => Role::Member,
        Err(e) => {
            warn!(error = %e, "Could not read credential claims, assuming member role");
            Role::Member
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

    fn token_with(payload: &str) -> String {
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_admin_claim_yields_administrator() {
        let token = token_with(r#"{"sub":"a@b.com","user_id":"u1","user_type":"admin"}"#);
        assert_eq!(extract_role(&token), Role::Administrator);
    }

    #[test]
    fn test_alumni_claim_yields_member() {
        let token = token_with(r#"{"sub":"a@b.com","user_type":"alumni"}"#);
        assert_eq!(extract_role(&token), Role::Member);
    }

    #[test]
    fn test_missing_claim_yields_member() {
        assert_eq!(extract_role(&token_with(r#"{"sub":"a@b.com"}"#)), Role::Member);
    }

    #[test]
    fn test_role_marker_is_case_sensitive() {
        assert_eq!(extract_role(&token_with(r#"{"user_type":"Admin"}"#)), Role::Member);
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(matches!(decode_claims("a.b"), Err(ClaimError::Malformed(2))));
        assert!(matches!(decode_claims("a.b.c.d"), Err(ClaimError::Malformed(4))));
        assert_eq!(extract_role("not-a-token"), Role::Member);
    }

    #[test]
    fn test_bad_base64_yields_member() {
        assert!(matches!(decode_claims("h.!!!.s"), Err(ClaimError::Base64(_))));
        assert_eq!(extract_role("h.!!!.s"), Role::Member);
    }

    #[test]
    fn test_non_object_payload_yields_member() {
        let token = token_with("[1,2,3]");
        assert!(matches!(decode_claims(&token), Err(ClaimError::Json(_))));
        assert_eq!(extract_role(&token), Role::Member);
    }

    #[test]
    fn test_padded_standard_alphabet_is_accepted() {
        let token = format!("h.{}.s", STANDARD.encode(r#"{"user_type":"admin"}"#));
        assert_eq!(extract_role(&token), Role::Administrator);
    }

    #[test]
    fn test_expiry_is_read_when_present() {
        let claims = decode_claims(&token_with(r#"{"exp":1700000000}"#)).unwrap();
        assert_eq!(claims.expires_at().unwrap().timestamp(), 1_700_000_000);

        let claims = decode_claims(&token_with(r#"{"exp":"soon"}"#)).unwrap();
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_unknown_claims_are_kept() {
        let claims = decode_claims(&token_with(r#"{"user_type":"alumni","iss":"x"}"#)).unwrap();
        assert_eq!(claims.extra.get("iss"), Some(&Value::String("x".into())));
    }
}
