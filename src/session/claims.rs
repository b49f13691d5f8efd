//! Credential payload decoding
//!
//! The bearer credential is a three-segment token (`header.payload.signature`).
//! Only the payload is read here; the signature is the issuing server's concern.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::display_name::resolve_display_name;
use crate::error::DecodeError;

/// Decoded claim mapping
pub type Claims = serde_json::Map<String, Value>;

/// Claim names that carry the role, in lookup order.
const ROLE_CLAIMS: [&str; 2] = ["userType", "role"];

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input
        .trim_end_matches('=')
        .replace('-', "+")
        .replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Decode the payload segment of a credential into its claim mapping.
pub fn decode_claims(credential: &str) -> Result<Claims, DecodeError> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(DecodeError::Missing);
    }

    let mut segments = credential.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => return Err(DecodeError::Malformed),
    };

    let bytes = base64_decode_url(payload).map_err(DecodeError::Encoding)?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| DecodeError::Json(e.to_string()))?;

    match value {
        Value::Object(claims) => Ok(claims),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Read the `exp` claim (seconds since the epoch) as an instant.
pub fn expiry_of(claims: &Claims) -> Option<DateTime<Utc>> {
    let exp = claims.get("exp")?;
    let seconds = match exp {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp(seconds, 0)
}

/// Account role carried in the credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Volunteer,
}

impl Role {
    /// Parse a role claim value. Only the exact upper-case names are valid.
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "ADMIN" => Some(Role::Admin),
            "VOLUNTEER" => Some(Role::Volunteer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Volunteer => "VOLUNTEER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn role_of(claims: &Claims) -> Result<Role, DecodeError> {
    let raw = ROLE_CLAIMS
        .iter()
        .find_map(|name| claims.get(*name))
        .ok_or(DecodeError::MissingRole)?;

    match raw {
        Value::String(s) => Role::from_claim(s).ok_or_else(|| DecodeError::UnrecognizedRole(s.clone())),
        other => Err(DecodeError::UnrecognizedRole(other.to_string())),
    }
}

/// A session reconstructed from the current credential.
///
/// Never cached: callers decode the stored credential each time they need it.
#[derive(Debug, Clone)]
pub struct Session {
    pub role: Role,
    pub display_name: String,
    pub expiry: Option<DateTime<Utc>>,
}

impl Session {
    /// Decode a credential into a session.
    pub fn decode(credential: &str) -> Result<Self, DecodeError> {
        let claims = decode_claims(credential)?;
        let role = role_of(&claims)?;

        Ok(Self {
            role,
            display_name: resolve_display_name(&claims),
            expiry: expiry_of(&claims),
        })
    }

    /// Decode an optional credential; absence is `DecodeError::Missing`.
    pub fn from_stored(credential: Option<String>) -> Result<Self, DecodeError> {
        match credential {
            Some(token) => Self::decode(&token),
            None => Err(DecodeError::Missing),
        }
    }

    /// Whether the credential's expiry has passed.
    pub fn is_expired(&self) -> bool {
        self.expiry.map(|exp| exp <= Utc::now()).unwrap_or(false)
    }
}

/// Build an unsigned three-segment token from a claim value. Test helper.
#[cfg(test)]
pub fn encode_test_token(claims: &Value) -> String {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.c2lnbmF0dXJl", header, payload)
}
