//! Display-name resolution over decoded claims
//!
//! Issuers put the user's name in many differently-named claims. Rather than
//! probing ad hoc, the candidates are an explicit ordered list of rules; the
//! first rule that yields a non-empty value wins.

use serde_json::Value;

use super::claims::Claims;

/// Fallback when no claim carries a usable name.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Keys under which issuers nest additional name claims.
const EXTRA_CLAIM_KEYS: [&str; 3] = ["extraClaims", "extraclaims", "ExtraClaims"];

/// A single extraction rule: a pure function from claims to an optional name.
#[derive(Clone, Copy)]
pub struct DisplayNameRule {
    pub name: &'static str,
    pub extract: fn(&Claims) -> Option<String>,
}

/// Rules in priority order: nested extra claims first, then top-level claims.
pub const DISPLAY_NAME_RULES: &[DisplayNameRule] = &[
    DisplayNameRule { name: "extra.name", extract: |c| text(extra(c)?, "name") },
    DisplayNameRule { name: "extra.fullName", extract: |c| text(extra(c)?, "fullName") },
    DisplayNameRule { name: "extra.firstName+lastName", extract: |c| full_name(extra(c)?) },
    DisplayNameRule { name: "extra.firstName", extract: |c| text(extra(c)?, "firstName") },
    DisplayNameRule { name: "extra.username", extract: |c| text(extra(c)?, "username") },
    DisplayNameRule { name: "extra.userName", extract: |c| text(extra(c)?, "userName") },
    DisplayNameRule { name: "extra.email", extract: |c| text(extra(c)?, "email") },
    DisplayNameRule { name: "name", extract: |c| text(c, "name") },
    DisplayNameRule { name: "fullName", extract: |c| text(c, "fullName") },
    DisplayNameRule { name: "firstName+lastName", extract: full_name },
    DisplayNameRule { name: "firstName", extract: |c| text(c, "firstName") },
    DisplayNameRule { name: "username", extract: |c| text(c, "username") },
    DisplayNameRule { name: "userName", extract: |c| text(c, "userName") },
    DisplayNameRule { name: "email", extract: |c| text(c, "email") },
    DisplayNameRule { name: "sub", extract: |c| text(c, "sub") },
];

/// The nested extra-claims object, if any of its aliases is present.
fn extra(claims: &Claims) -> Option<&Claims> {
    EXTRA_CLAIM_KEYS
        .iter()
        .find_map(|key| claims.get(*key).and_then(Value::as_object))
}

/// A claim as non-empty text. Numbers are stringified; other types are skipped.
fn text(claims: &Claims, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `firstName lastName`, trimmed, when either part is present.
fn full_name(claims: &Claims) -> Option<String> {
    let first = text(claims, "firstName");
    let last = text(claims, "lastName");
    if first.is_none() && last.is_none() {
        return None;
    }

    let joined = format!(
        "{} {}",
        first.unwrap_or_default(),
        last.unwrap_or_default()
    );
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Resolve a human label for the session holder.
///
/// Email-shaped winners are cut to their local part.
pub fn resolve_display_name(claims: &Claims) -> String {
    let winner = DISPLAY_NAME_RULES
        .iter()
        .find_map(|rule| (rule.extract)(claims));

    match winner {
        Some(name) => match name.split_once('@') {
            Some((local, _)) => local.to_string(),
            None => name,
        },
        None => FALLBACK_DISPLAY_NAME.to_string(),
    }
}
