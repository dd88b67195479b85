//! Pattern rewriting of free-form log text.

use regex::Captures;

use crate::patterns::{BEARER_JWT_RE, HEX_RUN_RE, KEY_VALUE_RE, REDACTED, REDACTED_SECRET};

/// Rewrite secrets inside a rendered log line or error message.
///
/// Rewrites are applied in order, each to the output of the previous one:
///
/// 1. `Bearer <jwt>` becomes `Bearer [REDACTED]`.
/// 2. A standalone hex run of 32 or more digits becomes `[REDACTED: Secret]`.
/// 3. `<name>:<value>` / `<name>=<value>` for any sensitive name becomes
///    `<name>:[REDACTED]`, keeping the name and separator as written.
pub fn sanitize_text(input: &str) -> String {
    let text = BEARER_JWT_RE.replace_all(input, format!("Bearer {REDACTED}"));
    let text = HEX_RUN_RE.replace_all(&text, REDACTED_SECRET);
    let text = KEY_VALUE_RE.replace_all(&text, |caps: &Captures<'_>| {
        let scheme = caps.name("scheme").map_or("", |m| m.as_str());
        format!("{}{}{scheme}{REDACTED}", &caps["name"], &caps["sep"])
    });
    text.into_owned()
}
