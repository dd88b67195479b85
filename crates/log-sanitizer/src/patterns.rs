//! Sensitive field names, secret-shaped value patterns, and redaction markers.
//!
//! Matching is heuristic: a value that merely looks like a token is redacted,
//! and a secret in an unrecognised shape passes through.

use std::sync::LazyLock;

use regex::Regex;

/// Case-insensitive substrings that mark a field name as sensitive.
pub const SENSITIVE_KEY_PATTERNS: &[&str] = &[
    "password",
    "secret",
    "token",
    "key",
    "authorization",
    "apikey",
    "api_key",
    "access_token",
    "refresh_token",
    "jwt_secret",
    "encryption_key",
    "private_key",
    "client_secret",
    "database_url",
];

/// Replaces the whole value of a sensitive field.
pub const REDACTED: &str = "[REDACTED]";

/// Replaces a string value shaped like a signed bearer token.
pub const REDACTED_JWT: &str = "[REDACTED: JWT Token]";

/// Replaces a string value containing a long hex run.
pub const REDACTED_SECRET_KEY: &str = "[REDACTED: Secret Key]";

/// Replaces a long hex run inside free-form text.
pub const REDACTED_SECRET: &str = "[REDACTED: Secret]";

/// Returned in place of any value nested deeper than the traversal bound.
pub const MAX_DEPTH_REACHED: &str = "[Max depth reached]";

/// Three base64url segments separated by dots.
const JWT_SHAPE: &str = r"[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+";

pub(crate) static JWT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"\b{JWT_SHAPE}")));

pub(crate) static HEX_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b[0-9A-Fa-f]{32,}\b"));

pub(crate) static BEARER_JWT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"(?i)\bbearer\s+{JWT_SHAPE}")));

/// `<name><sep><value>` for every sensitive name.
///
/// Groups: `name`, `sep`, optional `scheme` (an auth scheme word that is
/// kept), and `value`. A value that is already a bracketed marker is matched
/// as one unit so it is not split at its inner space.
pub(crate) static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = SENSITIVE_KEY_PATTERNS.to_vec();
    // Leftmost-first alternation: longer names must win at the same offset.
    names.sort_by(|a, b| b.len().cmp(&a.len()));
    let names = names
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(
        r"(?i)(?P<name>{names})(?P<sep>\s*[:=]\s*)(?P<scheme>(?:bearer|basic)\s+)?(?P<value>\[REDACTED[^\]]*\]|[^\s,}}]+)"
    ))
});

/// Returns `true` if `key` contains any [`SENSITIVE_KEY_PATTERNS`] entry,
/// ignoring ASCII case.
pub fn is_sensitive_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    SENSITIVE_KEY_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

// Built-in patterns only; `all_patterns_compile` covers every one of them.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in redaction pattern must compile")
}
