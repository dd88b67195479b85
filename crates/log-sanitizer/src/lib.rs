//! Secret redaction for log output.
//!
//! Two independent algorithms:
//!
//! - [`sanitize_value`] walks a structured record and replaces the values of
//!   sensitive fields (and JWT / hex-shaped strings) with markers.
//! - [`sanitize_text`] rewrites free-form text such as rendered log lines and
//!   error messages.
//!
//! [`SanitizingMakeWriter`] plugs both into a `tracing_subscriber` fmt layer
//! so nothing reaches a sink unsanitized.
//!
//! All functions are pure and safe to call from any thread.

pub mod patterns;
pub mod text;
pub mod value;
pub mod writer;

pub use patterns::{is_sensitive_key, SENSITIVE_KEY_PATTERNS};
pub use text::sanitize_text;
pub use value::{sanitize_record, sanitize_value, MAX_DEPTH};
pub use writer::{sanitize_line, SanitizingMakeWriter, SanitizingWriter};
