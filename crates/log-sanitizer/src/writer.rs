//! [`MakeWriter`] adapter that sanitizes every formatted log line before it
//! reaches the underlying sink.
//!
//! Lines that parse as a JSON object (the `json` fmt layer) are redacted
//! structurally with [`sanitize_record`]; anything else goes through
//! [`sanitize_text`].

use std::io::{self, Write};

use serde_json::Value;
use tracing_subscriber::fmt::MakeWriter;

use crate::text::sanitize_text;
use crate::value::sanitize_record;

/// Buffers writes and emits each complete line in sanitized form.
///
/// A trailing partial line is emitted on [`flush`](Write::flush) or drop.
pub struct SanitizingWriter<W: Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: Write> SanitizingWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn emit(&mut self, line: &[u8]) -> io::Result<()> {
        let text = String::from_utf8_lossy(line);
        let sanitized = sanitize_line(&text);
        self.inner.write_all(sanitized.as_bytes())
    }
}

impl<W: Write> Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            self.emit(&line)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.emit(&rest)?;
        }
        self.inner.flush()
    }
}

impl<W: Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Wraps another [`MakeWriter`] so every writer it hands out sanitizes.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    /// Wrap `inner`, e.g. `std::io::stderr`.
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

/// Sanitize one rendered line, keeping its line terminator.
pub fn sanitize_line(line: &str) -> String {
    let (body, terminator) = match line.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (line, ""),
    };

    if body.trim_start().starts_with('{') {
        if let Ok(record @ Value::Object(_)) = serde_json::from_str::<Value>(body) {
            let cleaned = sanitize_record(&record);
            if let Ok(rendered) = serde_json::to_string(&cleaned) {
                return rendered + terminator;
            }
        }
    }

    sanitize_text(body) + terminator
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn write_through(chunks: &[&str]) -> String {
        let mut output = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut output);
            for chunk in chunks {
                writer.write_all(chunk.as_bytes()).unwrap();
            }
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn plain_line_passes_through() {
        assert_eq!(write_through(&["hello world\n"]), "hello world\n");
    }

    #[test]
    fn text_line_is_sanitized() {
        assert_eq!(
            write_through(&["retrying with token=abc123\n"]),
            "retrying with token=[REDACTED]\n"
        );
    }

    #[test]
    fn line_split_across_writes_is_sanitized_whole() {
        assert_eq!(
            write_through(&["password", "=hun", "ter2\nnext\n"]),
            "password=[REDACTED]\nnext\n"
        );
    }

    #[test]
    fn partial_line_is_flushed_on_drop() {
        assert_eq!(write_through(&["secret: abc"]), "secret: [REDACTED]");
    }

    #[test]
    fn json_line_is_sanitized_structurally() {
        let line = r#"{"level":"INFO","fields":{"message":"stored","password":"hunter2","user":"alice"}}"#;
        let out = write_through(&[line, "\n"]);
        assert!(out.ends_with('\n'));
        let parsed: Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(parsed["fields"]["password"], "[REDACTED]");
        assert_eq!(parsed["fields"]["user"], "alice");
        assert_eq!(parsed["fields"]["message"], "stored");
    }

    #[test]
    fn json_message_text_is_scrubbed() {
        let line = r#"{"fields":{"message":"upstream said Bearer eyJhbGciOiJIUzI1NiJ9.e30.abc123"}}"#;
        let out = sanitize_line(line);
        assert!(!out.contains("eyJhbGci"), "got: {out}");
        assert!(out.contains("Bearer [REDACTED]"));
    }

    #[test]
    fn pretty_record_is_scrubbed_line_by_line() {
        let record = concat!(
            "  2026-10-19T10:00:00.000000Z  WARN token_vault::cli: login rejected, password: \"hunter2\"\n",
            "    at crates/token-vault/src/cli.rs:73\n",
            "    with api_key=sk-live-123 client_secret: abc\n",
        );
        let out = write_through(&[record]);
        assert!(!out.contains("hunter2"), "got: {out}");
        assert!(!out.contains("sk-live-123"), "got: {out}");
        assert!(out.contains("password: [REDACTED]"));
        assert!(out.contains("api_key=[REDACTED]"));
        assert!(out.contains("client_secret: [REDACTED]"));
        assert!(out.contains("    at crates/token-vault/src/cli.rs:73\n"));
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn malformed_json_falls_back_to_text() {
        assert_eq!(sanitize_line("{token=abc"), "{token=[REDACTED]");
    }

    #[derive(Clone)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn make_writer_wraps_each_writer() {
        let shared = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
        let sink = shared.clone();
        let make_writer = SanitizingMakeWriter::new(move || sink.clone());

        {
            let mut writer = make_writer.make_writer();
            writer.write_all(b"api_key=sk-123\n").unwrap();
        }

        let output = String::from_utf8(shared.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output, "api_key=[REDACTED]\n");
    }

    #[test]
    fn subscriber_output_is_sanitized() {
        let shared = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
        let sink = shared.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(SanitizingMakeWriter::new(move || sink.clone()))
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(password = "hunter2", "login attempt");
        });

        let output = String::from_utf8(shared.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("login attempt"), "got: {output}");
        assert!(!output.contains("hunter2"), "got: {output}");
        assert!(output.contains("[REDACTED]"));
    }
}
