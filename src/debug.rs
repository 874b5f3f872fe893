use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// JSONL event logger for emission diagnostics. One line per event, keyed by
/// a `"type"` field (`emit.begin`, `emit.page`, `emit.image`, `emit.end`).
#[derive(Clone)]
pub struct DebugLogger {
    inner: Arc<Mutex<BufWriter<File>>>,
}

impl DebugLogger {
    pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(BufWriter::new(file))),
        })
    }

    pub fn log_json(&self, json: &str) {
        if let Ok(mut writer) = self.inner.lock() {
            let _ = writeln!(writer, "{json}");
        }
    }

    pub fn flush(&self) {
        if let Ok(mut writer) = self.inner.lock() {
            let _ = writer.flush();
        }
    }
}

pub(crate) fn json_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn json_escape_handles_quotes_and_control_chars() {
        assert_eq!(json_escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(json_escape("a\\b"), "a\\\\b");
        assert_eq!(json_escape("a\nb\tc"), "a\\nb\\tc");
    }

    #[test]
    fn logger_appends_one_line_per_event() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let path = std::env::temp_dir().join(format!(
            "pdfemit_debug_{}_{}.jsonl",
            std::process::id(),
            nanos
        ));

        let logger = DebugLogger::new(&path).expect("create log");
        logger.log_json("{\"type\":\"emit.begin\",\"pages\":1}");
        logger.log_json("{\"type\":\"emit.end\",\"objects\":4}");
        logger.flush();

        let text = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("emit.begin"));
        assert!(lines[1].contains("emit.end"));
        let _ = std::fs::remove_file(&path);
    }
}
