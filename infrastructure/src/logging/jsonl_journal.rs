//! JSONL file writer for call events.
//!
//! Each [`CallEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer. The
//! file is opened in append mode so one journal spans many invocations of
//! the binary.

use bridge_application::ports::call_journal::{CallEvent, CallJournal};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// JSONL call journal that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every record and
/// on `Drop`.
pub struct JsonlCallJournal {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlCallJournal {
    /// Open (or create) the journal at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CallJournal for JsonlCallJournal {
    fn record(&self, event: CallEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match event.payload {
            Value::Object(mut map) => {
                map.insert("type".to_string(), Value::String(event.event_type.to_string()));
                map.insert("timestamp".to_string(), Value::String(timestamp));
                Value::Object(map)
            }
            other => json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": other,
            }),
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlCallJournal {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_journal_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("calls.jsonl");
        let journal = JsonlCallJournal::open(&path).unwrap();
        assert_eq!(journal.path(), path);

        journal.record(CallEvent::new(
            "tool_call",
            json!({
                "tool": "stub_Greeter_greet",
                "mode": "read",
                "status": "ok",
                "argument_names": ["name"],
            }),
        ));
        journal.record(CallEvent::new("catalog_built", json!({"tools": 4})));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "tool_call");
        assert_eq!(lines[0]["tool"], "stub_Greeter_greet");
        assert_eq!(lines[0]["argument_names"], json!(["name"]));
        assert_eq!(lines[1]["tools"], 4);
    }

    #[test]
    fn test_journal_appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.jsonl");

        for status in ["ok", "refused"] {
            let journal = JsonlCallJournal::open(&path).unwrap();
            journal.record(CallEvent::new("tool_call", json!({"status": status})));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["status"], "refused");
    }

    #[test]
    fn test_journal_wraps_non_object_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calls.jsonl");
        let journal = JsonlCallJournal::open(&path).unwrap();

        journal.record(CallEvent::new("note", json!("just a string")));
        drop(journal);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlCallJournal::open(blocker.join("calls.jsonl")).is_err());
    }
}
