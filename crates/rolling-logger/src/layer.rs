//! Tracing layer feeding the rolling file and the in-memory ring buffer

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::rolling_file::RollingFile;

/// Shared destination for formatted log lines
pub struct LogSink {
    capacity: usize,
    buffer: Mutex<VecDeque<String>>,
    file: Mutex<Option<RollingFile>>,
}

impl LogSink {
    pub fn new(capacity: usize, file: Option<RollingFile>) -> Self {
        Self {
            capacity: capacity.max(1),
            buffer: Mutex::new(VecDeque::with_capacity(capacity.max(1))),
            file: Mutex::new(file),
        }
    }

    pub fn push(&self, line: String) {
        if let Ok(mut file) = self.file.lock() {
            if let Some(file) = file.as_mut() {
                // Nowhere to report a failing log file; the buffer still has the line.
                let _ = file.write_line(&line);
                let _ = file.flush();
            }
        }

        let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        if buffer.len() == self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(line);
    }

    /// Most recent lines, oldest first
    pub fn recent(&self) -> Vec<String> {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        buffer.iter().cloned().collect()
    }
}

pub struct RollingLayer {
    sink: Arc<LogSink>,
}

impl RollingLayer {
    pub fn new(sink: Arc<LogSink>) -> Self {
        Self { sink }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let target = visitor
            .log_target
            .take()
            .unwrap_or_else(|| metadata.target().to_string());

        let line = format!(
            "{} [{}] {}: {}{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            metadata.level(),
            target,
            visitor.message,
            visitor.fields,
        );
        self.sink.push(line);
    }
}

/// Collects the message plus any structured fields of an event.
///
/// Events bridged from the `log` crate carry `log.*` metadata fields; only
/// `log.target` is kept, as the line's target.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
    log_target: Option<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message.push_str(value),
            "log.target" => self.log_target = Some(value.to_string()),
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => {
                let _ = write!(self.message, "{:?}", value);
            }
            name if name.starts_with("log.") => {}
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture<F: FnOnce()>(sink: Arc<LogSink>, f: F) {
        let subscriber = tracing_subscriber::registry().with(RollingLayer::new(sink));
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_formats_message_and_fields() {
        let sink = Arc::new(LogSink::new(8, None));
        capture(sink.clone(), || {
            tracing::info!(category = "fire", "checklist saved");
        });

        let lines = sink.recent();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("[INFO]"));
        assert!(lines[0].contains("checklist saved category=fire"));
    }

    #[test]
    fn test_ring_buffer_keeps_latest() {
        let sink = Arc::new(LogSink::new(2, None));
        capture(sink.clone(), || {
            tracing::warn!("one");
            tracing::warn!("two");
            tracing::warn!("three");
        });

        let lines = sink.recent();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("two"));
        assert!(lines[1].ends_with("three"));
    }

    #[test]
    fn test_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = RollingFile::open(dir.path(), "App", 4096).unwrap();
        let path = file.path();
        let sink = Arc::new(LogSink::new(8, Some(file)));
        capture(sink, || {
            tracing::error!("disk full");
        });

        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("[ERROR]"));
        assert!(content.contains("disk full"));
    }
}
