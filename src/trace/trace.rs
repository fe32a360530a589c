use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One JSONL trace record: what a script line did, how long it took, and
/// the tree fingerprint observed just before it ran.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub line: usize,

    pub call: String,
    pub path: String,

    pub status: Option<String>,
    pub detail: Option<String>,

    pub elapsed_ms: Option<u128>,
    pub tree_fingerprint: Option<String>,
}

impl TraceEvent {
    pub fn now(line: usize, call: &str, path: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            line,
            call: call.to_string(),
            path: path.to_string(),
            status: None,
            detail: None,
            elapsed_ms: None,
            tree_fingerprint: None,
        }
    }

    pub fn with_status(mut self, status: impl ToString) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_elapsed(mut self, elapsed_ms: u128) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl ToString) -> Self {
        self.tree_fingerprint = Some(fingerprint.to_string());
        self
    }
}
