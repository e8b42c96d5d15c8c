//! One-way progress notifications from a running job to its caller

use tokio::sync::mpsc;

/// A single progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Emits progress events without ever waiting on the receiver.
///
/// A dropped receiver is not an error; events are simply discarded.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    tx: Option<mpsc::UnboundedSender<Progress>>,
}

impl ProgressReporter {
    pub fn new(tx: mpsc::UnboundedSender<Progress>) -> Self {
        Self { tx: Some(tx) }
    }

    /// A reporter nobody listens to
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn emit(&self, current: usize, total: usize, message: impl Into<String>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Progress {
                current,
                total,
                message: message.into(),
            });
        }
    }
}
