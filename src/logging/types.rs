//! Core logging types: collector entries, status, and the [`Log`] trait.

/// Collector result for summary reporting.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Human-readable collector name.
    pub name: String,
    /// Final status of the collector.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Collector captured its data.
    Ok,
    /// Source data was absent; nothing was backed up.
    Skipped,
    /// Collector hit an unexpected error.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation;
/// collectors and the restorer log through `&dyn Log` so tests can swap in
/// their own.
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a completed step.
    fn success(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Record a collector result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
