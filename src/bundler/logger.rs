//! Build log capability.
//!
//! The build log is the user-facing output channel of a run: streamed tool
//! output, per-target result lines and status updates. It is injected by the
//! caller and treated as a pure sink; the pipeline never reads state back.
//! This is distinct from the `log` facade, which carries internal
//! diagnostics only.

/// Classification of a build log line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineClass {
    /// Command lines and section headers emitted before work starts.
    Initial,
    /// A line from a child process's standard output.
    Stdout,
    /// A line from a child process's standard error, or an error message.
    Stderr,
    /// A final outcome line.
    Result,
}

/// Sink for user-facing build output.
pub trait BuildLog: Send + Sync {
    /// Appends one classified line.
    fn add(&self, text: &str, class: LineClass);

    /// Replaces the current status line, optionally with a progress
    /// percentage in `0..=100`.
    fn status(&self, text: &str, progress: Option<u8>);

    /// Resets the log at the start of a run.
    fn clear(&self);
}

/// Discards all output. Default for library consumers that do not want a log.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLog;

impl BuildLog for NoopLog {
    fn add(&self, _text: &str, _class: LineClass) {}
    fn status(&self, _text: &str, _progress: Option<u8>) {}
    fn clear(&self) {}
}
