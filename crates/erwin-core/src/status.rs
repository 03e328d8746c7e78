//! Status line message sink.

use std::time::{Duration, Instant};

/// Default display time of a status message.
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(5);

/// The single status message shown under the status bar.
#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
    set_at: Option<Instant>,
    timeout: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(DEFAULT_STATUS_TIMEOUT)
    }
}

impl StatusLine {
    /// Create an empty status line whose messages expire after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            message: String::new(),
            set_at: None,
            timeout,
        }
    }

    /// Replace the message.
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.set_at = Some(Instant::now());
    }

    /// Clear the message.
    pub fn clear(&mut self) {
        self.message.clear();
        self.set_at = None;
    }

    /// The last message, expired or not.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message if it is non-empty and was set less than `timeout` before `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        let set_at = self.set_at?;
        (!self.message.is_empty() && now.saturating_duration_since(set_at) < self.timeout)
            .then_some(self.message.as_str())
    }

    /// [`visible_at`](Self::visible_at) for the current instant.
    pub fn visible(&self) -> Option<&str> {
        self.visible_at(Instant::now())
    }
}
