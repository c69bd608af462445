use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use tracing::{debug, error};

/// How the event log treats repeats of the same event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingPolicy {
    cooldown: Option<Duration>,
}

impl LoggingPolicy {
    /// Write every event
    pub const fn always() -> Self {
        Self { cooldown: None }
    }

    /// Write an event at most once per `cooldown` for the same source and operation
    pub const fn with_cooldown(cooldown: Duration) -> Self {
        Self {
            cooldown: Some(cooldown),
        }
    }

    pub fn cooldown(&self) -> Option<Duration> {
        self.cooldown
    }
}

/// Host event log that accepts error entries
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, source: &str, operation: &str, description: &str, policy: LoggingPolicy);
}

impl<T: ErrorLogger + ?Sized> ErrorLogger for Arc<T> {
    fn log_error(&self, source: &str, operation: &str, description: &str, policy: LoggingPolicy) {
        (**self).log_error(source, operation, description, policy)
    }
}

/// Remembers when each (source, operation) pair was last written
#[derive(Debug, Default)]
pub struct CooldownGate {
    last_written: Mutex<HashMap<(String, String), Instant>>,
}

impl CooldownGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true and records `now` if the pair is outside its cooldown window
    pub fn admit(&self, source: &str, operation: &str, cooldown: Duration, now: Instant) -> bool {
        let mut last_written = self.last_written.lock();
        let key = (source.to_owned(), operation.to_owned());
        match last_written.get(&key) {
            Some(last) if now.saturating_duration_since(*last) < cooldown => false,
            _ => {
                last_written.insert(key, now);
                true
            }
        }
    }
}

/// Event log that writes through `tracing`
#[derive(Debug, Default)]
pub struct TracingEventLog {
    gate: CooldownGate,
}

impl TracingEventLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorLogger for TracingEventLog {
    fn log_error(&self, source: &str, operation: &str, description: &str, policy: LoggingPolicy) {
        if let Some(cooldown) = policy.cooldown() {
            if !self.gate.admit(source, operation, cooldown, Instant::now()) {
                debug!(source, operation, "suppressed repeated event: {description}");
                return;
            }
        }
        error!(source, operation, "{description}");
    }
}
