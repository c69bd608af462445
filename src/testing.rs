//! Recording and failing host services for tests

use color_eyre::eyre::{eyre, Result};
use parking_lot::Mutex;

use crate::{
    host::{
        config::ConfigLookup,
        event_log::{ErrorLogger, LoggingPolicy},
        views::ViewRenderer,
    },
    widget::ViewModel,
};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub source: String,
    pub operation: String,
    pub description: String,
    pub policy: LoggingPolicy,
}

#[derive(Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }
}

impl ErrorLogger for RecordingLog {
    fn log_error(&self, source: &str, operation: &str, description: &str, policy: LoggingPolicy) {
        self.entries.lock().push(LogEntry {
            source: source.to_owned(),
            operation: operation.to_owned(),
            description: description.to_owned(),
            policy,
        });
    }
}

#[derive(Default)]
pub struct RecordingViews {
    models: Mutex<Vec<ViewModel>>,
}

impl RecordingViews {
    pub fn last_model(&self) -> Option<ViewModel> {
        self.models.lock().last().cloned()
    }

    pub fn render_count(&self) -> usize {
        self.models.lock().len()
    }
}

impl ViewRenderer for RecordingViews {
    fn render_view(&self, template: &str, model: &ViewModel) -> Result<String> {
        self.models.lock().push(model.clone());
        Ok(format!("rendered {template}"))
    }
}

pub struct PanickingLog;

impl ErrorLogger for PanickingLog {
    fn log_error(&self, _source: &str, _operation: &str, _description: &str, _policy: LoggingPolicy) {
        panic!("event log unavailable")
    }
}

pub struct PanickingViews;

impl ViewRenderer for PanickingViews {
    fn render_view(&self, _template: &str, _model: &ViewModel) -> Result<String> {
        panic!("template engine crashed")
    }
}

pub struct BrokenConfig;

impl ConfigLookup for BrokenConfig {
    fn value(&self, _key: &str) -> Result<Option<String>> {
        Err(eyre!("configuration store unavailable"))
    }
}
