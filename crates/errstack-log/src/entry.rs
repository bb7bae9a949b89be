//! A single log record.

use errstack::{Error, Fields, Value};
use tracing::Level;

/// A log record as seen by hooks.
///
/// Hooks read `error` and add to `data`; the logger emits whatever `data`
/// holds once every hook has fired.
#[derive(Debug, Clone)]
pub struct Entry {
    pub level: Level,
    pub message: String,
    pub error: Option<Error>,
    pub data: Fields,
}

impl Entry {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            error: None,
            data: Fields::new(),
        }
    }

    pub fn with_error(mut self, error: Error) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
