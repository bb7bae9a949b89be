//! Dispatch entries through hooks and emit them with `tracing`.

use std::sync::Arc;

use errstack::Error;
use tracing::Level;

use crate::{Entry, Hook};

/// Runs registered hooks over each entry, then emits it as a `tracing`
/// event under the `errstack` target.
///
/// The entry's data is emitted as a single JSON string field named `data`.
/// A `Logger` can be shared between threads; registering hooks needs
/// `&mut self`.
#[derive(Clone, Default)]
pub struct Logger {
    hooks: Vec<Arc<dyn Hook>>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hook(&mut self, hook: impl Hook + 'static) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn with_hook(mut self, hook: impl Hook + 'static) -> Self {
        self.add_hook(hook);
        self
    }

    /// Fire every hook registered for the entry's level, in registration
    /// order. A failing hook is reported and skipped.
    pub fn fire_hooks(&self, entry: &mut Entry) {
        for hook in &self.hooks {
            if !hook.levels().contains(&entry.level) {
                continue;
            }
            if let Err(err) = hook.fire(entry) {
                tracing::warn!(error = %err, "failed to fire log hook");
            }
        }
    }

    /// Build, enrich and emit an entry. The emitted entry is returned.
    pub fn log(&self, level: Level, error: Option<&Error>, message: impl Into<String>) -> Entry {
        let mut entry = Entry::new(level, message);
        entry.error = error.cloned();
        self.fire_hooks(&mut entry);
        emit(&entry);
        entry
    }

    pub fn error(&self, error: &Error, message: impl Into<String>) -> Entry {
        self.log(Level::ERROR, Some(error), message)
    }

    pub fn warn(&self, error: &Error, message: impl Into<String>) -> Entry {
        self.log(Level::WARN, Some(error), message)
    }

    pub fn info(&self, error: &Error, message: impl Into<String>) -> Entry {
        self.log(Level::INFO, Some(error), message)
    }

    pub fn debug(&self, error: &Error, message: impl Into<String>) -> Entry {
        self.log(Level::DEBUG, Some(error), message)
    }
}

fn emit(entry: &Entry) {
    let error = entry.error.as_ref().map(ToString::to_string);
    let error = error.as_deref();
    let data = match serde_json::to_string(&entry.data) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(error = %err, "failed to serialize log entry data");
            String::new()
        }
    };
    let data = data.as_str();
    let message = entry.message.as_str();

    match entry.level {
        Level::ERROR => tracing::error!(target: "errstack", error, data, "{message}"),
        Level::WARN => tracing::warn!(target: "errstack", error, data, "{message}"),
        Level::INFO => tracing::info!(target: "errstack", error, data, "{message}"),
        Level::DEBUG => tracing::debug!(target: "errstack", error, data, "{message}"),
        _ => tracing::trace!(target: "errstack", error, data, "{message}"),
    }
}
