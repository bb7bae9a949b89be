//! Attach the error's stack trace to log entries.

use errstack::Value;
use tracing::Level;

use crate::{DEFAULT_LEVELS, Entry, Hook};

/// Key the stack trace is stored under by default.
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Stores the formatted stack trace of the entry's error in the entry.
///
/// The trace is the first one found walking the error's cause chain. Entries
/// without an error, or whose error carries no stack, are left alone.
///
/// ```rust
/// use errstack_log::StacktraceHook;
/// use tracing::Level;
///
/// let hook = StacktraceHook::new()
///     .with_key("stack")
///     .with_levels([Level::ERROR, Level::WARN]);
/// assert_eq!(hook.key(), "stack");
/// ```
#[derive(Debug, Clone)]
pub struct StacktraceHook {
    key: String,
    levels: Vec<Level>,
}

impl Default for StacktraceHook {
    fn default() -> Self {
        Self {
            key: STACKTRACE_KEY.to_string(),
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl StacktraceHook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Hook for StacktraceHook {
    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn fire(&self, entry: &mut Entry) -> errstack::Result<()> {
        let Some(stack) = entry.error.as_ref().and_then(errstack::Error::stack_trace) else {
            return Ok(());
        };
        let rendered = stack.to_string();
        entry.data.insert(self.key.clone(), Value::String(rendered));
        Ok(())
    }
}
