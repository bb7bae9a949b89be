//! Copy error fields into log entries.

use tracing::Level;

use crate::{DEFAULT_LEVELS, Entry, Hook};

/// Merges the fields attached to the entry's error into the entry.
///
/// Each key is prefixed with `prefix` so error fields cannot clobber the
/// entry's own data; an empty prefix copies keys as they are.
#[derive(Debug, Clone)]
pub struct ErrFieldsHook {
    prefix: String,
    levels: Vec<Level>,
}

impl ErrFieldsHook {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Hook for ErrFieldsHook {
    fn levels(&self) -> &[Level] {
        &self.levels
    }

    fn fire(&self, entry: &mut Entry) -> errstack::Result<()> {
        let Some(fields) = entry.error.as_ref().and_then(errstack::Error::fields) else {
            return Ok(());
        };
        for (key, value) in fields {
            entry.data.insert(format!("{}{key}", self.prefix), value.clone());
        }
        Ok(())
    }
}
