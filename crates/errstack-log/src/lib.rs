//! # errstack-log
//!
//! Logging hooks for [`errstack`] errors.
//!
//! A [`Logger`] builds an [`Entry`] for every record, lets its registered
//! [`Hook`]s enrich the entry, then emits it as a `tracing` event. Two hooks
//! are provided:
//!
//! - [`StacktraceHook`] writes the formatted stack trace of the entry's error
//!   under a configurable key (`"stacktrace"` by default)
//! - [`ErrFieldsHook`] copies the fields attached to the entry's error into
//!   the entry, optionally prefixing each key
//!
//! ```rust
//! use errstack_log::{ErrFieldsHook, Logger, StacktraceHook};
//!
//! let mut logger = Logger::new();
//! logger.add_hook(ErrFieldsHook::new("err_"));
//! logger.add_hook(StacktraceHook::new());
//!
//! let err = errstack::Error::new("disk full").with_field("path", "/var/data");
//! let entry = logger.error(&err, "flush failed");
//! assert_eq!(entry.data["err_path"], "/var/data");
//! assert!(entry.data.contains_key("stacktrace"));
//! ```

mod entry;
mod fields;
mod hook;
mod logger;
mod stacktrace;

pub use entry::Entry;
pub use fields::ErrFieldsHook;
pub use hook::Hook;
pub use logger::Logger;
pub use stacktrace::{STACKTRACE_KEY, StacktraceHook};

use tracing::Level;

/// Levels a hook fires for unless configured otherwise.
pub const DEFAULT_LEVELS: [Level; 4] = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG];
