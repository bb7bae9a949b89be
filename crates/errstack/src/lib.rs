//! # errstack
//!
//! Error values decorated with stack traces, cause chains, classification,
//! structured fields, and aggregation of many errors into one.
//!
//! ## Design
//!
//! - **Error**: an immutable node; wrapping always builds a new node that
//!   keeps the original as its cause
//! - **One stack per chain**: `annotate` and `trace` only capture a stack if
//!   no node of the chain carries one already
//! - **ErrorKind**: a classification fixed at construction, queried on the
//!   innermost error with the `is_*` predicates
//! - **Aggregates**: `MultiError` keeps every error in order, `SizedError`
//!   keeps the most recent ones in a ring buffer
//!
//! ## Usage
//!
//! ```rust
//! use errstack::ResultExt;
//!
//! fn find_user(id: u32) -> errstack::Result<String> {
//!     Err(errstack::not_found(format_args!("user {id}")))
//! }
//!
//! fn handler() -> errstack::Result<String> {
//!     find_user(7).annotate("loading profile").with_field("user_id", 7)
//! }
//!
//! let err = handler().unwrap_err();
//! assert!(errstack::is_not_found(&err));
//! assert_eq!(err.to_string(), "loading profile: user 7 not found");
//! assert_eq!(err.fields().map(|fields| fields.len()), Some(1));
//! ```
//!
//! Formatting with `{}` prints the single-line message; `{:?}` prints the
//! verbose form including stack frames.

mod chain;
mod error;
mod ext;
mod fields;
mod kind;
mod multi;
mod sized;
mod stack;
mod wrap;

pub use chain::{Chain, cause, error_stack, fields, has_stack, stack_tracer, walk_deep};
pub use error::Error;
pub use ext::ResultExt;
pub use fields::Fields;
pub use kind::*;
pub use multi::{MultiError, append, err_or_none};
pub use serde_json::Value;
pub use sized::{OmittedErrors, SizedError};
pub use stack::{Frame, StackTrace, new_stack};
pub use wrap::{annotate, trace, with_field, with_fields};

/// Result type alias using errstack Error
pub type Result<T> = std::result::Result<T, Error>;

/// Create an [`Error`] from a format string, with a stack trace starting at
/// the call site.
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::Error::new(::std::format!($($arg)*))
    };
}

/// Annotate an `Option<Error>` with a formatted message.
#[macro_export]
macro_rules! annotatef {
    ($err:expr, $($arg:tt)*) => {
        $crate::annotate($err, ::std::format_args!($($arg)*))
    };
}
