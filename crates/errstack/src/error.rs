//! The error node type.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::chain::{self, Chain};
use crate::fields::Fields;
use crate::kind::ErrorKind;
use crate::multi::MultiError;
use crate::sized::SizedError;
use crate::stack::StackTrace;

/// An error value with an optional cause, stack trace, classification and
/// attached fields.
///
/// `Error` is a cheap handle to an immutable node. Every wrapping operation
/// (`annotate`, `trace`, `with_fields`) allocates a new node that holds the
/// original as its cause, so chains are linear and never cyclic. Handles can
/// be cloned and shared across threads freely.
#[derive(Clone)]
pub struct Error {
    repr: Arc<Repr>,
}

pub(crate) enum Repr {
    /// Terminal node built by this crate.
    Fundamental {
        kind: Option<ErrorKind>,
        message: String,
        stack: StackTrace,
    },
    /// Terminal node over an error from elsewhere.
    Foreign(Box<dyn StdError + Send + Sync + 'static>),
    WithMessage {
        cause: Error,
        message: String,
        cause_has_stack: bool,
    },
    WithStack {
        cause: Error,
        stack: StackTrace,
    },
    WithFields {
        cause: Error,
        fields: Fields,
    },
    Multi(MultiError),
    Sized(SizedError),
}

impl Error {
    pub(crate) fn from_repr(repr: Repr) -> Self {
        Self { repr: Arc::new(repr) }
    }

    pub(crate) fn repr(&self) -> &Repr {
        &self.repr
    }

    /// Create an error with the given message and a stack trace starting at
    /// the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_repr(Repr::Fundamental {
            kind: None,
            message: message.into(),
            stack: StackTrace::capture(),
        })
    }

    /// Create a classified error. The kind's phrase is appended to the
    /// message.
    #[track_caller]
    pub fn with_kind(kind: ErrorKind, message: impl fmt::Display) -> Self {
        let message = message.to_string();
        let message = if message.is_empty() {
            kind.to_string()
        } else {
            format!("{message} {kind}")
        };

        Self::from_repr(Repr::Fundamental {
            kind: Some(kind),
            message,
            stack: StackTrace::capture(),
        })
    }

    /// Wrap an error from another library. No stack trace is captured; use
    /// [`Error::trace`] to add one.
    pub fn from_std<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_repr(Repr::Foreign(Box::new(err)))
    }

    /// Add a message to this error, capturing a stack trace at the caller
    /// unless the chain already carries one.
    #[track_caller]
    pub fn annotate(self, message: impl fmt::Display) -> Self {
        let cause_has_stack = self.has_stack();
        let err = Self::from_repr(Repr::WithMessage {
            cause: self,
            message: message.to_string(),
            cause_has_stack,
        });
        if cause_has_stack {
            return err;
        }
        Self::from_repr(Repr::WithStack {
            cause: err,
            stack: StackTrace::capture(),
        })
    }

    /// Ensure the chain carries a stack trace, capturing one at the caller if
    /// it does not.
    #[track_caller]
    pub fn trace(self) -> Self {
        if self.has_stack() {
            return self;
        }
        Self::from_repr(Repr::WithStack {
            cause: self,
            stack: StackTrace::capture(),
        })
    }

    /// Attach a single key/value field.
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut fields = Fields::new();
        fields.insert(key.into(), value.into());
        self.with_fields(fields)
    }

    /// Attach fields. Fields already attached further down the chain are
    /// carried into the new node; on a key collision the new value wins.
    pub fn with_fields(self, fields: Fields) -> Self {
        let mut merged = self.fields().cloned().unwrap_or_default();
        merged.extend(fields);
        Self::from_repr(Repr::WithFields {
            cause: self,
            fields: merged,
        })
    }

    /// The error this node wraps, if any.
    pub fn cause_ref(&self) -> Option<&Error> {
        match self.repr() {
            Repr::WithMessage { cause, .. }
            | Repr::WithStack { cause, .. }
            | Repr::WithFields { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// The stack trace carried by this node itself.
    pub fn stack_trace_ref(&self) -> Option<&StackTrace> {
        match self.repr() {
            Repr::Fundamental { stack, .. } | Repr::WithStack { stack, .. } => Some(stack),
            _ => None,
        }
    }

    /// The fields carried by this node itself.
    pub fn fields_ref(&self) -> Option<&Fields> {
        match self.repr() {
            Repr::WithFields { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// The classification carried by this node itself.
    pub fn kind_ref(&self) -> Option<ErrorKind> {
        match self.repr() {
            Repr::Fundamental { kind, .. } => *kind,
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiError> {
        match self.repr() {
            Repr::Multi(multi) => Some(multi),
            _ => None,
        }
    }

    pub fn as_sized(&self) -> Option<&SizedError> {
        match self.repr() {
            Repr::Sized(sized) => Some(sized),
            _ => None,
        }
    }

    /// Downcast a foreign terminal node to its concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        match self.repr() {
            Repr::Foreign(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Iterate over this node and its causes, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// The innermost error of the chain.
    pub fn cause(&self) -> &Error {
        chain::cause(self)
    }

    /// Whether any node of the chain carries a stack trace.
    pub fn has_stack(&self) -> bool {
        chain::has_stack(self)
    }

    /// The first stack trace found walking the chain outward in.
    pub fn stack_trace(&self) -> Option<&StackTrace> {
        chain::stack_tracer(self)
    }

    /// The first fields found walking the chain outward in.
    pub fn fields(&self) -> Option<&Fields> {
        chain::fields(self)
    }

    /// The classification of the innermost error.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.cause().kind_ref()
    }

    /// Whether the innermost error is classified as `kind`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }
}

/// The single-line message. Wrapping nodes prefix their message to the
/// cause's, separated by `": "`.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::Fundamental { message, .. } => f.write_str(message),
            Repr::Foreign(err) => fmt::Display::fmt(err, f),
            Repr::WithMessage { cause, message, .. } => write!(f, "{message}: {cause}"),
            Repr::WithStack { cause, .. } | Repr::WithFields { cause, .. } => {
                fmt::Display::fmt(cause, f)
            }
            Repr::Multi(multi) => fmt::Display::fmt(multi, f),
            Repr::Sized(sized) => fmt::Display::fmt(sized, f),
        }
    }
}

/// The verbose form: messages together with every captured stack trace.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::Fundamental { message, stack, .. } => write!(f, "{message}{stack}"),
            Repr::Foreign(err) => fmt::Display::fmt(err, f),
            Repr::WithMessage {
                cause,
                message,
                cause_has_stack: true,
            } => write!(f, "{cause:?}\n{message}"),
            Repr::WithMessage {
                cause,
                message,
                cause_has_stack: false,
            } => write!(f, "{message}: {cause:?}"),
            Repr::WithStack { cause, stack } => write!(f, "{cause:?}{stack}"),
            Repr::WithFields { cause, .. } => fmt::Debug::fmt(cause, f),
            Repr::Multi(multi) => fmt::Debug::fmt(multi, f),
            Repr::Sized(sized) => fmt::Debug::fmt(sized, f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.repr() {
            Repr::Foreign(err) => err.source(),
            Repr::WithMessage { cause, .. } => Some(cause as &(dyn StdError + 'static)),
            // stack and fields nodes add nothing to the message
            Repr::WithStack { cause, .. } | Repr::WithFields { cause, .. } => cause.source(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Error::from_std(err).trace()
    }
}

impl From<String> for Error {
    #[track_caller]
    fn from(message: String) -> Self {
        Error::new(message)
    }
}

impl From<&str> for Error {
    #[track_caller]
    fn from(message: &str) -> Self {
        Error::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(message: &str) -> Error {
        Error::from_std(std::io::Error::other(message.to_string()))
    }

    #[test]
    fn test_error_creation() {
        let err = Error::new("unexpected token");
        assert_eq!(err.to_string(), "unexpected token");
        assert!(err.has_stack());
        assert_eq!(err.kind(), None);
        assert!(err.cause_ref().is_none());
    }

    #[test]
    fn test_annotate_display() {
        let err = Error::new("ooh").annotate("ahh").annotate("oops");
        assert_eq!(err.to_string(), "oops: ahh: ooh");
    }

    #[test]
    fn test_annotate_adds_stack_once() {
        let err = plain("connection refused");
        assert!(!err.has_stack());

        let err = err.annotate("dial").annotate("fetch").trace();
        let stacks = err.chain().filter(|node| node.stack_trace_ref().is_some()).count();
        assert_eq!(stacks, 1);
        assert_eq!(err.to_string(), "fetch: dial: connection refused");
    }

    #[test]
    fn test_trace_keeps_existing_stack() {
        let err = Error::new("ooh");
        let traced = err.clone().trace();
        assert!(Arc::ptr_eq(&err.repr, &traced.repr));
    }

    #[test]
    fn test_with_fields_merges() {
        let err = Error::new("dummy")
            .with_field("key1", "value1")
            .with_field("key2", 2)
            .with_field("key1", "override");

        let fields = err.fields().expect("fields attached");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["key1"], Value::from("override"));
        assert_eq!(fields["key2"], Value::from(2));
        assert_eq!(err.to_string(), "dummy");
    }

    #[test]
    fn test_verbose_includes_stack() {
        let err = Error::new("ooh").annotate("ahh");
        let verbose = format!("{err:?}");
        assert!(verbose.starts_with("ooh\n"));
        assert!(verbose.ends_with("\nahh"));
        assert!(verbose.contains("error.rs"));
    }

    #[test]
    fn test_verbose_of_foreign_annotation() {
        let err = plain("refused").annotate("dial");
        let verbose = format!("{err:?}");
        assert!(verbose.starts_with("dial: refused\n"));
    }

    #[test]
    fn test_source_chain() {
        let err = plain("refused").annotate("dial");
        let source = err.source().expect("message node has a source");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn test_from_io() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.has_stack());
        assert!(err.cause().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_from_str() {
        let err: Error = "boom".into();
        assert_eq!(err.to_string(), "boom");
        assert!(err.stack_trace_ref().is_some());
    }
}
