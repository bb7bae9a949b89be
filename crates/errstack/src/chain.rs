//! Walking the cause chain.

use crate::Error;
use crate::fields::Fields;
use crate::stack::StackTrace;

/// Iterator over an error and its causes, outermost first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(head: &'a Error) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause_ref();
        Some(current)
    }
}

/// Walk the cause chain starting at `err` until `visit` accepts a node.
///
/// Returns the accepted node, or `None` when the chain ends first.
pub fn walk_deep<'a, F>(err: impl Into<Option<&'a Error>>, mut visit: F) -> Option<&'a Error>
where
    F: FnMut(&'a Error) -> bool,
{
    let mut current = err.into();
    while let Some(err) = current {
        if visit(err) {
            return Some(err);
        }
        current = err.cause_ref();
    }
    None
}

/// The innermost error of the chain, `err` itself when it wraps nothing.
pub fn cause(err: &Error) -> &Error {
    let mut current = err;
    while let Some(next) = current.cause_ref() {
        current = next;
    }
    current
}

/// The first stack trace in the chain.
pub fn stack_tracer(err: &Error) -> Option<&StackTrace> {
    walk_deep(err, |node| node.stack_trace_ref().is_some()).and_then(Error::stack_trace_ref)
}

pub fn has_stack(err: &Error) -> bool {
    stack_tracer(err).is_some()
}

/// The first fields map in the chain.
pub fn fields(err: &Error) -> Option<&Fields> {
    walk_deep(err, |node| node.fields_ref().is_some()).and_then(Error::fields_ref)
}

/// Verbose rendering with stack traces; empty for no error.
pub fn error_stack(err: Option<&Error>) -> String {
    err.map(|err| format!("{err:?}")).unwrap_or_default()
}
