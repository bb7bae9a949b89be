//! Wrapping operations over possibly-absent errors.
//!
//! Each function is a no-op on `None` and otherwise forwards to the method of
//! the same name on [`Error`].

use std::fmt;

use serde_json::Value;

use crate::Error;
use crate::fields::Fields;

/// Add a message, capturing a stack trace at the caller unless the chain
/// already has one.
#[track_caller]
pub fn annotate(err: Option<Error>, message: impl fmt::Display) -> Option<Error> {
    // `Option::map` would record the closure as the caller.
    match err {
        Some(err) => Some(err.annotate(message)),
        None => None,
    }
}

/// Add a stack trace captured at the caller unless the chain already has one.
#[track_caller]
pub fn trace(err: Option<Error>) -> Option<Error> {
    match err {
        Some(err) => Some(err.trace()),
        None => None,
    }
}

pub fn with_field(err: Option<Error>, key: impl Into<String>, value: impl Into<Value>) -> Option<Error> {
    err.map(|err| err.with_field(key, value))
}

pub fn with_fields(err: Option<Error>, fields: Fields) -> Option<Error> {
    err.map(|err| err.with_fields(fields))
}
