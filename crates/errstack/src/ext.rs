//! Extension methods for `Result`.

use std::fmt;

use serde_json::Value;

use crate::fields::Fields;
use crate::{Error, Result};

/// Wrapping operations on the error side of a [`Result`].
///
/// `Ok` values pass through untouched; stack traces are captured at the
/// caller of the extension method.
pub trait ResultExt<T> {
    fn annotate(self, message: impl fmt::Display) -> Result<T>;

    /// Like [`annotate`](ResultExt::annotate), building the message only on
    /// error.
    fn annotate_with<D, F>(self, message: F) -> Result<T>
    where
        D: fmt::Display,
        F: FnOnce() -> D;

    fn trace(self) -> Result<T>;

    fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Result<T>;

    fn with_fields(self, fields: Fields) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    #[track_caller]
    fn annotate(self, message: impl fmt::Display) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.annotate(message)),
        }
    }

    #[track_caller]
    fn annotate_with<D, F>(self, message: F) -> Result<T>
    where
        D: fmt::Display,
        F: FnOnce() -> D,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.annotate(message())),
        }
    }

    #[track_caller]
    fn trace(self) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(err.trace()),
        }
    }

    fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Result<T> {
        self.map_err(|err| err.with_field(key, value))
    }

    fn with_fields(self, fields: Fields) -> Result<T> {
        self.map_err(|err| err.with_fields(fields))
    }
}
