//! Error classification codes.

use std::fmt;

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::Error;

/// The classification of an error.
///
/// A kind is attached to a terminal error when it is constructed and never
/// changes afterwards. Wrapping a classified error keeps it classified: the
/// `is_*` predicates look at the innermost error of the chain.
///
/// The `Display` form is the phrase appended to the message of a classified
/// error, e.g. `not_found("user 7")` reads `"user 7 not found"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display, EnumIter)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An operation did not finish in time
    #[strum(serialize = "timeout")]
    Timeout,

    /// The request was malformed
    #[strum(serialize = "bad request")]
    BadRequest,

    /// The requested entity does not exist
    #[strum(serialize = "not found")]
    NotFound,

    /// The requested user does not exist
    #[strum(serialize = "user not found")]
    UserNotFound,

    /// The operation is not supported
    #[strum(serialize = "not supported")]
    NotSupported,

    /// An argument or value failed validation
    #[strum(serialize = "not valid")]
    NotValid,

    /// The entity to create is already present
    #[strum(serialize = "already exists")]
    AlreadyExists,

    /// The caller is not authenticated
    #[strum(serialize = "unauthorized")]
    Unauthorized,

    /// The caller is authenticated but not allowed
    #[strum(serialize = "forbidden")]
    Forbidden,

    /// The operation has no implementation
    #[strum(serialize = "not implemented")]
    NotImplemented,

    /// The resource has not been provisioned
    #[strum(serialize = "not provisioned")]
    NotProvisioned,

    /// The resource has not been assigned
    #[strum(serialize = "not assigned")]
    NotAssigned,

    /// The method is not allowed on the resource
    #[strum(serialize = "method not allowed")]
    MethodNotAllowed,
}

impl ErrorKind {
    /// Returns the kind's phrase as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Create a classified error of this kind.
    ///
    /// The stack trace starts at the caller.
    #[track_caller]
    pub fn error(self, message: impl fmt::Display) -> Error {
        Error::with_kind(self, message)
    }
}

macro_rules! classified {
    ($($kind:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Create a `" $kind "` error whose stack trace starts at the caller."]
                ///
                /// The kind's phrase is appended to the message.
                #[track_caller]
                pub fn [<$kind:snake>](message: impl fmt::Display) -> Error {
                    Error::with_kind(ErrorKind::$kind, message)
                }

                #[doc = "Report whether the innermost error of `err` is classified as `" $kind "`."]
                pub fn [<is_ $kind:snake>]<'a>(err: impl Into<Option<&'a Error>>) -> bool {
                    err.into().is_some_and(|err| err.is(ErrorKind::$kind))
                }
            )*
        }
    };
}

classified!(
    Timeout,
    BadRequest,
    NotFound,
    UserNotFound,
    NotSupported,
    NotValid,
    AlreadyExists,
    Unauthorized,
    Forbidden,
    NotImplemented,
    NotProvisioned,
    NotAssigned,
    MethodNotAllowed,
);
