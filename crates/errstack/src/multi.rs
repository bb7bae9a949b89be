//! Unbounded aggregation of errors.

use std::fmt;

use crate::error::Repr;
use crate::Error;

// Separator for single-line messages.
const SINGLE_LINE_SEPARATOR: &str = "; ";

const MULTI_LINE_BANNER: &str = "the following errors occurred:";

// Marker before each item of a multi-line message. Continuation lines of an
// item are indented to align under the marker:
//
//      -  foo
//         bar
const MULTI_LINE_SEPARATOR: &str = "\n -  ";
const MULTI_LINE_INDENT: &str = "    ";

/// Rendered by an aggregate that holds no errors.
pub(crate) const EMPTY_MESSAGE: &str = "no errors";

/// An ordered collection of errors reported together.
///
/// Built with [`append`]. Elements are never themselves `MultiError`s:
/// appending one aggregate into another splices its elements in.
#[derive(Clone, Default)]
pub struct MultiError {
    errors: Vec<Error>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    fn push_flat(&mut self, err: Error) {
        if let Repr::Multi(multi) = err.repr() {
            self.errors.extend(multi.errors.iter().cloned());
            return;
        }
        self.errors.push(err);
    }
}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_MESSAGE);
        }
        write_single_line(f, &self.errors)
    }
}

impl fmt::Debug for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_multi_line(f, &self.errors)
    }
}

impl From<MultiError> for Error {
    fn from(multi: MultiError) -> Self {
        Error::from_repr(Repr::Multi(multi))
    }
}

/// Append errors to `err`, producing a multi-error.
///
/// If `err` is already a multi-error the new errors are added after its
/// elements; any other error becomes the first element. Items that are
/// multi-errors contribute their elements, and `None` items are dropped.
pub fn append<I>(err: Option<Error>, errs: I) -> Error
where
    I: IntoIterator,
    I::Item: Into<Option<Error>>,
{
    let mut merged = match err {
        Some(err) => {
            let mut merged = MultiError::new();
            merged.push_flat(err);
            merged
        }
        None => MultiError::new(),
    };
    for err in errs.into_iter().filter_map(Into::<Option<Error>>::into) {
        merged.push_flat(err);
    }
    merged.into()
}

/// Map an empty aggregate to `None`.
///
/// A multi-error with no elements and a sized error that was never appended
/// to are treated as no error at all; everything else passes through.
pub fn err_or_none(err: Option<Error>) -> Option<Error> {
    let err = err?;
    let empty = match err.repr() {
        Repr::Multi(multi) => multi.is_empty(),
        Repr::Sized(sized) => sized.is_empty(),
        _ => false,
    };
    (!empty).then_some(err)
}

pub(crate) fn write_single_line(f: &mut fmt::Formatter<'_>, errors: &[Error]) -> fmt::Result {
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            f.write_str(SINGLE_LINE_SEPARATOR)?;
        }
        write!(f, "{err}")?;
    }
    Ok(())
}

pub(crate) fn write_multi_line(f: &mut fmt::Formatter<'_>, errors: &[Error]) -> fmt::Result {
    f.write_str(MULTI_LINE_BANNER)?;
    for err in errors {
        f.write_str(MULTI_LINE_SEPARATOR)?;
        let verbose = format!("{err:?}");
        for (i, line) in verbose.split_inclusive('\n').enumerate() {
            if i > 0 {
                f.write_str(MULTI_LINE_INDENT)?;
            }
            f.write_str(line)?;
        }
    }
    Ok(())
}
