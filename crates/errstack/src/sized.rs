//! Bounded aggregation of errors.

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::Repr;
use crate::multi::{self, EMPTY_MESSAGE};
use crate::{Error, Result};

/// Trailing entry reported by a [`SizedError`] that dropped older errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("and {0} more errors omitted")]
pub struct OmittedErrors(pub usize);

/// Keeps the most recent `capacity` errors in a ring buffer.
///
/// Every append is counted; once more errors were appended than fit, the
/// oldest ones are overwritten and [`errors`](SizedError::errors) reports how
/// many were lost. Appending needs `&mut self`, so a shared `SizedError`
/// must be guarded by the caller.
#[derive(Clone)]
pub struct SizedError {
    errs: Vec<Option<Error>>,
    size: NonZeroUsize,
    count: usize,
}

impl SizedError {
    /// Create a buffer for `size` errors. A zero size is rejected with a
    /// `NotValid` error.
    #[track_caller]
    pub fn new(size: usize) -> Result<Self> {
        match NonZeroUsize::new(size) {
            Some(size) => Ok(Self::with_capacity(size)),
            None => Err(crate::not_valid(format_args!(
                "sized error capacity {size}"
            ))),
        }
    }

    pub fn with_capacity(size: NonZeroUsize) -> Self {
        Self {
            errs: vec![None; size.get()],
            size,
            count: 0,
        }
    }

    /// Append errors, skipping `None`, overwriting the oldest entry once the
    /// buffer is full.
    pub fn append<I>(&mut self, errs: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<Error>>,
    {
        for err in errs.into_iter().filter_map(Into::<Option<Error>>::into) {
            let slot = self.count % self.size.get();
            self.errs[slot] = Some(err);
            self.count += 1;
        }
    }

    pub fn push(&mut self, err: Error) {
        self.append([err]);
    }

    /// Number of errors appended since creation, including overwritten ones.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.size.get()
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The kept errors, most recent first.
    ///
    /// When older errors were overwritten, an [`OmittedErrors`] entry with
    /// their number is added at the end. Returns `None` if nothing was ever
    /// appended.
    pub fn errors(&self) -> Option<Vec<Error>> {
        if self.count == 0 {
            return None;
        }

        let size = self.size.get();
        if self.count <= size {
            return Some(self.errs[..self.count].iter().rev().flatten().cloned().collect());
        }

        // `head` is the slot the next append overwrites, i.e. the oldest live
        // entry; the newest one sits right before it.
        let head = self.count % size;
        let mut errors = Vec::with_capacity(size + 1);
        errors.extend(self.errs[..head].iter().rev().flatten().cloned());
        errors.extend(self.errs[head..].iter().rev().flatten().cloned());
        errors.push(Error::from_std(OmittedErrors(self.count - size)));
        Some(errors)
    }
}

impl fmt::Display for SizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors() {
            Some(errors) => multi::write_single_line(f, &errors),
            None => f.write_str(EMPTY_MESSAGE),
        }
    }
}

impl fmt::Debug for SizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        multi::write_multi_line(f, &self.errors().unwrap_or_default())
    }
}

impl From<SizedError> for Error {
    fn from(sized: SizedError) -> Self {
        Error::from_repr(Repr::Sized(sized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(message: String) -> Error {
        Error::from_std(std::io::Error::other(message))
    }

    fn messages(sized: &SizedError) -> Vec<String> {
        sized
            .errors()
            .unwrap_or_default()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let err = SizedError::new(0).err().expect("zero capacity rejected");
        assert!(crate::is_not_valid(&err));
        assert_eq!(err.to_string(), "sized error capacity 0 not valid");
    }

    #[test]
    fn test_sized_error() {
        let mut sized = SizedError::new(5).unwrap();
        assert!(sized.errors().is_none());

        sized.push(plain("error 1".into()));
        assert_eq!(sized.count(), 1);
        assert_eq!(messages(&sized), ["error 1"]);

        sized.push(plain("error 2".into()));
        assert_eq!(sized.count(), 2);
        assert_eq!(messages(&sized), ["error 2", "error 1"]);

        for i in 3..=7 {
            sized.push(plain(format!("error {i}")));
        }
        assert_eq!(sized.count(), 7);
        assert_eq!(
            messages(&sized),
            [
                "error 7",
                "error 6",
                "error 5",
                "error 4",
                "error 3",
                "and 2 more errors omitted",
            ]
        );

        for i in 1..=100 {
            sized.push(plain(format!("error {i}")));
        }
        assert_eq!(sized.count(), 107);
        assert_eq!(
            messages(&sized),
            [
                "error 100",
                "error 99",
                "error 98",
                "error 97",
                "error 96",
                "and 102 more errors omitted",
            ]
        );
    }

    #[test]
    fn test_exactly_full_has_no_marker() {
        let mut sized = SizedError::new(5).unwrap();
        sized.append((1..=5).map(|i| plain(format!("error {i}"))));
        assert_eq!(
            messages(&sized),
            ["error 5", "error 4", "error 3", "error 2", "error 1"]
        );
    }

    #[test]
    fn test_append_skips_none() {
        let mut sized = SizedError::new(2).unwrap();
        sized.append([None, Some(plain("a".into())), None]);
        assert_eq!(sized.count(), 1);
    }

    #[test]
    fn test_marker_downcasts() {
        let mut sized = SizedError::new(1).unwrap();
        sized.append([plain("a".into()), plain("b".into()), plain("c".into())]);
        let errors = sized.errors().unwrap();
        assert_eq!(errors[1].downcast_ref::<OmittedErrors>(), Some(&OmittedErrors(2)));
    }

    #[test]
    fn test_display() {
        let mut sized = SizedError::new(2).unwrap();
        assert_eq!(sized.to_string(), "no errors");

        sized.append([plain("a".into()), plain("b".into()), plain("c".into())]);
        assert_eq!(sized.to_string(), "c; b; and 1 more errors omitted");
        assert_eq!(
            format!("{sized:?}"),
            "the following errors occurred:\n -  c\n -  b\n -  and 1 more errors omitted"
        );
    }
}
