//! Call-site stack capture.

use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use backtrace::{Backtrace, BacktraceSymbol};

const OWN_PREFIX: &str = "errstack::";

/// A single resolved frame of a [`StackTrace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    function: Option<String>,
    file: Option<PathBuf>,
    line: Option<u32>,
}

impl Frame {
    fn from_symbol(symbol: &BacktraceSymbol) -> Self {
        Self {
            function: symbol.name().map(|name| format!("{name:#}")),
            file: symbol.filename().map(Path::to_path_buf),
            line: symbol.lineno(),
        }
    }

    fn from_location(location: &Location<'_>) -> Self {
        Self {
            function: None,
            file: Some(PathBuf::from(location.file())),
            line: Some(location.line()),
        }
    }

    /// The demangled function name, without the symbol hash
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// `Location::file` is relative to the workspace while symbol files are
    /// absolute, so compare by path suffix.
    fn is_at(&self, location: &Location<'_>) -> bool {
        self.line == Some(location.line())
            && self
                .file
                .as_deref()
                .is_some_and(|file| file.ends_with(location.file()))
    }

    /// Whether the frame belongs to this crate, including trait impls such
    /// as `<errstack::Error as From<_>>::from`.
    fn is_own(&self) -> bool {
        self.function.as_deref().is_some_and(|name| {
            name.strip_prefix('<').unwrap_or(name).starts_with(OWN_PREFIX)
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = self.function.as_deref().unwrap_or("unknown");
        match &self.file {
            Some(file) => write!(f, "{function}\n\t{}:{}", file.display(), self.line.unwrap_or(0)),
            None => write!(f, "{function}\n\tunknown:0"),
        }
    }
}

/// Call-site frames recorded when an error was constructed or first wrapped.
///
/// Capturing only walks the stack; symbols are resolved once, the first time
/// the frames are read or formatted. The first frame is the caller of the
/// constructing operation, or the first frame outside this crate when the
/// binary carries symbols but no line info.
#[derive(Clone)]
pub struct StackTrace {
    caller: &'static Location<'static>,
    raw: Backtrace,
    frames: OnceLock<Vec<Frame>>,
}

impl StackTrace {
    #[track_caller]
    #[inline(never)]
    pub(crate) fn capture() -> Self {
        Self {
            caller: Location::caller(),
            raw: Backtrace::new_unresolved(),
            frames: OnceLock::new(),
        }
    }

    /// The source location of the call that captured this trace.
    pub fn caller(&self) -> &'static Location<'static> {
        self.caller
    }

    /// The resolved frames, innermost first.
    pub fn frames(&self) -> &[Frame] {
        self.frames.get_or_init(|| self.resolve())
    }

    fn resolve(&self) -> Vec<Frame> {
        let mut raw = self.raw.clone();
        raw.resolve();

        let frames = raw
            .frames()
            .iter()
            .flat_map(|frame| frame.symbols().iter().map(Frame::from_symbol))
            .collect();
        trim_to_caller(frames, self.caller)
    }
}

/// Drop the frames of the capture machinery so the caller comes first.
///
/// With line info the caller's frame is found by its location. Without it,
/// the leading run of this crate's own frames is skipped by symbol name. The
/// recorded location stands in when no frame is left.
fn trim_to_caller(mut frames: Vec<Frame>, caller: &'static Location<'static>) -> Vec<Frame> {
    if frames.is_empty() {
        return vec![Frame::from_location(caller)];
    }
    if let Some(start) = frames.iter().position(|frame| frame.is_at(caller)) {
        return frames.split_off(start);
    }

    let Some(first_own) = frames.iter().position(Frame::is_own) else {
        return frames;
    };
    let start = frames[first_own..]
        .iter()
        .position(|frame| !frame.is_own())
        .map_or(frames.len(), |offset| first_own + offset);
    if start == frames.len() {
        return vec![Frame::from_location(caller)];
    }
    frames.split_off(start)
}

/// Writes every frame on its own `"\n{function}\n\t{file}:{line}"` block.
impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames() {
            write!(f, "\n{frame}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackTrace")
            .field("caller", &self.caller)
            .field("frames", &self.frames().len())
            .finish()
    }
}

/// Capture a stack trace starting at the caller.
///
/// Meant for library authors building their own error types; most code
/// should use [`Error::trace`](crate::Error::trace) instead.
#[track_caller]
pub fn new_stack() -> StackTrace {
    StackTrace::capture()
}
