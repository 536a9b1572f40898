//! The stable error enumeration shared by every façade boundary in this crate.
//!
//! Modeled on the hand-rolled `ErrorKind`/`Error` pair in the teacher codebase's
//! `error.rs` and `components/keystore/error.rs`, minus their `i18n-embed` localization
//! layer (this crate has no CLI surface to localize).

use std::fmt;

/// The stable set of failure categories this crate can report.
///
/// Variant order is part of the public interface: do not reorder or renumber.
/// "success" has no variant here — it is represented by `Ok(_)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A precondition was violated: malformed input, a null/absent required field, or
    /// façade misuse (e.g. calling a connected-only method before connecting).
    InvalidArgument,
    /// Retained for wire/FFI parity with the original callback-table API, which used
    /// this to signal a caller-supplied buffer was too small. This crate's APIs return
    /// owned, growable collections and never raises this variant itself.
    InsufficientCapacity,
    /// Allocation failed. Rust's global allocator aborts on OOM rather than returning
    /// an error in the common case, so this is effectively unreachable in safe code
    /// paths; retained for interface parity and for host backends that want to surface
    /// their own allocation failures through this enum.
    OutOfMemory,
    /// A numeric value fell outside the representable range (e.g. an amount magnitude
    /// beyond what a signed 64-bit scaled integer can hold).
    Overflow,
    /// The storage façade's database handle has already been torn down.
    DbClosed,
    /// The storage façade's database backend failed to open.
    DbOpenFailed,
    /// Stored data violated an invariant this crate relies on (e.g. an unconvertible
    /// timestamp in a terms-of-service record).
    DbCorrupt,
    /// The storage façade's recovery-log backend failed to open.
    LogOpenFailed,
    /// A server façade operation was attempted before connecting, or after
    /// disconnecting.
    NotConnected,
    /// The server façade's connect attempt failed.
    ConnectFailed,
    /// A UI façade operation was attempted before startup, or after shutdown.
    Headless,
    /// The UI façade's startup attempt failed.
    StartupFailed,
    /// Reserved. Never raised by well-formed code in this crate; available for host
    /// backends that need to round-trip an error kind this enum has no variant for.
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::InsufficientCapacity => "insufficient capacity",
            ErrorKind::OutOfMemory => "out of memory",
            ErrorKind::Overflow => "numeric overflow",
            ErrorKind::DbClosed => "database handle already closed",
            ErrorKind::DbOpenFailed => "database open failed",
            ErrorKind::DbCorrupt => "database is corrupt",
            ErrorKind::LogOpenFailed => "recovery log open failed",
            ErrorKind::NotConnected => "server is not connected",
            ErrorKind::ConnectFailed => "server connect failed",
            ErrorKind::Headless => "user interface is not running",
            ErrorKind::StartupFailed => "user interface startup failed",
            ErrorKind::Unknown => "unknown error",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ErrorKind {}

/// An error from this crate, carrying a stable [`ErrorKind`] and, where one is
/// available, the underlying cause (typically from a host-supplied façade backend).
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// The stable error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn new(kind: ErrorKind) -> Self {
        Error { kind, source: None }
    }

    pub(crate) fn with_source(
        kind: ErrorKind,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Error {
            kind,
            source: Some(source.into()),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
