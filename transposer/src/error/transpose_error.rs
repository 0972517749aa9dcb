/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt::{Debug, Display},
    io,
};

use thiserror::Error;

use crate::{DimsError, FileRole, UnknownName};

/// Convenience alias for a `Result<T, TransposeError>`.
pub type TransposeResult<T> = Result<T, TransposeError>;

/// Common error type shared by every stage of a transpose run.
///
/// Every failure is terminal for the run. The `kind()` tag identifies which part of the
/// taxonomy the failure belongs to, and [`TransposeError::exit_code`] turns it into the
/// process exit code reported by the command line tool.
/// ```rust
/// use transposer::{TransposeError, TransposeErrorKind, error::ErrorContext};
///
/// fn seek() -> Result<u64, TransposeError> {
///     Err(std::io::Error::from_raw_os_error(libc::EBADF).into())
/// }
///
/// let err = seek().context("unable to seek in input file").unwrap_err();
///
/// assert_eq!(err.kind(), TransposeErrorKind::Storage);
/// assert_eq!(err.exit_code(), libc::EBADF);
/// assert!(err.to_string().contains("unable to seek in input file"));
/// ```
///
/// # Backtraces
///
/// Backtraces are captured on first construction when `RUST_BACKTRACE=1` is set.
#[derive(Debug)]
pub struct TransposeError {
    kind: TransposeErrorKind,
    error: anyhow::Error,
}

impl TransposeError {
    /// Construct a new `TransposeError` encapsulating `err`.
    ///
    /// Errors constructed this way can be retrieved using downcasting.
    ///
    /// # Attributes
    ///
    /// - `track_caller`: `err` is embedded inside a `Located` struct recording the file
    ///   and line of creation.
    ///
    /// - `inline(never)`: keeps error construction off the happy path.
    #[track_caller]
    #[inline(never)]
    pub fn new<E>(kind: TransposeErrorKind, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            kind,
            error: anyhow::Error::new(Located::new(err)),
        }
    }

    /// Construct a new `TransposeError` with the provided message.
    ///
    /// Errors constructed this way cannot be recovered through downcasting.
    #[track_caller]
    #[inline(never)]
    pub fn message<D>(kind: TransposeErrorKind, display: D) -> Self
    where
        D: Display + Debug + Send + Sync + 'static,
    {
        Self {
            kind,
            error: anyhow::Error::msg(Located::new(display)),
        }
    }

    /// Attempt to downcast the error object by reference.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        match self.error.downcast_ref::<E>() {
            Some(err) => Some(err),
            None => self.error.downcast_ref::<Located<E>>().map(|e| &e.err),
        }
    }

    /// Attach the context to `Self` and return a new error.
    #[track_caller]
    #[inline(never)]
    pub fn context<C>(self, context: C) -> Self
    where
        C: Display + Debug + Send + Sync + 'static,
    {
        Self {
            kind: self.kind,
            error: self.error.context(Located::new(context)),
        }
    }

    /// Return the kind of the originally constructed error.
    pub fn kind(&self) -> TransposeErrorKind {
        self.kind
    }

    /// The process exit code associated with this error.
    ///
    /// Storage failures surface the OS error number of the failing operation, falling
    /// back to `EIO` when the operation did not carry one.
    pub fn exit_code(&self) -> i32 {
        match self.kind {
            TransposeErrorKind::Config
            | TransposeErrorKind::Validation
            | TransposeErrorKind::UnexpectedEof => libc::EINVAL,
            TransposeErrorKind::Allocation => libc::ENOMEM,
            TransposeErrorKind::Storage => self
                .downcast_ref::<io::Error>()
                .and_then(io::Error::raw_os_error)
                .unwrap_or(libc::EIO),
        }
    }

    ////////////////////////
    // Typed constructors //
    ////////////////////////

    /// Create and return a configuration error.
    #[track_caller]
    #[inline(never)]
    pub fn log_config_error<D: Display>(err: D) -> Self {
        Self::message(TransposeErrorKind::Config, err.to_string())
    }

    /// Create and return a storage error wrapping `err`.
    #[track_caller]
    #[inline(never)]
    pub fn log_io_error(err: io::Error) -> Self {
        Self::new(TransposeErrorKind::Storage, err)
    }

    /// Create and return the distinct end-of-data error for the file playing `role`.
    #[track_caller]
    #[inline(never)]
    pub fn log_unexpected_eof(role: FileRole) -> Self {
        Self::new(TransposeErrorKind::UnexpectedEof, UnexpectedEof(role))
    }
}

impl Display for TransposeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The alternate format of `anyhow::Error` prints the whole chain on one line.
        write!(formatter, "{} error: {:#}", self.kind, self.error)
    }
}

impl std::error::Error for TransposeError {
    // Don't implement `source` because the whole chain is printed by `Display`.
}

impl From<io::Error> for TransposeError {
    #[track_caller]
    fn from(err: io::Error) -> Self {
        TransposeError::log_io_error(err)
    }
}

impl From<DimsError> for TransposeError {
    #[track_caller]
    fn from(err: DimsError) -> Self {
        TransposeError::new(TransposeErrorKind::Config, err)
    }
}

impl From<UnknownName> for TransposeError {
    #[track_caller]
    fn from(err: UnknownName) -> Self {
        TransposeError::new(TransposeErrorKind::Config, err)
    }
}

/// The source file ended before the element being read, despite passing validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected end-of-file on {0} file")]
pub struct UnexpectedEof(pub FileRole);

/// Records the file and line where an error was first converted or where context was
/// attached.
#[derive(Debug)]
struct Located<T>
where
    T: Debug,
{
    err: T,
    location: &'static std::panic::Location<'static>,
}

impl<T> Located<T>
where
    T: Debug,
{
    #[track_caller]
    fn new(err: T) -> Self {
        Self {
            err,
            location: std::panic::Location::caller(),
        }
    }
}

impl<T> Display for Located<T>
where
    T: Display + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -- ({}:{})",
            self.err,
            self.location.file(),
            self.location.line()
        )
    }
}

impl<T> std::error::Error for Located<T>
where
    T: std::error::Error + Debug,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.err.source()
    }
}

//////////////////
// ErrorContext //
//////////////////

/// Add context to a returned error that will be included in the error chain.
/// ```rust
/// use transposer::{TransposeError, TransposeErrorKind, error::ErrorContext};
///
/// fn open() -> Result<(), TransposeError> {
///     Err(TransposeError::message(TransposeErrorKind::Storage, "open failed"))
/// }
///
/// let message = open()
///     .with_context(|| "unable to open input file")
///     .unwrap_err()
///     .to_string();
///
/// assert!(message.contains("open failed"));
/// assert!(message.contains("unable to open input file"));
/// ```
pub trait ErrorContext<T> {
    /// Attach the provided context to the error part of the result.
    fn context<C>(self, context: C) -> Result<T, TransposeError>
    where
        C: Display + Debug + Send + Sync + 'static;

    /// Attach the provided context to the error part of the result.
    ///
    /// The function `f` is only evaluated if `self` is an `Err`.
    fn with_context<F, C>(self, f: F) -> Result<T, TransposeError>
    where
        C: Display + Debug + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    TransposeError: From<E>,
{
    #[track_caller]
    fn context<C>(self, context: C) -> Result<T, TransposeError>
    where
        C: Display + Debug + Send + Sync + 'static,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(TransposeError::from(error).context(context)),
        }
    }

    #[track_caller]
    fn with_context<F, C>(self, f: F) -> Result<T, TransposeError>
    where
        C: Display + Debug + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        match self {
            Ok(value) => Ok(value),
            Err(error) => Err(TransposeError::from(error).context(f())),
        }
    }
}

////////////////////////
// TransposeErrorKind //
////////////////////////

/// Tags a [`TransposeError`] with its place in the error taxonomy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransposeErrorKind {
    /// Unknown algorithm or driver name, invalid dimension or missing path.
    Config,
    /// A file is too small, or too large under the exact-size policy.
    Validation,
    /// An open, stat, seek, read, write or close operation failed.
    Storage,
    /// The source ended before an element that validation said was present.
    UnexpectedEof,
    /// A vector or matrix buffer could not be allocated.
    Allocation,
}

impl Display for TransposeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Config => "configuration",
            Self::Validation => "validation",
            Self::Storage => "storage",
            Self::UnexpectedEof => "end-of-data",
            Self::Allocation => "allocation",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failing_seek() -> io::Result<u64> {
        Err(io::Error::from_raw_os_error(libc::ESPIPE))
    }

    #[test]
    fn io_errors_surface_their_os_code() {
        let err = failing_seek()
            .context("unable to seek to (0, 0, 0) in input file")
            .unwrap_err();

        assert_eq!(err.kind(), TransposeErrorKind::Storage);
        assert_eq!(err.exit_code(), libc::ESPIPE);
        assert!(err.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn io_errors_without_os_code_map_to_eio() {
        let err = TransposeError::log_io_error(io::Error::from(io::ErrorKind::WriteZero));
        assert_eq!(err.exit_code(), libc::EIO);
    }

    #[test]
    fn non_storage_kinds_map_to_fixed_codes() {
        let config = TransposeError::log_config_error("no output file name provided");
        assert_eq!(config.kind(), TransposeErrorKind::Config);
        assert_eq!(config.exit_code(), libc::EINVAL);

        let eof = TransposeError::log_unexpected_eof(FileRole::Input);
        assert_eq!(eof.kind(), TransposeErrorKind::UnexpectedEof);
        assert_eq!(eof.exit_code(), libc::EINVAL);
        assert_eq!(
            eof.downcast_ref::<UnexpectedEof>(),
            Some(&UnexpectedEof(FileRole::Input))
        );

        let alloc = TransposeError::message(TransposeErrorKind::Allocation, "matrix");
        assert_eq!(alloc.exit_code(), libc::ENOMEM);
    }

    #[test]
    fn display_includes_every_context() {
        let err = failing_seek()
            .context("seek")
            .map_err(|e| e.context("transpose"))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("storage error"));
        assert!(message.contains("seek"));
        assert!(message.contains("transpose"));
    }

    #[test]
    fn dims_errors_are_configuration_errors() {
        let err: TransposeError = DimsError::Zero { axis: 2 }.into();
        assert_eq!(err.kind(), TransposeErrorKind::Config);
        assert_eq!(err.exit_code(), libc::EINVAL);
    }
}
