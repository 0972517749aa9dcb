/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::{
    io::{ErrorKind, Read, Result},
    path::Path,
};

/// This module provides the storage access abstraction shared by the transpose engine, the
/// initializer and the validator.
///
/// The `StorageProvider` trait opens files and hands out handles. Each provider carries
/// its own private handle type, which the engine only ever reaches through
/// [`StorageHandle`]. The two providers intentionally differ in how `create` treats an
/// existing path, since the providers themselves are what a benchmark run compares.
pub trait StorageProvider {
    type Handle: StorageHandle;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Open or create the file at `path`.
    ///
    /// Failure carries the OS error of the failing call. A provider that refuses to create
    /// an existing path reports [`ErrorKind::AlreadyExists`], and the caller is expected to
    /// retry without [`OpenMode::create`].
    fn open(&self, path: &Path, mode: OpenMode) -> Result<Self::Handle>;
}

/// Operations on an open file.
///
/// `read` and `write` treat their buffer as a unit: either the whole buffer is transferred
/// or the call fails, with the single exception of `read` reaching end-of-data, which
/// returns `Ok(0)`.
pub trait StorageHandle {
    /// Current byte length of the backing file.
    fn stat(&mut self) -> Result<u64>;

    /// Move the cursor to the absolute byte `offset`, returning the new position.
    fn seek(&mut self, offset: u64) -> Result<u64>;

    /// Fill `buffer` completely and return its length, or return `Ok(0)` if the data ends
    /// before the buffer is full.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write the whole `buffer` and return its length.
    fn write(&mut self, buffer: &[u8]) -> Result<usize>;

    /// Release the underlying resource. Closing an already closed handle is a no-op.
    fn close(&mut self) -> Result<()>;
}

/// Access flags for [`StorageProvider::open`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenMode {
    read_only: bool,
    create: bool,
    truncate: bool,
}

impl OpenMode {
    /// Open an existing file for reading only.
    pub const fn read_only() -> Self {
        Self {
            read_only: true,
            create: false,
            truncate: false,
        }
    }

    /// Open an existing file for reading and writing.
    pub const fn read_write() -> Self {
        Self {
            read_only: false,
            create: false,
            truncate: false,
        }
    }

    /// Request that the file be created.
    pub const fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Request that the file be truncated to zero length.
    pub const fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub const fn is_create(&self) -> bool {
        self.create
    }

    pub const fn is_truncate(&self) -> bool {
        self.truncate
    }
}

/// Read until `buffer` is full. Returns `Ok(0)` if the data ends first.
pub(crate) fn read_fully<R: Read>(reader: &mut R, buffer: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => return Ok(0),
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// The error returned by operations on a closed handle.
pub(crate) fn closed_handle() -> std::io::Error {
    std::io::Error::from_raw_os_error(libc::EBADF)
}
