/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::fmt::{self, Display};

use transposer::{error::ErrorContext, FileRole, TransposeError, TransposeResult};

use crate::storage::StorageHandle;

/// Index triple of an element, or of a run of elements when some indices vary.
///
/// Varying indices print as `...`, so a source column read by `vector_input` is reported
/// as `(..., j, k)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct At {
    i: Option<usize>,
    j: Option<usize>,
    k: Option<usize>,
}

impl At {
    pub(crate) const fn element(i: usize, j: usize, k: usize) -> Self {
        Self {
            i: Some(i),
            j: Some(j),
            k: Some(k),
        }
    }

    /// All `i` for fixed `j` and `k`.
    pub(crate) const fn column(j: usize, k: usize) -> Self {
        Self {
            i: None,
            j: Some(j),
            k: Some(k),
        }
    }

    /// All `k` for fixed `i` and `j`.
    pub(crate) const fn row(i: usize, j: usize) -> Self {
        Self {
            i: Some(i),
            j: Some(j),
            k: None,
        }
    }

    /// All `i` and `k` for a fixed `j`.
    pub(crate) const fn plane(j: usize) -> Self {
        Self {
            i: None,
            j: Some(j),
            k: None,
        }
    }
}

impl Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: Option<usize>| v.map_or_else(|| "...".to_string(), |v| v.to_string());
        write!(f, "({}, {}, {})", part(self.i), part(self.j), part(self.k))
    }
}

/// Element-typed access to one side of the transpose.
///
/// Every failure is turned into a [`TransposeError`] naming the file and the element
/// being moved.
pub(crate) struct Cursor<'a, H> {
    handle: &'a mut H,
    role: FileRole,
}

impl<'a, H> Cursor<'a, H>
where
    H: StorageHandle,
{
    pub(crate) fn new(handle: &'a mut H, role: FileRole) -> Self {
        Self { handle, role }
    }

    pub(crate) fn seek(&mut self, position: u64, at: At) -> TransposeResult<()> {
        let role = self.role;
        self.handle.seek(position).with_context(|| {
            format!("unable to seek to {} = {} in {} file", at, position, role)
        })?;
        Ok(())
    }

    /// Fill `values` from the current position.
    pub(crate) fn read(&mut self, values: &mut [f64], at: At) -> TransposeResult<()> {
        let role = self.role;
        let bytes: &mut [u8] = bytemuck::must_cast_slice_mut(values);
        match self.handle.read(bytes) {
            Ok(0) => Err(TransposeError::log_unexpected_eof(role)
                .context(format!("reading {} from {} file", at, role))),
            Ok(_) => Ok(()),
            Err(err) => Err(TransposeError::log_io_error(err)
                .context(format!("unable to read {} from {} file", at, role))),
        }
    }

    /// Write all of `values` at the current position.
    pub(crate) fn write(&mut self, values: &[f64], at: At) -> TransposeResult<()> {
        let role = self.role;
        let bytes: &[u8] = bytemuck::must_cast_slice(values);
        self.handle
            .write(bytes)
            .with_context(|| format!("unable to write {} to {} file", at, role))?;
        Ok(())
    }

    pub(crate) fn read_at(
        &mut self,
        position: u64,
        values: &mut [f64],
        at: At,
    ) -> TransposeResult<()> {
        self.seek(position, at)?;
        self.read(values, at)
    }

    pub(crate) fn write_at(&mut self, position: u64, values: &[f64], at: At) -> TransposeResult<()> {
        self.seek(position, at)?;
        self.write(values, at)
    }
}
