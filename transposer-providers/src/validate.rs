/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use thiserror::Error;
use tracing::debug;
use transposer::{
    error::ErrorContext, Dims, FileRole, TransposeError, TransposeErrorKind, TransposeResult,
};

use crate::storage::StorageHandle;

/// How a file larger than the dimensions require is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Extra trailing bytes are ignored.
    #[default]
    AtLeast,
    /// The file must hold exactly `n0 * n1 * n2` elements.
    Exact,
}

impl SizePolicy {
    pub const fn from_exact(exact: bool) -> Self {
        if exact {
            Self::Exact
        } else {
            Self::AtLeast
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("{role} file is too small for dimensions {dims}: {actual} bytes, need {expected}")]
    TooSmall {
        role: FileRole,
        dims: Dims,
        actual: u64,
        expected: u64,
    },
    #[error("{role} file is too large for dimensions {dims}: {actual} bytes, need {expected}")]
    TooLarge {
        role: FileRole,
        dims: Dims,
        actual: u64,
        expected: u64,
    },
}

impl From<SizeError> for TransposeError {
    #[track_caller]
    fn from(err: SizeError) -> Self {
        TransposeError::new(TransposeErrorKind::Validation, err)
    }
}

/// Compare a byte length with the size `dims` require.
pub fn check_size(
    actual: u64,
    dims: &Dims,
    policy: SizePolicy,
    role: FileRole,
) -> Result<(), SizeError> {
    let expected = dims.byte_len();
    if actual < expected {
        return Err(SizeError::TooSmall {
            role,
            dims: *dims,
            actual,
            expected,
        });
    }
    if policy == SizePolicy::Exact && actual > expected {
        return Err(SizeError::TooLarge {
            role,
            dims: *dims,
            actual,
            expected,
        });
    }
    Ok(())
}

/// Stat the open file and check its length, returning the length on success.
pub fn validate<H: StorageHandle>(
    handle: &mut H,
    role: FileRole,
    dims: &Dims,
    policy: SizePolicy,
) -> TransposeResult<u64> {
    let actual = handle
        .stat()
        .with_context(|| format!("unable to get metadata for {} file", role))?;
    debug!("{} file holds {} bytes, policy {:?}", role, actual, policy);
    check_size(actual, dims, policy, role)?;
    Ok(actual)
}
