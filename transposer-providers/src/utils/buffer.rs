/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::collections::TryReserveError;

use thiserror::Error;
use tracing::info;
use transposer::{TransposeError, TransposeErrorKind, TransposeResult, ELEMENT_SIZE};

use super::natural_unit;

/// A vector or matrix buffer could not be reserved.
#[derive(Debug, Clone, Error)]
#[error("unable to allocate {what} of {elements} elements")]
pub struct AllocationError {
    pub what: &'static str,
    pub elements: usize,
    #[source]
    pub source: TryReserveError,
}

impl From<AllocationError> for TransposeError {
    #[track_caller]
    fn from(err: AllocationError) -> Self {
        TransposeError::new(TransposeErrorKind::Allocation, err)
    }
}

/// Allocate a zeroed buffer of `elements` values, reporting failure instead of aborting.
///
/// The size of a successful allocation is logged under the name `what`.
pub fn alloc_elements(what: &'static str, elements: usize) -> TransposeResult<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(elements)
        .map_err(|source| AllocationError {
            what,
            elements,
            source,
        })?;
    buffer.resize(elements, 0.0);

    info!(
        "{} of size {} allocated",
        what,
        natural_unit((elements * ELEMENT_SIZE) as u64)
    );
    Ok(buffer)
}
