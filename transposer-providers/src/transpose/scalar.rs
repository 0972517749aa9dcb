/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::slice;

use transposer::{Dims, TransposeResult};

use super::{
    cursor::{At, Cursor},
    LoopOrder, DESTINATION_LAYOUT, SOURCE_LAYOUT,
};
use crate::storage::StorageHandle;

/// Move one element at a time, visiting the indices in `order`.
///
/// Each step seeks and reads a single element from the source and seeks and writes it to
/// the destination. The order only changes which of the two files sees sequential
/// positions.
pub(super) fn map_elements<H: StorageHandle>(
    order: LoopOrder,
    dims: &Dims,
    source: &mut Cursor<'_, H>,
    destination: &mut Cursor<'_, H>,
) -> TransposeResult<()> {
    let mut value = 0.0f64;
    order.try_for_each(dims, |i, j, k| {
        let at = At::element(i, j, k);
        source.read_at(
            SOURCE_LAYOUT.position(dims, i, j, k),
            slice::from_mut(&mut value),
            at,
        )?;
        destination.write_at(
            DESTINATION_LAYOUT.position(dims, i, j, k),
            slice::from_ref(&value),
            at,
        )
    })
}
