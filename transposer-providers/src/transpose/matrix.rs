/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use transposer::{Dims, TransposeResult};

use super::{
    cursor::{At, Cursor},
    DESTINATION_LAYOUT, SOURCE_LAYOUT,
};
use crate::{storage::StorageHandle, utils::alloc_elements};

/// For each `j`, read the whole `(i, k)` plane, transpose it in memory and write it back in
/// one request.
pub(super) fn matrix<H: StorageHandle>(
    dims: &Dims,
    source: &mut Cursor<'_, H>,
    destination: &mut Cursor<'_, H>,
) -> TransposeResult<()> {
    let plane = dims.n0() * dims.n2();
    let mut block = alloc_elements("read matrix", plane)?;
    let mut transposed = alloc_elements("write matrix", plane)?;

    for j in 0..dims.n1() {
        source.read_at(SOURCE_LAYOUT.position(dims, 0, j, 0), &mut block, At::plane(j))?;
        transpose_plane(&block, &mut transposed, dims.n0(), dims.n2());
        destination.write_at(
            DESTINATION_LAYOUT.position(dims, 0, j, 0),
            &transposed,
            At::plane(j),
        )?;
    }
    Ok(())
}

/// Transpose a plane stored as `block[k * n0 + i]` into `transposed[i * n2 + k]`.
pub fn transpose_plane(block: &[f64], transposed: &mut [f64], n0: usize, n2: usize) {
    debug_assert_eq!(block.len(), n0 * n2);
    debug_assert_eq!(transposed.len(), n0 * n2);

    for (i, row) in transposed.chunks_exact_mut(n2).enumerate() {
        for (k, value) in row.iter_mut().enumerate() {
            *value = block[k * n0 + i];
        }
    }
}
