/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::slice;

use transposer::{Dims, TransposeResult};

use super::{
    cursor::{At, Cursor},
    DESTINATION_LAYOUT, SOURCE_LAYOUT,
};
use crate::{storage::StorageHandle, utils::alloc_elements};

/// For each `(j, k)`, read the `n0` source elements along `i` in one request and scatter
/// them to the destination one element at a time.
pub(super) fn vector_input<H: StorageHandle>(
    dims: &Dims,
    source: &mut Cursor<'_, H>,
    destination: &mut Cursor<'_, H>,
) -> TransposeResult<()> {
    let mut column = alloc_elements("read vector", dims.n0())?;

    for j in 0..dims.n1() {
        for k in 0..dims.n2() {
            source.read_at(
                SOURCE_LAYOUT.position(dims, 0, j, k),
                &mut column,
                At::column(j, k),
            )?;
            for (i, value) in column.iter().enumerate() {
                destination.write_at(
                    DESTINATION_LAYOUT.position(dims, i, j, k),
                    slice::from_ref(value),
                    At::element(i, j, k),
                )?;
            }
        }
    }
    Ok(())
}

/// For each `(j, i)`, gather the `n2` source elements along `k` one at a time and write
/// them to the destination in one request.
pub(super) fn vector_output<H: StorageHandle>(
    dims: &Dims,
    source: &mut Cursor<'_, H>,
    destination: &mut Cursor<'_, H>,
) -> TransposeResult<()> {
    let mut row = alloc_elements("write vector", dims.n2())?;

    for j in 0..dims.n1() {
        for i in 0..dims.n0() {
            for (k, value) in row.iter_mut().enumerate() {
                source.read_at(
                    SOURCE_LAYOUT.position(dims, i, j, k),
                    slice::from_mut(value),
                    At::element(i, j, k),
                )?;
            }
            destination.write_at(
                DESTINATION_LAYOUT.position(dims, i, j, 0),
                &row,
                At::row(i, j),
            )?;
        }
    }
    Ok(())
}
