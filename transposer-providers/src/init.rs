/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Synthetic source data.
//!
//! The initializer writes the source file sequentially from its current position, using
//! the loop nesting of the selected algorithm to decide the order of the values and a
//! layout offset function to compute each value:
//!
//! | algorithm       | nesting            | value    |
//! |-----------------|--------------------|----------|
//! | `ijk_map`       | i, j, k            | `ijk`    |
//! | `jki_map`       | j, k, i            | `jki`    |
//! | `jik_map`       | i, j, k            | `jik`    |
//! | `vector_input`  | j, k, vector of i  | `jki`    |
//! | `vector_output` | j, i, vector of k  | `jki`    |
//! | `matrix`        | j, block of (k, i) | `jki`    |
//!
//! Only some combinations store each element's own `jki` offset at that offset. The others
//! still produce a file of the right size with deterministic content, which is all a write
//! benchmark needs.

use std::slice;

use transposer::{Algorithm, Dims, FileRole, Layout, TransposeResult};

use crate::{
    storage::StorageHandle,
    transpose::{
        cursor::{At, Cursor},
        LoopOrder,
    },
    utils::alloc_elements,
};

/// Populate `handle` with `dims.len()` synthetic elements using `algorithm`'s nesting.
pub fn initialize<H: StorageHandle>(
    algorithm: Algorithm,
    dims: &Dims,
    handle: &mut H,
) -> TransposeResult<()> {
    let mut output = Cursor::new(handle, FileRole::Input);

    match algorithm {
        Algorithm::IjkMap => write_each(LoopOrder::Ijk, Layout::Ijk, dims, &mut output),
        Algorithm::JkiMap => write_each(LoopOrder::Jki, Layout::Jki, dims, &mut output),
        Algorithm::JikMap => write_each(LoopOrder::Ijk, Layout::Jik, dims, &mut output),
        Algorithm::VectorInput => {
            let mut column = alloc_elements("init read vector", dims.n0())?;
            for j in 0..dims.n1() {
                for k in 0..dims.n2() {
                    for (i, value) in column.iter_mut().enumerate() {
                        *value = Layout::Jki.offset(dims, i, j, k) as f64;
                    }
                    output.write(&column, At::column(j, k))?;
                }
            }
            Ok(())
        }
        Algorithm::VectorOutput => {
            let mut row = alloc_elements("init write vector", dims.n2())?;
            for j in 0..dims.n1() {
                for i in 0..dims.n0() {
                    for (k, value) in row.iter_mut().enumerate() {
                        *value = Layout::Jki.offset(dims, i, j, k) as f64;
                    }
                    output.write(&row, At::row(i, j))?;
                }
            }
            Ok(())
        }
        Algorithm::Matrix => {
            let n0 = dims.n0();
            let mut block = alloc_elements("init read+write matrix", n0 * dims.n2())?;
            for j in 0..dims.n1() {
                for k in 0..dims.n2() {
                    for i in 0..n0 {
                        block[n0 * k + i] = Layout::Jki.offset(dims, i, j, k) as f64;
                    }
                }
                output.write(&block, At::plane(j))?;
            }
            Ok(())
        }
    }
}

fn write_each<H: StorageHandle>(
    order: LoopOrder,
    layout: Layout,
    dims: &Dims,
    output: &mut Cursor<'_, H>,
) -> TransposeResult<()> {
    order.try_for_each(dims, |i, j, k| {
        let value = layout.offset(dims, i, j, k) as f64;
        output.write(slice::from_ref(&value), At::element(i, j, k))
    })
}
