/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Helpers shared by the unit and integration tests.

use std::{fs, path::Path};

use transposer::{Dims, Layout};

use crate::transpose::{DESTINATION_LAYOUT, SOURCE_LAYOUT};

/// Write `values` to `path` in host byte order, replacing any existing file.
pub fn write_values(path: &Path, values: &[f64]) {
    fs::write(path, bytemuck::must_cast_slice::<f64, u8>(values)).expect("write test file");
}

/// Read the whole file at `path` as host byte order `f64` values.
pub fn read_values(path: &Path) -> Vec<f64> {
    let bytes = fs::read(path).expect("read test file");
    assert_eq!(bytes.len() % std::mem::size_of::<f64>(), 0);
    bytes
        .chunks_exact(std::mem::size_of::<f64>())
        .map(|chunk| f64::from_ne_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// Source data where every element is distinct and differs from its own offset.
///
/// The element `(i, j, k)` holds `1000 * i + 100 * j + k + 0.5`, so a misplaced element
/// cannot go unnoticed for the dimensions used in tests.
pub fn distinct_values(dims: &Dims) -> Vec<f64> {
    let mut values = vec![0.0; dims.len()];
    for (offset, value) in values.iter_mut().enumerate() {
        let (i, j, k) = SOURCE_LAYOUT.index(dims, offset);
        *value = (1000 * i + 100 * j + k) as f64 + 0.5;
    }
    values
}

/// The destination a correct transpose produces from `source`.
pub fn expected_transpose(dims: &Dims, source: &[f64]) -> Vec<f64> {
    permute(dims, source, SOURCE_LAYOUT, DESTINATION_LAYOUT)
}

/// Move every element of `values` from its offset under `from` to its offset under `to`.
pub fn permute(dims: &Dims, values: &[f64], from: Layout, to: Layout) -> Vec<f64> {
    assert_eq!(values.len(), dims.len());
    let mut permuted = vec![0.0; dims.len()];
    for (offset, value) in values.iter().enumerate() {
        let (i, j, k) = from.index(dims, offset);
        permuted[to.offset(dims, i, j, k)] = *value;
    }
    permuted
}
