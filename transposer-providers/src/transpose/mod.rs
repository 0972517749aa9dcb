/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! The six transpose algorithms.
//!
//! All of them copy, for every `(i, j, k)`, the element at the `jki` offset of the source
//! to the `jik` offset of the destination. They differ in loop nesting and in how many
//! elements each storage request moves:
//!
//! | algorithm       | source requests     | destination requests | extra memory  |
//! |-----------------|---------------------|----------------------|---------------|
//! | `ijk_map`       | 1 element           | 1 element            | 1 element     |
//! | `jki_map`       | 1 element           | 1 element            | 1 element     |
//! | `jik_map`       | 1 element           | 1 element            | 1 element     |
//! | `vector_input`  | `n0` elements       | 1 element            | `n0`          |
//! | `vector_output` | 1 element           | `n2` elements        | `n2`          |
//! | `matrix`        | `n0 * n2` elements  | `n0 * n2` elements   | `2 * n0 * n2` |

use tracing::debug;
use transposer::{Algorithm, Dims, FileRole, Layout, TransposeResult};

use crate::storage::StorageHandle;

pub(crate) mod cursor;
use cursor::Cursor;

mod traversal;
pub use traversal::LoopOrder;

mod matrix;
pub use matrix::transpose_plane;

mod scalar;
mod vector;

/// Layout the source file is read under.
pub const SOURCE_LAYOUT: Layout = Layout::Jki;

/// Layout the destination file is written under.
pub const DESTINATION_LAYOUT: Layout = Layout::Jik;

/// Copy every element of `source` to its transposed position in `destination` using
/// `algorithm`.
///
/// Both handles must already be open: the source readable and holding at least
/// `dims.byte_len()` bytes, the destination writable. Any storage failure or premature
/// end of the source aborts the transpose; the destination is left as partially written.
pub fn transpose<H: StorageHandle>(
    algorithm: Algorithm,
    dims: &Dims,
    source: &mut H,
    destination: &mut H,
) -> TransposeResult<()> {
    let mut source = Cursor::new(source, FileRole::Input);
    let mut destination = Cursor::new(destination, FileRole::Output);

    debug!(
        "transposing {} elements from {} to {} with {}",
        dims.len(),
        SOURCE_LAYOUT,
        DESTINATION_LAYOUT,
        algorithm
    );

    match algorithm {
        Algorithm::IjkMap => {
            scalar::map_elements(LoopOrder::Ijk, dims, &mut source, &mut destination)
        }
        Algorithm::JkiMap => {
            scalar::map_elements(LoopOrder::Jki, dims, &mut source, &mut destination)
        }
        Algorithm::JikMap => {
            scalar::map_elements(LoopOrder::Jik, dims, &mut source, &mut destination)
        }
        Algorithm::VectorInput => vector::vector_input(dims, &mut source, &mut destination),
        Algorithm::VectorOutput => vector::vector_output(dims, &mut source, &mut destination),
        Algorithm::Matrix => matrix::matrix(dims, &mut source, &mut destination),
    }
}
