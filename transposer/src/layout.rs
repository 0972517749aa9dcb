/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! Linear orderings of a rank-3 tensor.
//!
//! A [`Layout`] maps an index triple `(i, j, k)` with `i < n0`, `j < n1` and `k < n2` to an
//! element offset in `0..n0 * n1 * n2`. The name lists the indices from the slowest to the
//! fastest varying one:
//!
//! | layout | offset                      |
//! |--------|-----------------------------|
//! | `ijk`  | `i * n2 * n1 + j * n2 + k`  |
//! | `jki`  | `j * n0 * n2 + k * n0 + i`  |
//! | `jik`  | `j * n0 * n2 + i * n2 + k`  |
//!
//! Indices are produced by bounded loops inside the engine and are never checked here.

use std::fmt::{self, Display};

use crate::{Dims, ELEMENT_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Ijk,
    Jki,
    Jik,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Ijk, Layout::Jki, Layout::Jik];

    /// Element offset of `(i, j, k)`.
    #[inline]
    pub const fn offset(self, dims: &Dims, i: usize, j: usize, k: usize) -> usize {
        let (n0, n1, n2) = (dims.n0(), dims.n1(), dims.n2());
        match self {
            Layout::Ijk => i * n2 * n1 + j * n2 + k,
            Layout::Jki => j * n0 * n2 + k * n0 + i,
            Layout::Jik => j * n0 * n2 + i * n2 + k,
        }
    }

    /// Byte position of `(i, j, k)` from the start of the file.
    #[inline]
    pub const fn position(self, dims: &Dims, i: usize, j: usize, k: usize) -> u64 {
        (self.offset(dims, i, j, k) * ELEMENT_SIZE) as u64
    }

    /// Inverse of [`Layout::offset`].
    pub const fn index(self, dims: &Dims, offset: usize) -> (usize, usize, usize) {
        let (n0, n1, n2) = (dims.n0(), dims.n1(), dims.n2());
        match self {
            Layout::Ijk => {
                let i = offset / (n1 * n2);
                let rest = offset % (n1 * n2);
                (i, rest / n2, rest % n2)
            }
            Layout::Jki => {
                let j = offset / (n0 * n2);
                let rest = offset % (n0 * n2);
                (rest % n0, j, rest / n0)
            }
            Layout::Jik => {
                let j = offset / (n0 * n2);
                let rest = offset % (n0 * n2);
                (rest / n2, j, rest % n2)
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layout::Ijk => "ijk",
            Layout::Jki => "jki",
            Layout::Jik => "jik",
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
