/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::fmt::{self, Display};

use thiserror::Error;

/// Number of bytes occupied by one stored element.
pub const ELEMENT_SIZE: usize = std::mem::size_of::<f64>();

/// Reasons a dimension triple is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimsError {
    #[error("invalid dimension n{axis}: 0")]
    Zero { axis: usize },
    #[error("dimensions ({0}, {1}, {2}) overflow the addressable byte range")]
    Overflow(usize, usize, usize),
}

/// The extents `(n0, n1, n2)` of the `i`, `j` and `k` indices.
///
/// All three extents are strictly positive and the byte size `8 * n0 * n1 * n2` is
/// guaranteed to fit in both `usize` and `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dims {
    n: [usize; 3],
}

impl Dims {
    /// Validate and construct a dimension triple.
    pub fn new(n0: usize, n1: usize, n2: usize) -> Result<Self, DimsError> {
        for (axis, n) in [n0, n1, n2].into_iter().enumerate() {
            if n == 0 {
                return Err(DimsError::Zero { axis: axis + 1 });
            }
        }

        let bytes = n0
            .checked_mul(n1)
            .and_then(|v| v.checked_mul(n2))
            .and_then(|v| v.checked_mul(ELEMENT_SIZE))
            .ok_or(DimsError::Overflow(n0, n1, n2))?;
        u64::try_from(bytes).map_err(|_| DimsError::Overflow(n0, n1, n2))?;

        Ok(Self { n: [n0, n1, n2] })
    }

    /// Extent of the `i` index.
    #[inline]
    pub const fn n0(&self) -> usize {
        self.n[0]
    }

    /// Extent of the `j` index.
    #[inline]
    pub const fn n1(&self) -> usize {
        self.n[1]
    }

    /// Extent of the `k` index.
    #[inline]
    pub const fn n2(&self) -> usize {
        self.n[2]
    }

    /// Total number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.n[0] * self.n[1] * self.n[2]
    }

    /// Always false, the extents are strictly positive.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Total number of bytes needed to store every element.
    #[inline]
    pub const fn byte_len(&self) -> u64 {
        (self.len() * ELEMENT_SIZE) as u64
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.n[0], self.n[1], self.n[2])
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn accessors_report_extents() {
        let dims = Dims::new(2, 3, 5).unwrap();
        assert_eq!((dims.n0(), dims.n1(), dims.n2()), (2, 3, 5));
        assert_eq!(dims.len(), 30);
        assert_eq!(dims.byte_len(), 240);
        assert_eq!(dims.to_string(), "(2, 3, 5)");
    }

    #[rstest]
    #[case(0, 1, 1, 1)]
    #[case(1, 0, 1, 2)]
    #[case(1, 1, 0, 3)]
    fn zero_extent_is_rejected(
        #[case] n0: usize,
        #[case] n1: usize,
        #[case] n2: usize,
        #[case] axis: usize,
    ) {
        assert_eq!(Dims::new(n0, n1, n2), Err(DimsError::Zero { axis }));
    }

    #[test]
    fn overflowing_byte_size_is_rejected() {
        let err = Dims::new(usize::MAX, 2, 1).unwrap_err();
        assert_eq!(err, DimsError::Overflow(usize::MAX, 2, 1));

        let err = Dims::new(usize::MAX / 4, 1, 1).unwrap_err();
        assert!(matches!(err, DimsError::Overflow(..)));
    }
}
