/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use transposer::{Dims, TransposeResult};

/// Outer-to-inner nesting of the three index loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOrder {
    Ijk,
    Jki,
    Jik,
}

impl LoopOrder {
    /// Call `f(i, j, k)` for every index triple in this nesting, stopping at the first
    /// error.
    pub fn try_for_each<F>(self, dims: &Dims, mut f: F) -> TransposeResult<()>
    where
        F: FnMut(usize, usize, usize) -> TransposeResult<()>,
    {
        let (n0, n1, n2) = (dims.n0(), dims.n1(), dims.n2());
        match self {
            LoopOrder::Ijk => {
                for i in 0..n0 {
                    for j in 0..n1 {
                        for k in 0..n2 {
                            f(i, j, k)?;
                        }
                    }
                }
            }
            LoopOrder::Jki => {
                for j in 0..n1 {
                    for k in 0..n2 {
                        for i in 0..n0 {
                            f(i, j, k)?;
                        }
                    }
                }
            }
            LoopOrder::Jik => {
                for j in 0..n1 {
                    for i in 0..n0 {
                        for k in 0..n2 {
                            f(i, j, k)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use transposer::{Layout, TransposeError, TransposeErrorKind};

    use super::*;

    fn visits(order: LoopOrder, dims: &Dims) -> Vec<(usize, usize, usize)> {
        let mut visited = Vec::new();
        order
            .try_for_each(dims, |i, j, k| {
                visited.push((i, j, k));
                Ok(())
            })
            .unwrap();
        visited
    }

    #[test]
    fn nesting_matches_the_layout_of_the_same_name() {
        let dims = Dims::new(2, 3, 4).unwrap();
        for (order, layout) in [
            (LoopOrder::Ijk, Layout::Ijk),
            (LoopOrder::Jki, Layout::Jki),
            (LoopOrder::Jik, Layout::Jik),
        ] {
            let offsets: Vec<usize> = visits(order, &dims)
                .into_iter()
                .map(|(i, j, k)| layout.offset(&dims, i, j, k))
                .collect();
            let expected: Vec<usize> = (0..dims.len()).collect();
            assert_eq!(offsets, expected, "{:?}", order);
        }
    }

    #[test]
    fn stops_at_the_first_error() {
        let dims = Dims::new(3, 3, 3).unwrap();
        let mut calls = 0;
        let err = LoopOrder::Jki
            .try_for_each(&dims, |_, _, _| {
                calls += 1;
                if calls == 5 {
                    Err(TransposeError::log_config_error("stop"))
                } else {
                    Ok(())
                }
            })
            .unwrap_err();
        assert_eq!(err.kind(), TransposeErrorKind::Config);
        assert_eq!(calls, 5);
    }
}
