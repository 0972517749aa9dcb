/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

/// A name that does not match any variant of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {what} name: {name}")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

/// Loop nesting and buffering strategy used to move the data.
///
/// Every algorithm reads the source under the `jki` layout and writes the destination
/// under the `jik` layout. Only the order of the visits and the size of the I/O requests
/// differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Iterates i, j, k with one seek-read and one seek-write per element.
    IjkMap,
    /// Iterates j, k, i with one seek-read and one seek-write per element.
    #[default]
    JkiMap,
    /// Iterates j, i, k with one seek-read and one seek-write per element.
    JikMap,
    /// Reads `n0` contiguous source elements per `(j, k)` and scatters them.
    VectorInput,
    /// Gathers `n2` source elements per `(j, i)` and writes them contiguously.
    VectorOutput,
    /// Reads one `n0 x n2` block per `j`, transposes it in memory and writes it whole.
    Matrix,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::IjkMap,
        Algorithm::JkiMap,
        Algorithm::JikMap,
        Algorithm::VectorInput,
        Algorithm::VectorOutput,
        Algorithm::Matrix,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::IjkMap => "ijk_map",
            Algorithm::JkiMap => "jki_map",
            Algorithm::JikMap => "jik_map",
            Algorithm::VectorInput => "vector_input",
            Algorithm::VectorOutput => "vector_output",
            Algorithm::Matrix => "matrix",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownName;

    /// Names are matched without regard to ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                what: "algorithm",
                name: s.to_string(),
            })
    }
}

/// Storage access backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Driver {
    /// Unbuffered access straight to the OS file.
    #[default]
    Fd,
    /// User-space buffered stream over the file.
    Stream,
}

impl Driver {
    pub const ALL: [Driver; 2] = [Driver::Fd, Driver::Stream];

    pub const fn name(self) -> &'static str {
        match self {
            Driver::Fd => "fd",
            Driver::Stream => "stream",
        }
    }
}

impl Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Driver {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName {
                what: "i/o driver",
                name: s.to_string(),
            })
    }
}

/// Which side of the transpose a file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Input,
    Output,
}

impl Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRole::Input => f.write_str("input"),
            FileRole::Output => f.write_str("output"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        for driver in Driver::ALL {
            assert_eq!(driver.to_string().parse::<Driver>(), Ok(driver));
        }
    }

    #[rstest]
    #[case("MATRIX", Algorithm::Matrix)]
    #[case("Vector_Input", Algorithm::VectorInput)]
    #[case("jik_MAP", Algorithm::JikMap)]
    fn algorithm_names_ignore_case(#[case] name: &str, #[case] expected: Algorithm) {
        assert_eq!(name.parse::<Algorithm>(), Ok(expected));
    }

    #[test]
    fn defaults_match_the_tool() {
        assert_eq!(Algorithm::default(), Algorithm::JkiMap);
        assert_eq!(Driver::default(), Driver::Fd);
    }

    #[test]
    fn unknown_names_are_reported() {
        let err = "kji_map".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.to_string(), "invalid algorithm name: kji_map");

        let err = "mmap".parse::<Driver>().unwrap_err();
        assert_eq!(err.to_string(), "invalid i/o driver name: mmap");

        assert!("".parse::<Driver>().is_err());
    }
}
