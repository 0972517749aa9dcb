/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use clap::Parser;
use transposer::{Algorithm, Dims, Driver};
use transposer_providers::pipeline::TransposeConfig;

use super::{CMDResult, CMDToolError};

const AFTER_HELP: &str = "\
<algorithm>:
    jki_map         iterates in sequence j, k, i, reading from input then writing to
                    output (this is the default)
    jik_map         iterates in sequence j, i, k, reading from input then writing to
                    output
    ijk_map         iterates in sequence i, j, k, reading from input then writing to
                    output
    vector_input    n1 contiguous elements are read from input then mapped by index
                    iteration to the output (requires n1 words of memory)
    vector_output   n3 elements are mapped by index iteration from the input then
                    written contiguously to the output (requires n3 words of memory)
    matrix          n1 x n3 blocks are read from input, transposed in memory and
                    written en masse to the output (requires 2 x n1 x n3 words of memory)

<driver>:
    fd              unbuffered file access, one OS call per request (this is the default)
    stream          buffered file access through a user-space stream";

/// Transpose a jki-ordered file of f64 values into jik order, out of core.
#[derive(Debug, Parser)]
#[command(name = "jki_to_jik", version, after_help = AFTER_HELP)]
pub struct TransposeArgs {
    /// Range of index i
    #[arg(short = '1', long = "n1", value_name = "#", value_parser = parse_dimension)]
    pub n1: Option<usize>,

    /// Range of index j
    #[arg(short = '2', long = "n2", value_name = "#", value_parser = parse_dimension)]
    pub n2: Option<usize>,

    /// Range of index k
    #[arg(short = '3', long = "n3", value_name = "#", value_parser = parse_dimension)]
    pub n3: Option<usize>,

    /// Read (or possibly init) this file as the source
    #[arg(short = 'i', long = "input", value_name = "FILEPATH", value_parser = parse_file_name)]
    pub input: Option<String>,

    /// Write this file as the destination
    #[arg(short = 'o', long = "output", value_name = "FILEPATH", value_parser = parse_file_name)]
    pub output: Option<String>,

    /// File sizes must exactly match the n1/n2/n3 dimensions
    #[arg(short = 'x', long = "exact-dims")]
    pub exact_dims: bool,

    /// Use this algorithm for the input init and the file processing
    #[arg(short = 'a', long = "algorithm", value_name = "ALGORITHM", default_value_t)]
    pub algorithm: Algorithm,

    /// Use this i/o driver for all file access
    #[arg(
        short = 'd',
        long = "io-driver",
        visible_alias = "driver",
        value_name = "DRIVER",
        default_value_t
    )]
    pub driver: Driver,

    /// Generate newly-initialized data in the input file
    #[arg(short = 'I', long = "init-input")]
    pub init_input: bool,
}

impl TransposeArgs {
    /// Check the arguments that clap leaves optional and build the run configuration.
    pub fn into_config(self) -> CMDResult<TransposeConfig> {
        let dims = Dims::new(
            self.n1.unwrap_or(0),
            self.n2.unwrap_or(0),
            self.n3.unwrap_or(0),
        )?;
        let input = self
            .input
            .ok_or_else(|| CMDToolError::invalid_argument("no input file name provided"))?;

        Ok(TransposeConfig {
            input: input.into(),
            output: self.output.map(Into::into),
            dims,
            exact_dims: self.exact_dims,
            algorithm: self.algorithm,
            driver: self.driver,
            init_input: self.init_input,
        })
    }
}

/// Accept any non-empty file name.
pub fn parse_file_name(arg: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err("invalid file name".to_string())
    } else {
        Ok(arg.to_string())
    }
}

/// Parse a strictly positive dimension.
///
/// A `0x` or `0X` prefix selects hexadecimal and any other leading `0` selects octal;
/// everything else is decimal.
pub fn parse_dimension(arg: &str) -> Result<usize, String> {
    let (digits, radix) = if let Some(hex) = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
    {
        (hex, 16)
    } else if let Some(octal) = arg.strip_prefix('0').filter(|d| !d.is_empty()) {
        (octal, 8)
    } else {
        (arg, 10)
    };

    match usize::from_str_radix(digits, radix) {
        Ok(0) => Err("dimension must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(err) => Err(format!("invalid dimension {:?}: {}", arg, err)),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use transposer_providers::validate::SizePolicy;

    use super::*;

    #[rstest]
    #[case("12", 12)]
    #[case("0x1f", 31)]
    #[case("0X10", 16)]
    #[case("017", 15)]
    #[case("1", 1)]
    fn dimensions_follow_c_radix_rules(#[case] arg: &str, #[case] expected: usize) {
        assert_eq!(parse_dimension(arg), Ok(expected));
    }

    #[rstest]
    #[case("0")]
    #[case("00")]
    #[case("0x0")]
    #[case("")]
    #[case("-3")]
    #[case("08")]
    #[case("12abc")]
    #[case("0x")]
    fn bad_dimensions_are_rejected(#[case] arg: &str) {
        assert!(parse_dimension(arg).is_err(), "{:?} was accepted", arg);
    }

    #[test]
    fn short_options_build_a_config() {
        let args = TransposeArgs::try_parse_from([
            "jki_to_jik",
            "-1",
            "4",
            "-2",
            "0x3",
            "-3",
            "2",
            "-i",
            "in.bin",
            "-o",
            "out.bin",
            "-x",
            "-a",
            "MATRIX",
            "-d",
            "stream",
            "-I",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.dims, Dims::new(4, 3, 2).unwrap());
        assert_eq!(config.input, std::path::PathBuf::from("in.bin"));
        assert_eq!(config.output, Some("out.bin".into()));
        assert_eq!(config.size_policy(), SizePolicy::Exact);
        assert_eq!(config.algorithm, Algorithm::Matrix);
        assert_eq!(config.driver, Driver::Stream);
        assert!(config.init_input);
    }

    #[test]
    fn long_options_and_defaults() {
        let args = TransposeArgs::try_parse_from([
            "jki_to_jik",
            "--n1=2",
            "--n2",
            "2",
            "--n3=2",
            "--input=in.bin",
            "--driver",
            "FD",
        ])
        .unwrap();

        let config = args.into_config().unwrap();
        assert_eq!(config.algorithm, Algorithm::JkiMap);
        assert_eq!(config.driver, Driver::Fd);
        assert_eq!(config.output, None);
        assert!(!config.exact_dims);
        assert!(!config.init_input);
    }

    #[test]
    fn unknown_names_fail_to_parse() {
        let err = TransposeArgs::try_parse_from(["jki_to_jik", "-a", "diagonal"]).unwrap_err();
        assert!(err.to_string().contains("invalid algorithm name: diagonal"));

        let err = TransposeArgs::try_parse_from(["jki_to_jik", "--io-driver", "mmap"]).unwrap_err();
        assert!(err.to_string().contains("invalid i/o driver name: mmap"));
    }

    #[rstest]
    #[case("-i")]
    #[case("-o")]
    #[case("--input")]
    #[case("--output")]
    fn empty_file_names_are_rejected(#[case] option: &str) {
        let err = TransposeArgs::try_parse_from(["jki_to_jik", option, ""]).unwrap_err();
        assert!(err.to_string().contains("invalid file name"));
        assert_eq!(CMDToolError::from(err).exit_code, libc::EINVAL);
    }

    #[test]
    fn missing_dimension_or_input_is_invalid() {
        let args = TransposeArgs::try_parse_from(["jki_to_jik", "-1", "2", "-2", "2", "-i", "a"])
            .unwrap();
        let err = args.into_config().unwrap_err();
        assert_eq!(err.exit_code, libc::EINVAL);
        assert_eq!(err.details, "invalid dimension n3: 0");

        let args = TransposeArgs::try_parse_from(["jki_to_jik", "-1", "2", "-2", "2", "-3", "2"])
            .unwrap();
        let err = args.into_config().unwrap_err();
        assert_eq!(err.details, "no input file name provided");
    }
}
