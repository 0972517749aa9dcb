/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::fmt;

use transposer::{DimsError, TransposeError};

/// Failure of a command line tool, carrying the process exit code to report.
pub struct CMDToolError {
    pub details: String,
    pub exit_code: i32,
}

impl CMDToolError {
    /// A command line usage problem.
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        CMDToolError {
            details: details.into(),
            exit_code: libc::EINVAL,
        }
    }
}

impl fmt::Debug for CMDToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (exit code {})", self.details, self.exit_code)
    }
}

impl fmt::Display for CMDToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details)
    }
}

impl std::error::Error for CMDToolError {}

impl From<TransposeError> for CMDToolError {
    fn from(err: TransposeError) -> Self {
        CMDToolError {
            details: err.to_string(),
            exit_code: err.exit_code(),
        }
    }
}

impl From<DimsError> for CMDToolError {
    fn from(err: DimsError) -> Self {
        CMDToolError::invalid_argument(err.to_string())
    }
}

impl From<clap::Error> for CMDToolError {
    fn from(err: clap::Error) -> Self {
        CMDToolError::invalid_argument(err.to_string())
    }
}
