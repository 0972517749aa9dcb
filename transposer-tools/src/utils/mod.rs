/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
pub mod args;
pub use args::{parse_dimension, parse_file_name, TransposeArgs};

pub mod cmd_tool_error;
pub use cmd_tool_error::*;

pub type CMDResult<T> = Result<T, CMDToolError>;

pub mod tracing;
pub use tracing::{init_subscriber, init_test_subscriber};
