/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

pub(crate) mod transpose_error;
pub use transpose_error::{
    ErrorContext, TransposeError, TransposeErrorKind, TransposeResult, UnexpectedEof,
};
