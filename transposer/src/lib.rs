/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
#![cfg_attr(
    not(test),
    warn(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

pub mod algorithm;
pub mod dims;
pub mod error;
pub mod layout;

// Top level exports.
pub use algorithm::{Algorithm, Driver, FileRole, UnknownName};
pub use dims::{Dims, DimsError, ELEMENT_SIZE};
pub use error::{TransposeError, TransposeErrorKind, TransposeResult};
pub use layout::Layout;
