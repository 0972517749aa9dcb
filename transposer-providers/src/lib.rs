/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
#![cfg_attr(
    not(test),
    warn(clippy::panic, clippy::unwrap_used, clippy::expect_used)
)]

pub mod utils;

pub mod storage;

pub mod transpose;

pub mod init;

pub mod validate;

pub mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
