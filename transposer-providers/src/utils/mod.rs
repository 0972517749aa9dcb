/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
pub mod timer;
pub use timer::Timer;

pub mod byte_size;
pub use byte_size::natural_unit;

pub mod buffer;
pub use buffer::{alloc_elements, AllocationError};
