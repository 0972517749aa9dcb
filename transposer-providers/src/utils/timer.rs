/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::time::{Duration, Instant};

/// Monotonic wall-clock timer for the init and transpose phases.
#[derive(Clone, Debug)]
pub struct Timer {
    check_point: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            check_point: Instant::now(),
        }
    }

    /// Restart the measurement from now.
    pub fn reset(&mut self) {
        self.check_point = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.check_point.elapsed()
    }
}
