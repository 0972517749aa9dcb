/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// Install the process-wide subscriber used by `jki_to_jik`.
///
/// Diagnostics go to `stdout` and errors share the same stream, filtered by `RUST_LOG`
/// with `info` as the default level.
pub fn init_subscriber() {
    let fmt_layer = fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .init();
}

/// Install a subscriber for the current test thread only.
///
/// The returned guard uninstalls it when dropped, so tests running in parallel do not
/// conflict.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(false).with_test_writer();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt_layer)
        .set_default()
}

fn env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}
