/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

const PREFIXES: [&str; 6] = ["", "Ki", "Mi", "Gi", "Ti", "Pi"];

/// Format a byte count with a binary unit prefix.
///
/// The value is divided by 1024 while it is strictly larger than 1024, up to `PiB`.
/// Scaled values also show the exact count: `"1.50 KiB (1536 bytes)"`. Values that need no
/// prefix print as `"512 B"`.
pub fn natural_unit(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut prefix = 0;
    while value > 1024.0 && prefix < PREFIXES.len() - 1 {
        value /= 1024.0;
        prefix += 1;
    }

    if prefix > 0 {
        format!("{:.2} {}B ({} bytes)", value, PREFIXES[prefix], bytes)
    } else {
        format!("{} B", bytes)
    }
}
