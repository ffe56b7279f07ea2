// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Source path trimming.
//!
//! `file!()` expands to the path of the source file as the compiler saw it, which is often long
//! enough to use up most of the line prefix.  Only the final segment is logged.

/// Return the part of `path` after the last `/` or `\`.
///
/// The result borrows from `path`; nothing is copied.  A path without separators is returned
/// whole, and a path ending in a separator gives an empty string.
pub const fn basename(path: &str) -> &str {
    let bytes = path.as_bytes();
    let mut i = bytes.len();
    while i > 0 {
        if bytes[i - 1] == b'/' || bytes[i - 1] == b'\\' {
            break;
        }
        i -= 1;
    }
    let (_, tail) = bytes.split_at(i);
    // Splitting just after an ASCII separator always leaves valid UTF-8.
    match core::str::from_utf8(tail) {
        Ok(name) => name,
        Err(_) => "",
    }
}
