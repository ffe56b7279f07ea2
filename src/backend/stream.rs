// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Logging to a character device.
//!
//! Each line goes out as `<tag> <prefix> | <message>\n`, for example:
//!
//! ```text
//! I 0:00:01.234 temp.rs:10 read_temp Heap:40312 | temp=42
//! ```
//!
//! The device is held exclusively for the whole line and flushed at the end.  The first write
//! error abandons the rest of the line, so a device never receives a line missing its level
//! letter.  The caller is never told.

use crate::format::Line;

/// A byte sink for log lines.
///
/// This is an object safe view of an [`embedded_io::Write`] device, which lets the facility store
/// the device behind a `dyn` reference.  Any `embedded_io::Write` is a `Console`.
pub trait Console {
    /// Write all of `bytes`.  Returns `false` if the device failed.
    fn write_bytes(&mut self, bytes: &[u8]) -> bool;

    /// Push out anything buffered in the device.
    fn flush(&mut self);
}

impl<W: embedded_io::Write> Console for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> bool {
        self.write_all(bytes).is_ok()
    }

    fn flush(&mut self) {
        let _ = embedded_io::Write::flush(self);
    }
}

/// Write one line to the device.
pub fn emit(console: &mut dyn Console, line: &Line<'_>) {
    let mut tag = [0u8; 4];
    let tag = line.level().tag().encode_utf8(&mut tag);

    let parts: [&[u8]; 6] = [
        tag.as_bytes(),
        b" ",
        line.prefix().as_bytes(),
        b" | ",
        line.message().as_bytes(),
        b"\n",
    ];
    if parts.iter().all(|part| console.write_bytes(part)) {
        console.flush();
    }
}
