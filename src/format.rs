// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Assembly of a log line.
//!
//! A line is kept as two halves, each in its own fixed buffer:
//!
//! - the prefix: `<uptime> <file>:<line> <routine> Heap:<free>`
//! - the message: the caller's formatted text.
//!
//! Keeping them apart lets each backend join them its own way.  The stream backend puts them on
//! one line after the level letter, the structured backend hands them to the platform logger.

use core::ffi::CStr;
use core::fmt::{self, Write};

use crate::board::Board;
use crate::buffer::FixedBuf;
use crate::level::Level;
use crate::location::Location;
use crate::uptime::Elapsed;

/// Size of the prefix buffer, including the terminator.
pub const PREFIX_LEN: usize = 72;

/// Size of the message buffer, including the terminator.
pub const MESSAGE_LEN: usize = 140;

/// The scratch space for one log line.
///
/// There is normally a single one of these for the whole program, inside the facility.  All the
/// formatting methods take `&mut self`, so it can only be used from one place at a time.
pub struct LineFormatter {
    prefix: FixedBuf<PREFIX_LEN>,
    message: FixedBuf<MESSAGE_LEN>,
}

impl LineFormatter {
    /// Create a formatter with empty buffers.
    pub const fn new() -> LineFormatter {
        LineFormatter {
            prefix: FixedBuf::new(),
            message: FixedBuf::new(),
        }
    }

    /// Format a line, overwriting whatever the buffers held before.
    ///
    /// The returned [`Line`] borrows the buffers, so it has to be consumed before the next call.
    pub fn format(
        &mut self,
        level: Level,
        location: &Location,
        board: &dyn Board,
        args: fmt::Arguments<'_>,
    ) -> Line<'_> {
        self.prefix.clear();
        self.message.clear();

        // Neither buffer can fail to take a write, they truncate instead.
        let _ = write!(
            self.prefix,
            "{} {}:{} {} Heap:{}",
            Elapsed::new(board.uptime()),
            location.basename(),
            location.line(),
            location.routine(),
            board.free_heap(),
        );
        let _ = self.message.write_fmt(args);

        Line {
            level,
            prefix: &self.prefix,
            message: &self.message,
        }
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// A formatted line, borrowed from a [`LineFormatter`].
#[derive(Clone, Copy)]
pub struct Line<'a> {
    level: Level,
    prefix: &'a FixedBuf<PREFIX_LEN>,
    message: &'a FixedBuf<MESSAGE_LEN>,
}

impl<'a> Line<'a> {
    /// The severity the line was logged at.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Uptime, location and free heap.
    pub fn prefix(&self) -> &'a str {
        self.prefix.as_str()
    }

    /// The caller's text.
    pub fn message(&self) -> &'a str {
        self.message.as_str()
    }

    /// The prefix as a C string.
    pub fn prefix_c(&self) -> &'a CStr {
        self.prefix.as_c_str()
    }

    /// The message as a C string.
    pub fn message_c(&self) -> &'a CStr {
        self.message.as_c_str()
    }

    /// Did either half lose text to truncation.
    pub fn is_truncated(&self) -> bool {
        self.prefix.is_truncated() || self.message.is_truncated()
    }
}

impl fmt::Debug for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("level", &self.level)
            .field("prefix", &self.prefix())
            .field("message", &self.message())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate std;

    use std::string::String;

    use fugit::MillisDurationU32;

    use super::*;

    /// A board with fixed readings.
    pub(crate) struct FixedBoard {
        pub(crate) uptime_ms: u32,
        pub(crate) free_heap: u32,
    }

    impl Board for FixedBoard {
        fn uptime(&self) -> MillisDurationU32 {
            MillisDurationU32::from_ticks(self.uptime_ms)
        }

        fn free_heap(&self) -> u32 {
            self.free_heap
        }
    }

    const BOARD: FixedBoard = FixedBoard {
        uptime_ms: 1_234,
        free_heap: 40_312,
    };

    #[test]
    fn prefix_and_message() {
        let mut fmt = LineFormatter::new();
        let loc = Location::new("/sensors/temp.cpp", 10, "read_temp");
        let line = fmt.format(Level::Info, &loc, &BOARD, format_args!("temp={}", 42));

        assert_eq!(line.level(), Level::Info);
        assert_eq!(line.prefix(), "0:00:01.234 temp.cpp:10 read_temp Heap:40312");
        assert_eq!(line.message(), "temp=42");
        assert_eq!(line.message_c().to_bytes(), b"temp=42");
        assert!(!line.is_truncated());
    }

    #[test]
    fn message_is_bounded() {
        let mut fmt = LineFormatter::new();
        let loc = Location::new("a.rs", 1, "f");
        let long: String = core::iter::repeat('x').take(500).collect();
        let line = fmt.format(Level::Warn, &loc, &BOARD, format_args!("{}", long));

        assert_eq!(line.message().len(), MESSAGE_LEN - 1);
        assert!(line.is_truncated());
        assert_eq!(line.message_c().to_bytes().len(), MESSAGE_LEN - 1);
    }

    #[test]
    fn prefix_is_bounded() {
        let mut fmt = LineFormatter::new();
        let loc = Location::new(
            "/a/very_long_module_name_for_a_sensor_driver.rs",
            65_535,
            "an_equally_long_routine_name_that_will_not_fit",
        );
        let board = FixedBoard {
            uptime_ms: u32::MAX,
            free_heap: u32::MAX,
        };
        let line = fmt.format(Level::Error, &loc, &board, format_args!("ok"));

        assert_eq!(line.prefix().len(), PREFIX_LEN - 1);
        assert!(line.prefix().starts_with("1193:02:47.295 very_long_module_name"));
        assert_eq!(line.message(), "ok");
        assert!(line.is_truncated());
    }

    #[test]
    fn previous_content_is_replaced() {
        let mut fmt = LineFormatter::new();
        let loc = Location::new("a.rs", 1, "f");
        let long: String = core::iter::repeat('y').take(300).collect();
        let _ = fmt.format(Level::Debug, &loc, &BOARD, format_args!("{}", long));
        let line = fmt.format(Level::Debug, &loc, &BOARD, format_args!("short"));

        assert_eq!(line.message(), "short");
        assert!(!line.is_truncated());
    }
}
