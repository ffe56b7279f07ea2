// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Logging through a platform log subsystem.
//!
//! Some platforms (ESP-IDF, Zephyr) have their own logger which already knows about severities and
//! component tags.  On those, each line is handed over as a single [`StructuredRecord`], and the
//! platform decides how to print, filter or route it.
//!
//! Both halves of the line are NUL terminated in place, so a subsystem written in C can be given
//! [`StructuredRecord::prefix_c`] and [`StructuredRecord::message_c`] directly, with a `"%s %s"`
//! style format.

use core::ffi::CStr;
use core::fmt;

use crate::format::Line;
use crate::level::Level;

/// Severity as understood by platform log subsystems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Most detailed.
    Verbose,
    /// Debugging.
    Debug,
    /// Informational.
    Info,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl From<Level> for Severity {
    fn from(level: Level) -> Severity {
        match level {
            Level::Verbose => Severity::Verbose,
            Level::Debug => Severity::Debug,
            Level::Info => Severity::Info,
            Level::Warn => Severity::Warning,
            Level::Error => Severity::Error,
        }
    }
}

/// A platform logger.
pub trait LogSubsystem: Sync {
    /// Log one record.  Called exactly once per emitted line.
    fn log(&self, record: &StructuredRecord<'_>);
}

/// One line, as handed to a [`LogSubsystem`].
#[derive(Clone, Copy)]
pub struct StructuredRecord<'a> {
    severity: Severity,
    tag: &'static str,
    line: Line<'a>,
}

impl<'a> StructuredRecord<'a> {
    /// The mapped severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The component tag, from `CONFIG_FWLOG_TAG`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Uptime, location and free heap.
    pub fn prefix(&self) -> &'a str {
        self.line.prefix()
    }

    /// The caller's text.
    pub fn message(&self) -> &'a str {
        self.line.message()
    }

    /// The prefix, NUL terminated.
    pub fn prefix_c(&self) -> &'a CStr {
        self.line.prefix_c()
    }

    /// The message, NUL terminated.
    pub fn message_c(&self) -> &'a CStr {
        self.line.message_c()
    }
}

impl fmt::Debug for StructuredRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredRecord")
            .field("severity", &self.severity)
            .field("tag", &self.tag)
            .field("prefix", &self.prefix())
            .field("message", &self.message())
            .finish()
    }
}

/// Hand one line to the subsystem.
pub fn forward(subsystem: &dyn LogSubsystem, tag: &'static str, line: &Line<'_>) {
    let record = StructuredRecord {
        severity: line.level().into(),
        tag,
        line: *line,
    };
    subsystem.log(&record);
}
