// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Severity levels and the compile-time gate.
//!
//! Every log statement carries a [`Level`].  The build carries a single threshold,
//! [`STATIC_MAX_LEVEL`], taken from `CONFIG_FWLOG_LEVEL`.  If `CONFIG_FWLOG_PORT` is not set there
//! is nowhere to send anything, and the threshold is forced to [`LevelFilter::Off`].
//!
//! The comparison is a `const fn`, so the logging macros evaluate it into a `const` and the
//! disabled branch, including the evaluation of its arguments, is removed by constant folding.

use core::fmt;

use crate::config;

/// The severity of a single log statement, from most to least urgent.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Something failed.
    Error = 1,
    /// Something is likely wrong.
    Warn = 2,
    /// Normal progress.
    Info = 3,
    /// Detail useful while debugging.
    Debug = 4,
    /// Everything.
    Verbose = 5,
}

impl Level {
    /// All levels, most urgent first.
    pub const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Verbose,
    ];

    /// The single letter written at the start of each stream line.
    pub const fn tag(self) -> char {
        match self {
            Level::Error => 'E',
            Level::Warn => 'W',
            Level::Info => 'I',
            Level::Debug => 'D',
            Level::Verbose => 'V',
        }
    }

    /// The upper case name of the level.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Verbose => "VERBOSE",
        }
    }

    /// The most restrictive filter that still lets this level through.
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Verbose => LevelFilter::Verbose,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// The log crate has no verbose level, its trace is the same thing.
impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Verbose,
        }
    }
}

/// A threshold: the most verbose [`Level`] that is compiled in.
///
/// The numeric values are the ones used by `CONFIG_FWLOG_LEVEL`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelFilter {
    /// Nothing is logged.
    Off = 0,
    /// Errors only.
    Error = 1,
    /// Errors and warnings.
    Warn = 2,
    /// Errors, warnings and info.
    Info = 3,
    /// Everything but verbose.
    Debug = 4,
    /// Everything.
    Verbose = 5,
}

impl LevelFilter {
    /// Convert a numeric config value.  Values below zero clamp to `Off`, above five to `Verbose`.
    pub const fn from_config(value: isize) -> LevelFilter {
        match value {
            isize::MIN..=0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            _ => LevelFilter::Verbose,
        }
    }

    /// Does this threshold let `level` through.
    #[inline(always)]
    pub const fn allows(self, level: Level) -> bool {
        level as u8 <= self as u8
    }

    /// The matching filter for the `log` crate.
    pub const fn to_log(self) -> log::LevelFilter {
        match self {
            LevelFilter::Off => log::LevelFilter::Off,
            LevelFilter::Error => log::LevelFilter::Error,
            LevelFilter::Warn => log::LevelFilter::Warn,
            LevelFilter::Info => log::LevelFilter::Info,
            LevelFilter::Debug => log::LevelFilter::Debug,
            LevelFilter::Verbose => log::LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelFilter::Off => f.pad("OFF"),
            LevelFilter::Error => f.pad("ERROR"),
            LevelFilter::Warn => f.pad("WARN"),
            LevelFilter::Info => f.pad("INFO"),
            LevelFilter::Debug => f.pad("DEBUG"),
            LevelFilter::Verbose => f.pad("VERBOSE"),
        }
    }
}

/// Work out the threshold for a build.  Without an output device nothing is let through,
/// whatever the configured level.
pub const fn threshold(port_configured: bool, level: isize) -> LevelFilter {
    if port_configured {
        LevelFilter::from_config(level)
    } else {
        LevelFilter::Off
    }
}

/// The build-wide threshold.
pub const STATIC_MAX_LEVEL: LevelFilter =
    threshold(config::CONFIG_FWLOG_PORT, config::CONFIG_FWLOG_LEVEL);

/// Is `level` compiled into this build.
#[inline(always)]
pub const fn enabled(level: Level) -> bool {
    STATIC_MAX_LEVEL.allows(level)
}
