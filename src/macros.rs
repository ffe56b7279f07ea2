// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! The logging macros.
//!
//! Each macro takes `format!` style arguments.  The level check is done on a `const`, so when the
//! level is above the build threshold the whole statement, format string and arguments included,
//! is dropped at compile time and the arguments are never evaluated.

/// Log at the given [`Level`](crate::Level).
///
/// ```ignore
/// fwlog::log!(fwlog::Level::Info, "temp={}", t);
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {{
        const __FWLOG_LEVEL: $crate::Level = $level;
        const __FWLOG_ENABLED: bool = $crate::level::enabled(__FWLOG_LEVEL);
        if __FWLOG_ENABLED {
            $crate::_export::dispatch(
                __FWLOG_LEVEL,
                &$crate::location!(),
                $crate::_export::format_args!($($arg)+),
            );
        }
    }};
}

/// Log an error.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Error, $($arg)+)
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Warn, $($arg)+)
    };
}

/// Log an informational message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Info, $($arg)+)
    };
}

/// Log a debugging message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Debug, $($arg)+)
    };
}

/// Log with the most detail.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)+) => {
        $crate::log!($crate::Level::Verbose, $($arg)+)
    };
}
