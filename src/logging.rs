// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Bridge from the `log` crate.
//!
//! Driver and library crates usually log through the [`log`] facade rather than through fwlog's
//! own macros.  [`set_logger`] installs a `log::Log` handler that sends those records down the same
//! path: same threshold, same line layout, same backend.
//!
//! The `log` macros decide at run time, so records from them are not compiled out the way fwlog's
//! own macros are.  The `log` crate's maximum level is set from the build threshold, which keeps
//! the run time check cheap.  For full elimination, the `max_level_*` features of `log` can be
//! enabled to match.

use log::{Log, Metadata, Record};

use crate::error::Result;
use crate::facility;
use crate::level::{self, Level, STATIC_MAX_LEVEL};
use crate::location::{routine_name, Location};

struct FwLogger;

impl Log for FwLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        level::enabled(metadata.level().into())
    }

    fn log(&self, record: &Record<'_>) {
        let level = Level::from(record.level());
        if !level::enabled(level) {
            return;
        }
        // Records built at run time have no static location.  Those are logged with an empty one.
        let location = Location::new(
            record.file_static().unwrap_or(""),
            record.line().unwrap_or(0),
            record.module_path_static().map(routine_name).unwrap_or(""),
        );
        facility::dispatch(level, &location, *record.args());
    }

    // Lines are written out as they are logged.
    fn flush(&self) {}
}

static FW_LOGGER: FwLogger = FwLogger;

/// Route records from the `log` crate through fwlog.
///
/// # Safety
///
/// This is unsafe due to racy issues in the log framework on targets that do not support atomic
/// pointers.  As long as this is called ever by a single thread, it is safe to use.
pub unsafe fn set_logger() -> Result<()> {
    set_logger_internal(&FW_LOGGER)
}

// The log crate has different entry points based on whether or not we are on a target with atomic
// pointers.  The safety has to do with initialization order, and as long as this is called before
// any other threads run, it is safe.
cfg_if::cfg_if! {
    if #[cfg(target_has_atomic = "ptr")] {
        unsafe fn set_logger_internal(logger: &'static dyn Log) -> Result<()> {
            log::set_logger(logger)?;
            log::set_max_level(STATIC_MAX_LEVEL.to_log());
            Ok(())
        }
    } else {
        unsafe fn set_logger_internal(logger: &'static dyn Log) -> Result<()> {
            log::set_logger_racy(logger)?;
            log::set_max_level_racy(STATIC_MAX_LEVEL.to_log());
            Ok(())
        }
    }
}
