// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Leveled diagnostic logging for microcontroller firmware.
//!
//! Log statements are written with [`error!`], [`warn!`], [`info!`], [`debug!`] and [`verbose!`].
//! Statements above the build threshold, or every statement if the build has no output device,
//! are removed at compile time.  The rest produce a line such as
//!
//! ```text
//! I 0:00:01.234 temp.rs:10 read_temp Heap:40312 | temp=42
//! ```
//!
//! formatted into fixed static buffers, with no heap use, and sent either to a character device or
//! to the platform's own logger.
//!
//! The build is configured from a Kconfig style file named by `FWLOG_CONFIG`:
//!
//! - `CONFIG_FWLOG_PORT`: there is an output device.  Without it nothing is logged.
//! - `CONFIG_FWLOG_LEVEL`: 0 (nothing) through 5 (verbose).
//! - `CONFIG_FWLOG_STRUCTURED`: use the platform logger instead of a character device.
//! - `CONFIG_FWLOG_TAG`: the component tag given to the platform logger.
//!
//! Without a file the build logs at INFO to a character device.  At run time the firmware attaches
//! its [`Board`] hooks and its device with [`install`].
//!
//! Only one context may log at a time.  A line logged while another is being emitted, for
//! instance from an interrupt handler, is dropped rather than waited for.

#![no_std]
#![allow(unexpected_cfgs)]
#![deny(missing_docs)]

pub mod backend;
pub mod basename;
pub mod board;
pub mod buffer;
pub mod error;
pub mod facility;
pub mod format;
pub mod level;
pub mod location;
pub mod logging;
pub mod scratch;
pub mod uptime;

mod macros;

pub use board::Board;
pub use error::{Error, Result};
pub use facility::{install, is_installed, uninstall};
pub use level::{Level, LevelFilter, STATIC_MAX_LEVEL};
pub use location::Location;
pub use logging::set_logger;

// Bring in the generated config module
pub mod config {
    //! Build configuration values.
    //!
    //! This module contains an auto-generated set of constants corresponding to the dotconfig used
    //! for the build, with defaults filled in for the fwlog keys.
    //!
    //! **Note**: Unless you are viewing docs generated for a specific build, the values below are
    //! unlikely to directly correspond to those in a given build.

    #![allow(missing_docs)]

    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

/// Provide symbols used by macros in a crate-local namespace.
#[doc(hidden)]
pub mod _export {
    pub use core::format_args;

    pub use crate::facility::dispatch;

    /// The type name of the given value's type.
    pub fn type_name_of<T>(_: T) -> &'static str {
        core::any::type_name::<T>()
    }
}
