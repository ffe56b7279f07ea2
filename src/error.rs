// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! # fwlog errors
//!
//! Logging itself never fails as far as the caller can tell.  Errors only come from setting the
//! facility up.

use core::fmt;

/// An error from installing or removing the facility's collaborators.
pub enum Error {
    /// A log call was in progress (for example, `install` was called from an interrupt handler that
    /// fired during logging).  Nothing was changed, the call can be retried.
    Busy,
    /// The `log` crate already has a logger.
    Logger(log::SetLoggerError),
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Busy => write!(f, "fwlog error: facility busy"),
            Error::Logger(e) => write!(f, "fwlog error: {}", e),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Busy => write!(f, "fwlog error: facility busy"),
            Error::Logger(e) => write!(f, "fwlog error: {:?}", e),
        }
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(e: log::SetLoggerError) -> Error {
        Error::Logger(e)
    }
}

/// Wraps a value with a possible fwlog error.
pub type Result<T> = core::result::Result<T, Error>;
