// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Output backends.
//!
//! There are two ways a line can leave the device:
//!
//! - [`stream`]: written as text to a character device, normally a UART.  This is the default.
//! - [`structured`]: handed to the platform's own logger along with a severity and a tag.  This is
//!   selected with `CONFIG_FWLOG_STRUCTURED`.
//!
//! Exactly one of them is wired into the facility for a given build.  [`Device`] is the type of the
//! collaborator that the firmware installs for the selected backend.

use crate::format::Line;

pub mod stream;
pub mod structured;

cfg_if::cfg_if! {
    if #[cfg(CONFIG_FWLOG_STRUCTURED)] {
        /// The installed platform logger.
        pub type Device = &'static dyn structured::LogSubsystem;

        /// True when this build uses the structured backend.
        pub const STRUCTURED: bool = true;

        #[inline]
        pub(crate) fn deliver(device: &mut Device, line: &Line<'_>) {
            structured::forward(*device, crate::config::CONFIG_FWLOG_TAG, line);
        }
    } else {
        /// The installed character device.
        pub type Device = &'static mut (dyn stream::Console + Send);

        /// True when this build uses the structured backend.
        pub const STRUCTURED: bool = false;

        #[inline]
        pub(crate) fn deliver(device: &mut Device, line: &Line<'_>) {
            stream::emit(&mut **device, line);
        }
    }
}
