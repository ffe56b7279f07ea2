// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Runtime readings supplied by the firmware.

use fugit::MillisDurationU32;

/// The two runtime values that go into every log line prefix.
///
/// Implemented by the firmware on whatever gives it a tick counter and a heap.  Both calls happen
/// on every emitted line, so they should be cheap and must not log.
pub trait Board: Sync {
    /// Time since boot.
    fn uptime(&self) -> MillisDurationU32;

    /// Free heap, in bytes.
    fn free_heap(&self) -> u32;
}
