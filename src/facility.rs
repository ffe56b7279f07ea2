// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! The process wide logging state.
//!
//! There is one [`LineFormatter`] for the whole program, together with the board hooks and the
//! output device.  They all live in a single [`Scratch`] so that one claim covers formatting and
//! output of a line.  Lines that cannot claim it, or that arrive before [`install`], are dropped.

use core::fmt;

use crate::backend::{self, Device};
use crate::board::Board;
use crate::error::{Error, Result};
use crate::format::LineFormatter;
use crate::level::Level;
use crate::location::Location;
use crate::scratch::Scratch;

struct Facility {
    formatter: LineFormatter,
    board: Option<&'static dyn Board>,
    device: Option<Device>,
}

impl Facility {
    const fn new() -> Facility {
        Facility {
            formatter: LineFormatter::new(),
            board: None,
            device: None,
        }
    }

    fn emit(&mut self, level: Level, location: &Location, args: fmt::Arguments<'_>) {
        let Facility {
            formatter,
            board,
            device,
        } = self;
        let (Some(board), Some(device)) = (*board, device.as_mut()) else {
            return;
        };
        let line = formatter.format(level, location, board, args);
        backend::deliver(device, &line);
    }
}

static FACILITY: Scratch<Facility> = Scratch::new(Facility::new());

/// Attach the board hooks and the output device.  Replaces any earlier ones.
///
/// For stream builds `device` is a `&'static mut` to the UART (anything implementing
/// [`embedded_io::Write`]).  For structured builds it is a `&'static` platform logger.
pub fn install(board: &'static dyn Board, device: Device) -> Result<()> {
    FACILITY
        .try_with(|f| {
            f.board = Some(board);
            f.device = Some(device);
        })
        .ok_or(Error::Busy)
}

/// Detach the board hooks and the output device.  Later lines are dropped until the next
/// [`install`].  The device, if there was one, is handed back.
pub fn uninstall() -> Result<Option<Device>> {
    FACILITY
        .try_with(|f| {
            f.board = None;
            f.device.take()
        })
        .ok_or(Error::Busy)
}

/// Is there somewhere for lines to go.  While a line is being emitted this reports `true`.
pub fn is_installed() -> bool {
    FACILITY
        .try_with(|f| f.board.is_some() && f.device.is_some())
        .unwrap_or(true)
}

/// Format and emit one line.  This is what the logging macros expand to once the level has passed
/// the compile time gate.
#[doc(hidden)]
pub fn dispatch(level: Level, location: &Location, args: fmt::Arguments<'_>) {
    // Dropped if the facility is in use.
    let _ = FACILITY.try_with(|f| f.emit(level, location, args));
}
