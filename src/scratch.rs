// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Single owner scratch storage.
//!
//! The log line buffers live in a `static` so that logging needs neither heap nor much stack.
//! [`Scratch`] hands out exclusive access to that static one caller at a time.  Unlike a mutex it
//! never waits: a caller that finds it in use (another thread, or an interrupt that fired in the
//! middle of a log call) simply does not get it.
//!
//! Only claiming and releasing happen inside a critical section.  The work done with the contents,
//! formatting and writing to a device, runs with interrupts enabled.

use core::cell::{Cell, UnsafeCell};

use critical_section::Mutex;

/// Storage that at most one caller can use at a time.
pub struct Scratch<T> {
    busy: Mutex<Cell<bool>>,
    data: UnsafeCell<T>,
}

// The busy flag makes access to `data` exclusive, so sharing the Scratch only needs the contents
// to be movable between contexts.
unsafe impl<T: Send> Sync for Scratch<T> {}

impl<T> Scratch<T> {
    /// Wrap the contents.
    pub const fn new(data: T) -> Scratch<T> {
        Scratch {
            busy: Mutex::new(Cell::new(false)),
            data: UnsafeCell::new(data),
        }
    }

    /// Run `f` with exclusive access to the contents.  Returns `None`, without calling `f`, when
    /// someone else has it.
    pub fn try_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let claimed = critical_section::with(|cs| !self.busy.borrow(cs).replace(true));
        if !claimed {
            return None;
        }
        let _release = Release(self);

        // SAFETY: the busy flag was clear and is now set by us, so nobody else holds a reference.
        // It stays set until `_release` is dropped, after `f` has returned or unwound.
        let data = unsafe { &mut *self.data.get() };
        Some(f(data))
    }

    /// Is the contents currently claimed.
    pub fn is_busy(&self) -> bool {
        critical_section::with(|cs| self.busy.borrow(cs).get())
    }
}

struct Release<'a, T>(&'a Scratch<T>);

impl<T> Drop for Release<'_, T> {
    fn drop(&mut self) {
        critical_section::with(|cs| self.0.busy.borrow(cs).set(false));
    }
}
