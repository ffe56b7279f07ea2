// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Fixed capacity text buffers.
//!
//! A [`FixedBuf`] is the formatting target for both halves of a log line.  It never allocates and
//! never writes past its array: text that does not fit is dropped, and the buffer remembers that it
//! was truncated.  The byte after the last character is always a NUL, so the contents can be handed
//! to C logging code without copying.

use core::ffi::CStr;
use core::fmt;

/// A NUL terminated text buffer of `N` bytes, holding at most `N - 1` bytes of text.
pub struct FixedBuf<const N: usize> {
    // How many bytes of text are in the buffer.
    len: usize,
    // Set once anything has been dropped.
    truncated: bool,
    buf: [u8; N],
}

impl<const N: usize> FixedBuf<N> {
    /// How many bytes of text fit, leaving room for the terminator.
    pub const CAPACITY: usize = N - 1;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        // Forces the `N > 0` check at compile time.
        let _ = Self::CAPACITY;
        FixedBuf {
            len: 0,
            truncated: false,
            buf: [0; N],
        }
    }

    /// Forget the contents.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
        self.buf[0] = 0;
    }

    /// Length of the text, not counting the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is there no text.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available for text.
    pub fn remaining(&self) -> usize {
        Self::CAPACITY - self.len
    }

    /// Was anything dropped since the last [`clear`](Self::clear).
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The text.
    pub fn as_str(&self) -> &str {
        // Writes only ever stop on a character boundary, so this cannot fail.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// The text, including the terminating NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..self.len + 1]
    }

    /// The text as a C string.  If the text itself contains a NUL, the C string stops there.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.buf).unwrap_or_default()
    }
}

impl<const N: usize> Default for FixedBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Write for FixedBuf<N> {
    // Truncation is not reported as an error: returning one would abort the rest of the
    // `write!`, and the text already written is still wanted.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.remaining();
        let mut take = s.len().min(room);
        if take < s.len() {
            self.truncated = true;
            while !s.is_char_boundary(take) {
                take -= 1;
            }
        }

        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        self.buf[self.len] = 0;
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBuf<{}>({:?})", N, self.as_str())
    }
}

impl<const N: usize> fmt::Display for FixedBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
