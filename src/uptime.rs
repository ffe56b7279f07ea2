// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

//! Rendering of the uptime counter.
//!
//! Firmware usually keeps a 32-bit millisecond counter since boot.  [`Elapsed`] displays it as
//! `H:MM:SS.mmm`, with the hours left unpadded.  A 32-bit counter wraps after a little under 50
//! days, and the rendering then starts again from `0:00:00.000`.

use core::fmt;

use fugit::MillisDurationU32;

/// Longest possible rendering, `1193:02:47.295`.
pub const ELAPSED_MAX_LEN: usize = 14;

/// Time since boot, as shown at the start of each log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(MillisDurationU32);

impl Elapsed {
    /// Wrap a duration since boot.
    pub const fn new(since_boot: MillisDurationU32) -> Elapsed {
        Elapsed(since_boot)
    }

    /// Wrap a raw millisecond count.
    pub const fn from_millis(ms: u32) -> Elapsed {
        Elapsed(MillisDurationU32::from_ticks(ms))
    }

    /// The raw millisecond count.
    pub const fn as_millis(&self) -> u32 {
        self.0.ticks()
    }
}

impl From<MillisDurationU32> for Elapsed {
    fn from(since_boot: MillisDurationU32) -> Elapsed {
        Elapsed(since_boot)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.as_millis();
        let secs = ms / 1000;
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60,
            ms % 1000,
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::*;

    fn render(ms: u32) -> String {
        Elapsed::from_millis(ms).to_string()
    }

    /// Parse the rendering back into milliseconds.
    fn value(text: &str) -> u64 {
        let (hms, ms) = text.split_once('.').unwrap();
        let parts: Vec<u64> = hms.split(':').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 3);
        ((parts[0] * 60 + parts[1]) * 60 + parts[2]) * 1000 + ms.parse::<u64>().unwrap()
    }

    #[test]
    fn layout() {
        assert_eq!(render(0), "0:00:00.000");
        assert_eq!(render(1_234), "0:00:01.234");
        assert_eq!(render(61_005), "0:01:01.005");
        assert_eq!(render(3_600_000), "1:00:00.000");
        assert_eq!(render(100 * 3_600_000 + 59_999), "100:00:59.999");
    }

    #[test]
    fn bounded() {
        assert_eq!(render(u32::MAX), "1193:02:47.295");
        assert_eq!(render(u32::MAX).len(), ELAPSED_MAX_LEN);
    }

    #[test]
    fn numerically_monotonic() {
        let samples = [
            0, 1, 9, 10, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 35_999_999, 36_000_000,
            360_000_000, u32::MAX - 1, u32::MAX,
        ];
        let mut last = None;
        for ms in samples {
            let v = value(&render(ms));
            assert_eq!(v, ms as u64);
            if let Some(prev) = last {
                assert!(v > prev);
            }
            last = Some(v);
        }
    }

    #[test]
    fn wraps_with_the_counter() {
        let wrapped = u32::MAX.wrapping_add(5);
        assert_eq!(render(wrapped), "0:00:00.004");
    }

    #[test]
    fn from_fugit() {
        let e: Elapsed = MillisDurationU32::from_ticks(2_500).into();
        assert_eq!(e.as_millis(), 2_500);
        assert_eq!(Elapsed::new(MillisDurationU32::from_ticks(7)), Elapsed::from_millis(7));
    }
}
