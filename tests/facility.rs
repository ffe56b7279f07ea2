// Copyright (c) 2024 Linaro LTD
// SPDX-License-Identifier: Apache-2.0

// End to end tests of the logging macros against the installed facility.
//
// The build script passes the dotconfig's cfgs to this test crate as well, so each configuration
// gets the tests that apply to it.  `scripts/test-configs.sh` runs the suite under the host default
// and under every file in `tests/configs`.

#![allow(unexpected_cfgs)]

use std::sync::{Mutex, MutexGuard};

use fugit::MillisDurationU32;
use fwlog::{Board, Level, LevelFilter};

/// The facility is global, so tests that install into it take turns.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

struct TestBoard;

impl Board for TestBoard {
    fn uptime(&self) -> MillisDurationU32 {
        MillisDurationU32::from_ticks(61_005)
    }

    fn free_heap(&self) -> u32 {
        40_312
    }
}

static BOARD: TestBoard = TestBoard;

#[test]
fn gate_matches_threshold() {
    for level in Level::ALL {
        assert_eq!(fwlog::level::enabled(level), fwlog::STATIC_MAX_LEVEL.allows(level));
    }
    assert_eq!(
        fwlog::STATIC_MAX_LEVEL,
        fwlog::level::threshold(fwlog::config::CONFIG_FWLOG_PORT, fwlog::config::CONFIG_FWLOG_LEVEL)
    );
}

/// A UART that keeps what it is sent.
#[cfg(not(CONFIG_FWLOG_STRUCTURED))]
mod uart {
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    use super::BOARD;

    #[derive(Clone, Default)]
    pub struct Uart(Arc<Mutex<Vec<u8>>>);

    impl Uart {
        pub fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl embedded_io::ErrorType for Uart {
        type Error = Infallible;
    }

    impl embedded_io::Write for Uart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    /// Install a fresh UART, keeping a handle to read it back.
    pub fn attach() -> Uart {
        let uart = Uart::default();
        let device: &'static mut Uart = Box::leak(Box::new(uart.clone()));
        fwlog::install(&BOARD, device).unwrap();
        uart
    }
}

#[cfg(all(CONFIG_FWLOG_PORT, not(CONFIG_FWLOG_STRUCTURED)))]
mod stream {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fwlog::Level;

    use super::serial;
    use super::uart::{attach, Uart};

    fn read_temp(uart: &Uart) -> u32 {
        let line = line!() + 1;
        fwlog::info!("temp={}", 42);
        assert_eq!(uart.text().lines().count(), 1);
        line
    }

    #[test]
    fn info_line_reaches_the_uart() {
        if !fwlog::level::enabled(Level::Info) {
            return;
        }
        let _serial = serial();
        let uart = attach();

        let line = read_temp(&uart);

        assert_eq!(
            uart.text(),
            format!("I 0:01:01.005 facility.rs:{} read_temp Heap:40312 | temp=42\n", line)
        );
        fwlog::uninstall().unwrap();
    }

    #[test]
    fn arguments_only_evaluated_when_enabled() {
        let _serial = serial();
        let uart = attach();

        static EVALUATED: AtomicUsize = AtomicUsize::new(0);
        fn side_effect() -> u32 {
            EVALUATED.fetch_add(1, Ordering::SeqCst);
            5
        }

        fwlog::debug!("x={}", side_effect());
        fwlog::verbose!("x={}", side_effect());
        let expected = [Level::Debug, Level::Verbose]
            .into_iter()
            .filter(|l| fwlog::level::enabled(*l))
            .count();
        assert_eq!(EVALUATED.load(Ordering::SeqCst), expected);
        assert_eq!(uart.text().lines().count(), expected);

        // Errors always get through when there is a device.
        fwlog::error!("x={}", side_effect());
        assert_eq!(EVALUATED.load(Ordering::SeqCst), expected + 1);
        let text = uart.text();
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("E "));
        assert!(last.ends_with("| x=5"));

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn levels_in_order() {
        let _serial = serial();
        let uart = attach();

        fwlog::error!("e");
        fwlog::warn!("w");
        fwlog::info!("i");
        fwlog::debug!("d");
        fwlog::log!(Level::Verbose, "v");

        let expected: Vec<char> = Level::ALL
            .into_iter()
            .filter(|l| fwlog::level::enabled(*l))
            .map(Level::tag)
            .collect();
        let tags: Vec<char> = uart.text().lines().map(|l| l.chars().next().unwrap()).collect();
        assert_eq!(tags, expected);

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn long_messages_are_cut() {
        let _serial = serial();
        let uart = attach();

        let long = "z".repeat(1000);
        fwlog::error!("{}", long);

        let text = uart.text();
        let message = text.trim_end().rsplit(" | ").next().unwrap();
        assert_eq!(message.len(), fwlog::format::MESSAGE_LEN - 1);

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn nothing_installed_drops_lines() {
        let _serial = serial();
        let _ = fwlog::uninstall().unwrap();
        assert!(!fwlog::is_installed());

        // Must not panic or block.
        fwlog::error!("nobody is listening {}", 1);

        let uart = attach();
        assert!(fwlog::is_installed());
        let old = fwlog::uninstall().unwrap();
        assert!(old.is_some());
        assert_eq!(uart.text(), "");
    }
}

#[cfg(all(CONFIG_FWLOG_PORT, CONFIG_FWLOG_STRUCTURED))]
mod structured {
    use std::sync::Mutex;

    use fwlog::backend::structured::{LogSubsystem, Severity, StructuredRecord};
    use fwlog::Level;

    use super::{serial, BOARD};

    type Entry = (Severity, String, String, String);

    /// A platform logger that keeps every record.
    struct Recorder(Mutex<Vec<Entry>>);

    impl Recorder {
        fn take(&self) -> Vec<Entry> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl LogSubsystem for Recorder {
        fn log(&self, record: &StructuredRecord<'_>) {
            self.0.lock().unwrap().push((
                record.severity(),
                record.tag().to_string(),
                record.prefix().to_string(),
                record.message().to_string(),
            ));
        }
    }

    static RECORDER: Recorder = Recorder(Mutex::new(Vec::new()));

    fn attach() {
        fwlog::install(&BOARD, &RECORDER).unwrap();
        RECORDER.take();
    }

    fn connect() -> u32 {
        let line = line!() + 1;
        fwlog::error!("fail {}", 7);
        line
    }

    #[test]
    fn error_is_one_structured_record() {
        let _serial = serial();
        attach();

        let line = connect();

        let records = RECORDER.take();
        assert_eq!(records.len(), 1);
        let (severity, tag, prefix, message) = &records[0];
        assert_eq!(*severity, Severity::Error);
        assert_eq!(tag, fwlog::config::CONFIG_FWLOG_TAG);
        assert_eq!(prefix, &format!("0:01:01.005 facility.rs:{} connect Heap:40312", line));
        assert!(message.contains("fail 7"));

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn every_level_maps_to_its_severity() {
        let _serial = serial();
        attach();

        fwlog::verbose!("v");
        fwlog::debug!("d");
        fwlog::info!("i");
        fwlog::warn!("w");
        fwlog::error!("e");

        let expected: Vec<Severity> = [
            Level::Verbose,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
        ]
        .into_iter()
        .filter(|l| fwlog::level::enabled(*l))
        .map(Severity::from)
        .collect();
        let got: Vec<Severity> = RECORDER.take().into_iter().map(|r| r.0).collect();
        assert_eq!(got, expected);

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn log_crate_records_reach_the_subsystem() {
        if !fwlog::level::enabled(Level::Warn) {
            return;
        }
        let _serial = serial();
        attach();
        unsafe { fwlog::set_logger() }.unwrap();

        log::warn!("link down");

        let records = RECORDER.take();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, Severity::Warning);
        assert_eq!(records[0].3, "link down");

        fwlog::uninstall().unwrap();
    }

    #[test]
    fn nothing_installed_drops_lines() {
        let _serial = serial();
        attach();
        let old = fwlog::uninstall().unwrap();
        assert!(old.is_some());

        fwlog::error!("nobody is listening");
        assert!(RECORDER.take().is_empty());
    }
}

#[cfg(not(CONFIG_FWLOG_PORT))]
mod no_port {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fwlog::{Level, LevelFilter};

    use super::serial;

    static EVALUATED: AtomicUsize = AtomicUsize::new(0);

    fn side_effect() -> u32 {
        EVALUATED.fetch_add(1, Ordering::SeqCst);
        1
    }

    #[test]
    fn every_level_is_off() {
        assert_eq!(fwlog::STATIC_MAX_LEVEL, LevelFilter::Off);
        assert!(Level::ALL.into_iter().all(|l| !fwlog::level::enabled(l)));
    }

    #[test]
    fn arguments_are_never_evaluated() {
        let _serial = serial();

        fwlog::error!("{}", side_effect());
        fwlog::warn!("{}", side_effect());
        fwlog::info!("{}", side_effect());
        fwlog::debug!("{}", side_effect());
        fwlog::verbose!("{}", side_effect());
        fwlog::log!(Level::Error, "{}", side_effect());

        assert_eq!(EVALUATED.load(Ordering::SeqCst), 0);
    }

    #[cfg(not(CONFIG_FWLOG_STRUCTURED))]
    #[test]
    fn installed_device_receives_nothing() {
        let _serial = serial();
        let uart = super::uart::attach();

        fwlog::error!("{}", side_effect());
        fwlog::info!("plain");

        assert_eq!(uart.text(), "");
        assert_eq!(EVALUATED.load(Ordering::SeqCst), 0);
        fwlog::uninstall().unwrap();
    }
}

// Keep the threshold type in use for every configuration.
#[test]
fn threshold_is_a_known_filter() {
    assert!(fwlog::STATIC_MAX_LEVEL <= LevelFilter::Verbose);
}
