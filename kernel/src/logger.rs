//! `log` backend that writes to the debug serial line.
//!
//! Lines look like `[info] keyboard layout: azerty`. The level filter is
//! `Info` unless the kernel was built with `verbose-log`.

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::println;

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

const MAX_LEVEL: LevelFilter = if cfg!(feature = "verbose-log") {
    LevelFilter::Trace
} else {
    LevelFilter::Info
};

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= MAX_LEVEL
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let tag = match record.level() {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        };
        println!("[{}] {}", tag, record.args());
    }

    fn flush(&self) {}
}

/// Install the logger. Later calls are ignored.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(MAX_LEVEL);
    }
}
