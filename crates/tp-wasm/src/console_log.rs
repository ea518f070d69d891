//! `log` backend writing to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from(format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

pub(crate) fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn init(level: &str) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level_filter(level));
}
