//! Console Logging
//!
//! `log` backend for the browser console. Hosts that already install a
//! wasm logger can skip [`init_console_logger`].

#[cfg(target_arch = "wasm32")]
use log::Level;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Route `log` records to `console.*` (stderr outside the browser)
pub fn init_console_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn format_line(record: &Record) -> String {
    format!("[{}] {}", record.level(), record.args())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record);

        #[cfg(target_arch = "wasm32")]
        match record.level() {
            Level::Error => web_sys::console::error_1(&line.into()),
            Level::Warn => web_sys::console::warn_1(&line.into()),
            Level::Info => web_sys::console::info_1(&line.into()),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
        }

        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}
