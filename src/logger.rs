use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

/// Console logger printing `HH:MM:SS LEVEL message` with ANSI level colors.
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

/// Installs the console logger as the global logger.
pub fn init(max_level: LevelFilter) -> std::result::Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(ConsoleLogger { max_level }))?;
    log::set_max_level(max_level);
    Ok(())
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let (color, label) = match record.level() {
            Level::Error => ("\x1b[31m", "ERROR"),
            Level::Warn => ("\x1b[33m", "WARN "),
            Level::Info => ("\x1b[32m", "INFO "),
            Level::Debug => ("\x1b[34m", "DEBUG"),
            Level::Trace => ("\x1b[35m", "TRACE"),
        };
        let reset = "\x1b[0m";

        println!(
            "{} {}{}{} {}",
            Local::now().format("%H:%M:%S"),
            color,
            label,
            reset,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}
