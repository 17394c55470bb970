//! Minimal `log` backend: one line per record on stderr with a coloured level tag.

use ansi_term::{
    ANSIString,
    Colour::{Blue, Green, Purple, Red, Yellow},
};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct TermLogger;

static LOGGER: TermLogger = TermLogger;

/// Install [`TermLogger`] as the global logger, showing records up to `level`.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn tag(level: Level) -> ANSIString<'static> {
    match level {
        Level::Error => Red.bold().paint("ERROR"),
        Level::Warn => Yellow.bold().paint("WARN"),
        Level::Info => Green.bold().paint("INFO"),
        Level::Debug => Blue.bold().paint("DEBUG"),
        Level::Trace => Purple.bold().paint("TRACE"),
    }
}

// Trace records are bare nestest lines.
fn line(record: &Record) -> String {
    match record.level() {
        Level::Trace => record.args().to_string(),
        level => format!("{} {}: {}", tag(level), record.target(), record.args()),
    }
}

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", line(record));
    }

    fn flush(&self) {}
}
