use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes timestamped records to stderr
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Pick a level from `-v` count and `-q`
    pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Warn;
        }
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let mut stderr = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Info => writeln!(stderr, "{} {}", timestamp, record.args()),
            level => writeln!(
                stderr,
                "{} {:<5} [{}] {}",
                timestamp,
                level,
                record.target(),
                record.args()
            ),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
