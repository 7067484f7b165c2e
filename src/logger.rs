use std::{env, io};

use log::{debug, Level, LevelFilter};

use crate::error::Result;

/// Writes the one-line summaries produced while classifying commits to an
/// `std::io::Write` sink, dropping lines below the configured severity.
/// Whether outcomes are colored is a property of the sink; it defaults to on
/// unless `NO_COLOR` is set.
///
/// # Example
///
/// ```
/// # use notelog::Logger;
/// let mut out = Vec::new();
/// let mut log = Logger::new(&mut out, false);
///
/// log.info("* 684997d \"Fix: Simple fix.\" INCLUDED").unwrap();
/// log.error("something went wrong").unwrap();
///
/// assert_eq!(String::from_utf8(out).unwrap(), "something went wrong\n");
/// ```
pub struct Logger<'a> {
    out: &'a mut dyn io::Write,
    max_level: LevelFilter,
    colors: bool,
}

impl<'a> Logger<'a> {
    /// Creates a logger that writes informational lines when `display_logs`
    /// is set, and only errors otherwise.
    pub fn new<T: io::Write>(out: &'a mut T, display_logs: bool) -> Logger<'a> {
        let max_level = if display_logs {
            LevelFilter::Info
        } else {
            LevelFilter::Error
        };
        Logger::with_level(out, max_level)
    }

    pub fn with_level<T: io::Write>(out: &'a mut T, max_level: LevelFilter) -> Logger<'a> {
        Logger {
            out,
            max_level,
            colors: env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Sets whether lines written through this logger may carry ANSI colors
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn colors_enabled(&self) -> bool { self.colors }

    pub fn max_level(&self) -> LevelFilter { self.max_level }

    pub fn enabled(&self, level: Level) -> bool { level <= self.max_level }

    pub fn info(&mut self, line: &str) -> Result<()> { self.log(Level::Info, line) }

    pub fn error(&mut self, line: &str) -> Result<()> { self.log(Level::Error, line) }

    fn log(&mut self, level: Level, line: &str) -> Result<()> {
        if !self.enabled(level) {
            debug!("Suppressed {level} line below {}: {line}", self.max_level);
            return Ok(());
        }
        writeln!(self.out, "{line}")?;
        self.out.flush().map_err(Into::into)
    }
}
