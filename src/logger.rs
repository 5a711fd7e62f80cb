use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

impl LogOutput {
    /// Stream selected by the `WIKI_LOG_STDOUT` value; stderr unless it is set
    /// to something other than `0`/`false`
    pub fn from_switch(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("0") => LogOutput::Stderr,
            Some(v) if v.eq_ignore_ascii_case("false") => LogOutput::Stderr,
            Some(_) => LogOutput::Stdout,
        }
    }
}

pub struct Logger {
    pub write_to_std: Option<LogOutput>,
    pub severity: Level,
    pub file: Option<Arc<Mutex<File>>>,
    pub enable_colors: bool,
}

impl Logger {
    /// Create a new logger. `file_path` is opened for appending; a file that
    /// cannot be opened is skipped.
    pub fn new(
        file_path: Option<PathBuf>,
        severity: Option<Level>,
        write_to_std: Option<LogOutput>,
        enable_colors: bool,
    ) -> Self {
        let file = file_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()
                .map(|f| Arc::new(Mutex::new(f)))
        });

        Logger {
            write_to_std,
            severity: severity.unwrap_or(Level::Info),
            file,
            enable_colors,
        }
    }

    fn get_timestamp() -> String {
        OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default()
    }

    /// Get color code for log level
    fn get_color(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1b[31m", // Red
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Info => "\x1b[36m",  // Cyan
            Level::Debug => "\x1b[35m", // Magenta
            Level::Trace => "\x1b[37m", // White
        }
    }

    fn get_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Initialize logger with environment variables
    ///
    /// `WIKI_LOG` (or `RUST_LOG`) sets the level, `WIKI_LOG_STDOUT` moves
    /// console output from stderr to stdout, `WIKI_LOG_FILE` mirrors output to
    /// a file, `NO_COLOR` disables ANSI colours.
    pub fn init() -> Result<(), log::SetLoggerError> {
        let severity = std::env::var("WIKI_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string())
            .parse::<Level>()
            .unwrap_or(Level::Info);

        let output = LogOutput::from_switch(std::env::var("WIKI_LOG_STDOUT").ok().as_deref());
        let file_path = std::env::var("WIKI_LOG_FILE").ok().map(PathBuf::from);
        let enable_colors = std::env::var("NO_COLOR").is_err();

        let logger = Logger::new(file_path, Some(severity), Some(output), enable_colors);
        log::set_max_level(LevelFilter::Trace);
        log::set_logger(Box::leak(Box::new(logger)))?;
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.severity
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Self::get_timestamp();
        let level_str = record.level().as_str();
        let args = record.args();

        let formatted_message = if self.enable_colors {
            let color = Self::get_color(record.level());
            let reset = Self::get_reset();
            format!("{color}[{timestamp}] {level_str}{reset} {args}\n")
        } else {
            format!("[{timestamp}] {level_str} {args}\n")
        };

        match &self.write_to_std {
            Some(LogOutput::Stdout) => {
                let _ = std::io::stdout().write_all(formatted_message.as_bytes());
            }
            Some(LogOutput::Stderr) => {
                let _ = std::io::stderr().write_all(formatted_message.as_bytes());
            }
            None => {}
        }

        // File output never carries colour codes
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = writeln!(file_guard, "[{timestamp}] {level_str} {args}");
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file_guard) = file.lock() {
                let _ = file_guard.flush();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn stdout_switch() {
        assert_eq!(LogOutput::from_switch(None), LogOutput::Stderr);
        assert_eq!(LogOutput::from_switch(Some("0")), LogOutput::Stderr);
        assert_eq!(LogOutput::from_switch(Some("False")), LogOutput::Stderr);
        assert_eq!(LogOutput::from_switch(Some("1")), LogOutput::Stdout);
        assert_eq!(LogOutput::from_switch(Some("yes")), LogOutput::Stdout);
    }

    #[test]
    fn file_output_respects_severity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("wiki.log");
        let logger = Logger::new(Some(path.clone()), Some(Level::Info), None, true);

        logger.log(&Record::builder().level(Level::Info).args(format_args!("saved page")).build());
        logger.log(&Record::builder().level(Level::Debug).args(format_args!("hidden")).build());
        logger.flush();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("INFO saved page"));
        assert!(!written.contains("hidden"));
        assert!(!written.contains("\x1b["));
    }
}
