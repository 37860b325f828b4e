use anyhow::{Context, Result};
use std::fmt::Debug;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{LoggerConfig, deployment_dir};
use crate::dump::dump;
use crate::severity::{Severity, SeverityFilter};
use crate::timestamp::{self, DEFAULT_DATE_FORMAT, validate_format};

pub const OPEN_SUCCESS: &str = "The log file was opened successfully.";
pub const OPEN_FAIL: &str = "The file could not be opened. Check permissions.";
pub const WRITE_FAIL: &str =
    "The file could not be written to. Check that appropriate permissions have been set.";

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Closed,
    Open,
    OpenFailed,
}

/// Appends severity-tagged lines to `log_<YYYY-MM-DD>.txt` in one directory.
///
/// Failures after the directory exists never surface as errors. They are
/// recorded in the message queue and, for opening, in [`Logger::status`].
pub struct Logger {
    file_path: PathBuf,
    status: Status,
    threshold: SeverityFilter,
    date_format: String,
    file: Option<File>,
    messages: Vec<String>,
}

impl Logger {
    /// Opens today's log file in `directory` (default: the executable's
    /// directory) with the given threshold (default: INFO).
    ///
    /// Only a failure to create a missing directory is returned as an error.
    pub fn new(directory: Option<&Path>, severity: Option<SeverityFilter>) -> Result<Self> {
        Self::open(
            directory.unwrap_or_else(|| deployment_dir()),
            severity.unwrap_or_default(),
            DEFAULT_DATE_FORMAT,
        )
    }

    /// Fails on an invalid date format as well as on directory creation.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        validate_format(&config.date_format)?;
        Self::open(config.directory(), config.severity, &config.date_format)
    }

    fn open(directory: &Path, threshold: SeverityFilter, date_format: &str) -> Result<Self> {
        // Rebuilding from components drops trailing separators.
        let directory: PathBuf = directory.components().collect();
        let file_path = directory.join(timestamp::file_name_for(&timestamp::now()));

        let mut logger = Self {
            file_path,
            status: Status::Closed,
            threshold,
            date_format: date_format.to_string(),
            file: None,
            messages: Vec::new(),
        };

        if threshold.is_off() {
            return Ok(logger);
        }

        if !directory.as_os_str().is_empty() && !directory.exists() {
            create_dir(&directory).with_context(|| {
                format!("Failed to create log directory {}", directory.display())
            })?;
        }

        if is_unwritable(&logger.file_path) {
            log::warn!("Log file {} is not writable", logger.file_path.display());
            logger.status = Status::OpenFailed;
            logger.messages.push(WRITE_FAIL.to_string());
            return Ok(logger);
        }

        match OpenOptions::new()
            .append(true)
            .create(true)
            .open(&logger.file_path)
        {
            Ok(file) => {
                log::debug!("Opened log file {}", logger.file_path.display());
                logger.file = Some(file);
                logger.status = Status::Open;
                logger.messages.push(OPEN_SUCCESS.to_string());
            }
            Err(e) => {
                log::warn!("Failed to open {}: {}", logger.file_path.display(), e);
                logger.status = Status::OpenFailed;
                logger.messages.push(OPEN_FAIL.to_string());
            }
        }

        Ok(logger)
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn threshold(&self) -> SeverityFilter {
        self.threshold
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Pops the most recent message.
    pub fn get_message(&mut self) -> Option<String> {
        self.messages.pop()
    }

    pub fn get_messages(&self) -> &[String] {
        &self.messages
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
    }

    pub fn log_emerg(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Emerg, values);
    }

    pub fn log_alert(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Alert, values);
    }

    pub fn log_crit(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Crit, values);
    }

    pub fn log_fatal(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::FATAL, values);
    }

    pub fn log_error(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Err, values);
    }

    pub fn log_warn(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Warn, values);
    }

    pub fn log_notice(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Notice, values);
    }

    pub fn log_info(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Info, values);
    }

    pub fn log_debug(&mut self, values: &[&dyn Debug]) {
        self.log(Severity::Debug, values);
    }

    /// Writes one prefixed line per value, or the bare prefix when `values`
    /// is empty. Messages less urgent than the threshold are dropped.
    pub fn log(&mut self, severity: Severity, values: &[&dyn Debug]) {
        if !self.threshold.allows(severity) {
            return;
        }

        let prefix = self.prefix(severity);
        if values.is_empty() {
            self.write_free_form_line(&format!("{prefix}{LINE_ENDING}"));
            return;
        }

        for value in values {
            self.write_free_form_line(&format!("{prefix} {}{LINE_ENDING}", dump(*value)));
        }
    }

    /// Writes preformatted text as one prefixed line, without dumping it.
    pub fn log_text(&mut self, severity: Severity, text: &str) {
        if !self.threshold.allows(severity) {
            return;
        }
        let line = format!("{} {text}{LINE_ENDING}", self.prefix(severity));
        self.write_free_form_line(&line);
    }

    /// Appends `line` verbatim, without prefix or terminator.
    pub fn write_free_form_line(&mut self, line: &str) {
        if self.status != Status::Open || self.threshold.is_off() {
            return;
        }
        let Some(file) = self.file.as_mut() else {
            return;
        };

        if let Err(e) = file.write_all(line.as_bytes()) {
            log::warn!("Failed to write to {}: {}", self.file_path.display(), e);
            self.messages.push(WRITE_FAIL.to_string());
        }
    }

    /// Backs `log::Log::flush`. Writes go straight to the unbuffered `File`,
    /// so there is nothing pending and the queue is left alone.
    pub fn flush(&mut self) {
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush() {
                log::warn!("Failed to flush {}: {}", self.file_path.display(), e);
            }
        }
    }

    /// Releases the file handle. Safe to call repeatedly.
    pub fn close(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            log::debug!("Closed log file {}", self.file_path.display());
        }
        self.status = Status::Closed;
    }

    fn prefix(&self, severity: Severity) -> String {
        format!(
            "{} - {} -->",
            timestamp::format_timestamp(&timestamp::now(), &self.date_format),
            severity.label()
        )
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

/// Logs each value on its own line.
///
/// ```no_run
/// use daylog::{Logger, Severity, log_to};
///
/// let mut logger = Logger::new(None, None).unwrap();
/// log_to!(logger, Severity::Warn, "disk almost full", 93);
/// log_to!(logger, Severity::Info);
/// ```
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $severity:expr $(, $value:expr)* $(,)?) => {
        $logger.log($severity, &[$(&$value as &dyn ::std::fmt::Debug),*])
    };
}

fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(path)
}

/// An existing file this process may not write to.
fn is_unwritable(path: &Path) -> bool {
    let is_file = fs::metadata(path)
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    is_file && !can_write(path)
}

#[cfg(unix)]
fn can_write(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    access(path, AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn can_write(path: &Path) -> bool {
    fs::metadata(path)
        .map(|metadata| !metadata.permissions().readonly())
        .unwrap_or(false)
}
