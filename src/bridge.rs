use anyhow::{Result, anyhow};
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

use crate::logger::Logger;
use crate::severity::Severity;

/// Feeds records from the `log` macros into a [`Logger`].
///
/// The logger is moved in, so sharing is explicit: whoever installs the
/// bridge gives up direct access to the instance.
pub struct FacadeLogger {
    logger: Mutex<Logger>,
}

impl FacadeLogger {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger: Mutex::new(logger),
        }
    }

    pub fn install(self, level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(self)).map_err(|e| anyhow!("{e}"))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Drains the wrapped logger's message queue.
    pub fn take_messages(&self) -> Vec<String> {
        match self.logger.lock() {
            Ok(mut logger) => {
                let messages = logger.get_messages().to_vec();
                logger.clear_messages();
                messages
            }
            Err(_) => Vec::new(),
        }
    }
}

impl Log for FacadeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The logger reports its own failures through `log`; looping those
        // back would re-lock the mutex.
        let target = metadata.target();
        let own = env!("CARGO_CRATE_NAME");
        !(target == own || target.strip_prefix(own).is_some_and(|rest| rest.starts_with("::")))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut logger) = self.logger.lock() else {
            return;
        };
        let text = record.args().to_string();
        logger.log_text(Severity::from(record.level()), &text);
    }

    fn flush(&self) {
        if let Ok(mut logger) = self.logger.lock() {
            logger.flush();
        }
    }
}
