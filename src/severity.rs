use std::fmt;

use anyhow::anyhow;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Urgency of a single message. Lower codes are more severe.
#[derive(
    Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialOrd, PartialEq, Eq, Ord, Hash,
)]
#[repr(u8)]
pub enum Severity {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warn = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Severity {
    /// Deprecated name for [`Severity::Crit`]; both share code 2.
    pub const FATAL: Severity = Severity::Crit;

    pub const ALL: [Severity; 8] = [
        Severity::Emerg,
        Severity::Alert,
        Severity::Crit,
        Severity::Err,
        Severity::Warn,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        label_for_code(self.code())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Severity {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Severity::ALL
            .get(code as usize)
            .copied()
            .ok_or_else(|| anyhow!("Invalid severity code {code}"))
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Err,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

/// Line label for a numeric severity code.
///
/// Code 2 is shared by CRIT and FATAL and always resolves to `CRIT`.
/// Codes with no named level fall back to `LOG`.
pub fn label_for_code(code: u8) -> &'static str {
    match code {
        0 => "EMERG",
        1 => "ALERT",
        2 => "CRIT",
        3 => "ERROR",
        4 => "WARN",
        5 => "NOTICE",
        6 => "INFO",
        7 => "DEBUG",
        _ => "LOG",
    }
}

/// Configured floor of a logger: the least urgent severity it emits,
/// or `Off` to disable logging entirely.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize_repr,
    Deserialize_repr,
    PartialOrd,
    PartialEq,
    Eq,
    Ord,
    Hash,
)]
#[repr(u8)]
pub enum SeverityFilter {
    Emerg = 0,
    Alert = 1,
    Crit = 2,
    Err = 3,
    Warn = 4,
    Notice = 5,
    #[default]
    Info = 6,
    Debug = 7,
    Off = 8,
}

impl SeverityFilter {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_off(self) -> bool {
        self == SeverityFilter::Off
    }

    /// Whether a message at `severity` passes this floor.
    pub fn allows(self, severity: Severity) -> bool {
        !self.is_off() && self.code() >= severity.code()
    }
}

impl From<Severity> for SeverityFilter {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Emerg => SeverityFilter::Emerg,
            Severity::Alert => SeverityFilter::Alert,
            Severity::Crit => SeverityFilter::Crit,
            Severity::Err => SeverityFilter::Err,
            Severity::Warn => SeverityFilter::Warn,
            Severity::Notice => SeverityFilter::Notice,
            Severity::Info => SeverityFilter::Info,
            Severity::Debug => SeverityFilter::Debug,
        }
    }
}

impl TryFrom<u8> for SeverityFilter {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        if code == SeverityFilter::Off.code() {
            return Ok(SeverityFilter::Off);
        }
        Severity::try_from(code).map(SeverityFilter::from)
    }
}

impl From<SeverityFilter> for log::LevelFilter {
    fn from(filter: SeverityFilter) -> Self {
        match filter {
            SeverityFilter::Off => log::LevelFilter::Off,
            SeverityFilter::Emerg
            | SeverityFilter::Alert
            | SeverityFilter::Crit
            | SeverityFilter::Err => log::LevelFilter::Error,
            SeverityFilter::Warn | SeverityFilter::Notice => log::LevelFilter::Warn,
            SeverityFilter::Info => log::LevelFilter::Info,
            SeverityFilter::Debug => log::LevelFilter::Trace,
        }
    }
}
