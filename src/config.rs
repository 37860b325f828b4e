use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::severity::SeverityFilter;
use crate::timestamp::{DEFAULT_DATE_FORMAT, validate_format};

/// Directory of the running executable, used when no directory is configured.
static DEPLOYMENT_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
});

pub fn deployment_dir() -> &'static Path {
    &DEPLOYMENT_DIR
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub directory: Option<PathBuf>,
    pub severity: SeverityFilter,
    pub date_format: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: None,
            severity: SeverityFilter::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&string)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        validate_format(&config.date_format)?;
        Ok(config)
    }

    pub fn directory(&self) -> &Path {
        self.directory.as_deref().unwrap_or_else(|| deployment_dir())
    }
}
