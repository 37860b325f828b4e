pub mod bridge;
pub mod config;
pub mod dump;
pub mod logger;
pub mod severity;
pub mod timestamp;

pub use bridge::FacadeLogger;
pub use config::LoggerConfig;
pub use logger::{Logger, Status};
pub use severity::{Severity, SeverityFilter};
