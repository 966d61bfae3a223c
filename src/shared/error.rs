use std::path::PathBuf;

use crate::shared::Floor;

/// Failures surfaced to whoever presses a button.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("floor {floor} is outside the serviced range [{min}, {max}]")]
    InvalidFloor { floor: Floor, min: Floor, max: Floor },

    #[error("request queue is full")]
    QueueFull,

    #[error("elevator controller is no longer running")]
    ControllerStopped,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
