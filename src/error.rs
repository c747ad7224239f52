// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Only configuration and input validation failures are surfaced to callers.
//! Lifecycle races (a timer firing for a record that is already gone, a
//! double removal) are absorbed by the engine and never become an `Error`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    /// The configuration file could not be parsed or serialized.
    #[error("Config Error: {0}")]
    Config(String),

    /// A configuration value was rejected (negative cap, unknown anchor, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A toast request was rejected before anything was inserted.
    #[error("Invalid toast: {0}")]
    InvalidToast(String),

    /// The process-wide toaster was used before `init()` or after `dispose()`.
    #[error("toast engine is not initialized")]
    NotInitialized,

    /// Timers need a tokio runtime and none was running on this thread.
    #[error("no tokio runtime available to drive toast timers")]
    NoRuntime,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
