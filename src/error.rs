//! Centralized error handling for statusd

use std::io;
use thiserror::Error;

/// Custom error type for statusd operations
#[derive(Error, Debug)]
pub enum StatusError {
    /// I/O errors (pipes, sockets, kernel files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parsing errors (invalid data format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A shell-backed update could not produce output
    #[error("Command error: {0}")]
    Command(String),

    #[error("buffer capacity {0} cannot hold a terminated string")]
    CapacityTooSmall(usize),

    #[error("position {0} is out of bounds (must be below 64)")]
    PositionOutOfRange(u8),

    #[error("expected an 8 byte bitmask, got {len} bytes")]
    MalformedDatagram { len: usize },

    #[error("socket unexpectedly closed")]
    SocketClosed,

    /// Update table construction errors
    #[error("Registry error: {0}")]
    Registry(String),

    /// Display sink errors
    #[error("Display error: {0}")]
    Display(String),
}

impl StatusError {
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        StatusError::Parse(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        StatusError::Config(msg.into())
    }

    pub fn command<S: Into<String>>(msg: S) -> Self {
        StatusError::Command(msg.into())
    }

    pub fn registry<S: Into<String>>(msg: S) -> Self {
        StatusError::Registry(msg.into())
    }

    pub fn display<S: Into<String>>(msg: S) -> Self {
        StatusError::Display(msg.into())
    }
}

/// Type alias for Results in statusd
pub type Result<T> = std::result::Result<T, StatusError>;
