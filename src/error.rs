//! Startup error type
//!
//! Request handling has no error path of its own; everything that can go
//! wrong happens before the first connection is accepted.

use std::net::SocketAddr;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// The listening socket could not be acquired (port in use, permission denied, ...)
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{host}:{port}'")]
    InvalidAddress { host: String, port: u16 },

    #[error("failed to open log file: {0}")]
    Logger(#[source] std::io::Error),
}
