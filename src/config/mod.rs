// Configuration module entry point
// Layers defaults, an optional config file, FIXTURE__* variables and PORT

mod state;
mod types;

use std::net::{IpAddr, SocketAddr};

use crate::error::FixtureError;
use crate::logger;

// Re-export public types
pub use state::AppState;
pub use types::Config;

/// Port used when `PORT` is unset or unusable
pub const DEFAULT_PORT: u16 = 8080;

/// Config file consulted when `FIXTURE_CONFIG` is unset (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "fixture";

/// Interpret the raw value of the `PORT` variable.
///
/// Returns `None` when the variable is absent or not a valid TCP port, so the
/// lower configuration layers (ultimately [`DEFAULT_PORT`]) decide.
pub fn parse_port_var(raw: Option<&str>) -> Option<u16> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u16>() {
        Ok(port) => Some(port),
        Err(e) => {
            logger::log_warning(&format!(
                "Ignoring PORT='{raw}' ({e}), falling back to configured port"
            ));
            None
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Reads `FIXTURE_CONFIG` for the config file path and `PORT` for the
    /// listening port.
    pub fn load() -> Result<Self, FixtureError> {
        let path = std::env::var("FIXTURE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let port = std::env::var("PORT").ok();
        Self::load_from(&path, port.as_deref())
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// `port_var` is the raw `PORT` value; when it parses it wins over every
    /// other layer.
    pub fn load_from(config_path: &str, port_var: Option<&str>) -> Result<Self, FixtureError> {
        let port_override = parse_port_var(port_var).map(i64::from);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("FIXTURE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.access_log", false)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_override_option("server.port", port_override)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, FixtureError> {
        let ip = self
            .server
            .host
            .parse::<IpAddr>()
            .map_err(|_| FixtureError::InvalidAddress {
                host: self.server.host.clone(),
                port: self.server.port,
            })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
