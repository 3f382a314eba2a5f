// Application state module
// Immutable state shared by every connection

use std::sync::Arc;

use super::types::Config;
use crate::env::EnvironmentSource;
use crate::handler::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub environment: Arc<dyn EnvironmentSource>,
}

impl AppState {
    pub fn new(config: &Config, environment: Arc<dyn EnvironmentSource>) -> Self {
        Self {
            routes: RouteTable::from_config(config),
            config: config.clone(),
            environment,
        }
    }
}
