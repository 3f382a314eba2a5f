//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. The request-target is matched
//! exactly as received, query string included; method, headers and body are
//! ignored.

use crate::config::{AppState, Config};
use crate::handler::endpoints;
use crate::http::FixtureBody;
use crate::logger::{self, AccessLogEntry};
use hyper::body::Body;
use hyper::{Request, Response, Uri};
use std::borrow::Cow;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// What a path resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `/process`
    ProcessEnv,
    /// `/node/version`
    RuntimeVersion,
    /// `/nodejs/version`, only when a node binary is configured
    NodeProbe { binary: String },
    /// Everything else
    Greeting,
}

/// Endpoint for any path with no exact entry
static FALLBACK: Endpoint = Endpoint::Greeting;

/// Exact path -> endpoint table, with [`Endpoint::Greeting`] as the fallback
#[derive(Debug, Clone)]
pub struct RouteTable {
    exact: HashMap<&'static str, Endpoint>,
}

impl RouteTable {
    /// The two fixed routes
    pub fn new() -> Self {
        let mut exact = HashMap::new();
        exact.insert("/process", Endpoint::ProcessEnv);
        exact.insert("/node/version", Endpoint::RuntimeVersion);
        Self { exact }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut table = Self::new();
        if let Some(binary) = &config.probe.node_binary {
            table.exact.insert(
                "/nodejs/version",
                Endpoint::NodeProbe {
                    binary: binary.clone(),
                },
            );
        }
        table
    }

    pub fn resolve(&self, target: &str) -> &Endpoint {
        self.exact.get(target).unwrap_or(&FALLBACK)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The request-target as the client sent it
///
/// Origin-form keeps its query (`/process?x=1`); absolute-form keeps scheme
/// and authority (`http://host/process`). Neither equals a table key.
pub fn request_target(uri: &Uri) -> Cow<'_, str> {
    if uri.authority().is_some() {
        Cow::Owned(uri.to_string())
    } else {
        Cow::Borrowed(uri.path_and_query().map_or("/", |pq| pq.as_str()))
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<FixtureBody>, Infallible> {
    let started = Instant::now();
    let endpoint = state.routes.resolve(&request_target(req.uri()));
    let response = dispatch(endpoint, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::start(&peer_addr, &req);
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn dispatch(endpoint: &Endpoint, state: &AppState) -> Response<FixtureBody> {
    match endpoint {
        Endpoint::ProcessEnv => endpoints::process_env(state.environment.as_ref()),
        Endpoint::RuntimeVersion => endpoints::runtime_version(),
        Endpoint::NodeProbe { binary } => endpoints::node_version(binary).await,
        Endpoint::Greeting => endpoints::greeting(),
    }
}
