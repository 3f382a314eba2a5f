//! Canned endpoint handlers

use crate::env::{self, EnvironmentSource};
use crate::http::{self, FixtureBody};
use crate::logger;
use crate::runtime;
use hyper::Response;

/// Body of every unmatched path
pub const GREETING: &str = "Hello World!";

/// Body returned when the Node.js probe cannot run
pub const NODE_PROBE_FAILURE: &str = "Error getting Node.js version";

/// Full environment table as one JSON object, read at call time
pub fn process_env(environment: &dyn EnvironmentSource) -> Response<FixtureBody> {
    http::build_body_response(env::to_json(&environment.snapshot()))
}

pub fn runtime_version() -> Response<FixtureBody> {
    http::build_body_response(runtime::version())
}

pub fn greeting() -> Response<FixtureBody> {
    http::build_body_response(GREETING)
}

/// Run `<binary> --version` and relay its stdout
pub async fn node_version(binary: &str) -> Response<FixtureBody> {
    match tokio::process::Command::new(binary)
        .arg("--version")
        .kill_on_drop(true)
        .output()
        .await
    {
        Ok(output) if output.status.success() => http::build_plain_text_response(output.stdout),
        Ok(output) => {
            logger::log_warning(&format!(
                "'{binary} --version' exited with {}",
                output.status
            ));
            http::build_500_response(NODE_PROBE_FAILURE)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to run '{binary} --version': {e}"));
            http::build_500_response(NODE_PROBE_FAILURE)
        }
    }
}
