use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod env;
mod error;
mod handler;
mod http;
mod logger;
mod runtime;
mod server;

use error::FixtureError;

fn main() -> ExitCode {
    exit_code(run())
}

/// Startup errors are logged and turn into a failing exit status
fn exit_code(result: Result<(), Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg).map_err(FixtureError::Logger)?;

    // 创建 Tokio 运行时，根据 workers 配置设置线程数
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|w| *w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let signals = server::SignalHandler::new();
    server::start_signal_handler(&signals)?;

    run_with(
        &cfg,
        Arc::new(env::ProcessEnvironment),
        Arc::clone(&signals.shutdown),
        |_| {},
    )
    .await?;
    Ok(())
}

/// Bind, announce readiness, then serve until `shutdown` fires.
///
/// The startup line is only written once the listener is bound; `on_ready`
/// runs right after it with the address actually bound.
async fn run_with(
    cfg: &config::Config,
    environment: Arc<dyn env::EnvironmentSource>,
    shutdown: Arc<Notify>,
    on_ready: impl FnOnce(SocketAddr),
) -> Result<(), FixtureError> {
    let addr = cfg.get_socket_addr()?;
    let bound = server::bind(addr)?;
    logger::log_server_start(&bound.local_addr, cfg);
    on_ready(bound.local_addr);

    let state = Arc::new(config::AppState::new(cfg, environment));
    server::serve(bound.listener, state, shutdown).await;
    Ok(())
}
