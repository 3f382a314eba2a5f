// End-to-end tests: a real listener, real sockets, hyper's client

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::Notify;

use super::{bind, serve};
use crate::config::{AppState, Config};
use crate::env::FixedEnvironment;
use crate::handler::endpoints::GREETING;
use crate::runtime;

struct RunningFixture {
    addr: SocketAddr,
    shutdown: Arc<Notify>,
    task: tokio::task::JoinHandle<()>,
}

async fn start_fixture() -> RunningFixture {
    let cfg = Config::load_from("does-not-exist/fixture", None).unwrap();
    let env = FixedEnvironment::new([("FOO", "bar"), ("HOME", "/home/fixture")]);
    let state = Arc::new(AppState::new(&cfg, Arc::new(env)));

    let bound = bind("127.0.0.1:0".parse().unwrap()).unwrap();
    let shutdown = Arc::new(Notify::new());
    let task = tokio::spawn(serve(bound.listener, state, Arc::clone(&shutdown)));

    RunningFixture {
        addr: bound.local_addr,
        shutdown,
        task,
    }
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, String) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let req = Request::builder()
        .uri(path)
        .header("Host", addr.to_string())
        .body(Empty::<Bytes>::new())
        .unwrap();
    let resp = sender.send_request(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_process_over_the_wire() {
    let fixture = start_fixture().await;
    let (status, body) = get(fixture.addr, "/process").await;
    assert_eq!(status, StatusCode::OK);

    let parsed: HashMap<String, String> = serde_json::from_str(&body).unwrap();
    let expected: HashMap<String, String> = [("FOO", "bar"), ("HOME", "/home/fixture")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(parsed, expected);
}

#[tokio::test]
async fn test_version_and_greeting_over_the_wire() {
    let fixture = start_fixture().await;

    let (status, body) = get(fixture.addr, "/node/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, runtime::version());

    for path in ["/", "/foo", "/process/extra", "/process?x=1"] {
        let (status, body) = get(fixture.addr, path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, GREETING, "path {path}");
    }
}

#[tokio::test]
async fn test_concurrent_requests_do_not_mix() {
    let fixture = start_fixture().await;
    let addr = fixture.addr;

    let mut tasks = Vec::new();
    for i in 0..16 {
        let path = if i % 2 == 0 { "/process" } else { "/" };
        tasks.push(tokio::spawn(async move { (path, get(addr, path).await) }));
    }

    for task in tasks {
        let (path, (status, body)) = task.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        if path == "/process" {
            assert!(body.starts_with('{') && body.contains("\"FOO\":\"bar\""), "got: {body}");
        } else {
            assert_eq!(body, GREETING);
        }
    }
}

// Paused clock: the idle sleep completes instantly, and any server-side
// timer shorter than it would have fired first.
#[tokio::test(start_paused = true)]
async fn test_idle_keep_alive_connection_stays_open() {
    let fixture = start_fixture().await;
    let stream = TcpStream::connect(fixture.addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = conn.await;
    });

    for (path, idle) in [("/", 0), ("/process", 120), ("/node/version", 3600)] {
        tokio::time::sleep(std::time::Duration::from_secs(idle)).await;
        sender.ready().await.unwrap();
        let req = Request::builder()
            .uri(path)
            .header("Host", fixture.addr.to_string())
            .body(Empty::<Bytes>::new())
            .unwrap();
        let resp = sender.send_request(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path {path} after {idle}s idle");
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        assert!(!body.is_empty());
    }
}

#[tokio::test]
async fn test_shutdown_stops_accept_loop() {
    let fixture = start_fixture().await;
    let (_, body) = get(fixture.addr, "/").await;
    assert_eq!(body, GREETING);

    fixture.shutdown.notify_one();
    tokio::time::timeout(std::time::Duration::from_secs(5), fixture.task)
        .await
        .expect("serve loop should stop")
        .unwrap();
}

#[tokio::test]
async fn test_occupied_port_is_reported() {
    let fixture = start_fixture().await;
    let err = bind(fixture.addr).unwrap_err();
    assert!(err.to_string().contains(&fixture.addr.to_string()), "got: {err}");
}
