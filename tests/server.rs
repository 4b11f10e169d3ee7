use std::net::SocketAddr;
use std::sync::Arc;

use deovr_list::config::{AppState, Config, Overrides};
use deovr_list::server::{bind_with_fallback, start_server_loop};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::{Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tokio::sync::Notify;

async fn fetch(addr: SocketAddr, method: &str, path: &str) -> (StatusCode, Bytes) {
    let stream = TcpStream::connect(addr).await.expect("connect");
    let (mut sender, conn) = http1::handshake(TokioIo::new(stream))
        .await
        .expect("handshake");
    tokio::task::spawn_local(async move {
        let _ = conn.await;
    });

    let req = Request::builder()
        .method(method)
        .uri(path)
        .header("host", addr.to_string())
        .body(Empty::<Bytes>::new())
        .unwrap();
    let resp = sender.send_request(req).await.expect("response");
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn serves_list_over_tcp_until_shutdown() {
    let dir = std::env::temp_dir().join(format!("deovr-list-e2e-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let list_path = dir.join("list.json");

    let overrides = Overrides {
        list_path: Some(list_path.to_string_lossy().into_owned()),
        port: Some(0),
    };
    let mut cfg = Config::load_with("no-such-config-file", &overrides).unwrap();
    cfg.logging.access_log = false;
    let state = Arc::new(AppState::new(&cfg));

    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let listener = bind_with_fallback(cfg.socket_addr().unwrap(), 1).unwrap();
            let addr = listener.local_addr().unwrap();
            let shutdown = Arc::new(Notify::new());
            let server = tokio::task::spawn_local(start_server_loop(
                listener,
                Arc::clone(&state),
                Arc::clone(&shutdown),
            ));

            // File not there yet
            let (status, body) = fetch(addr, "GET", "/deovr").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(&body[..], br#"{"error":"List file not found"}"#);

            // The file is re-read on every request
            std::fs::write(&list_path, br#"{"scenes":[]}"#).unwrap();
            let (status, body) = fetch(addr, "POST", "/deovr").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(&body[..], br#"{"scenes":[]}"#);

            shutdown.notify_one();
            server.await.expect("server loop should exit cleanly");
            assert!(TcpStream::connect(addr).await.is_err());
        })
        .await;

    let _ = std::fs::remove_dir_all(&dir);
}
