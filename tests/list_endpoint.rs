use std::path::{Path, PathBuf};
use std::sync::Arc;

use deovr_list::config::{AppState, Config, Overrides};
use deovr_list::handler::handle_request;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{Request, StatusCode};

/// Per-test scratch directory under the system temp dir
fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deovr-list-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("fixture dir");
    dir
}

fn state_for(list_path: &Path) -> Arc<AppState> {
    let overrides = Overrides {
        list_path: Some(list_path.to_string_lossy().into_owned()),
        port: None,
    };
    let mut cfg = Config::load_with("no-such-config-file", &overrides).expect("config should load");
    cfg.logging.access_log = false;
    Arc::new(AppState::new(&cfg))
}

async fn get(state: &Arc<AppState>, method: &str, uri: &str) -> (StatusCode, Option<String>, Bytes) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Empty::<Bytes>::new())
        .unwrap();
    let resp = handle_request(req, Arc::clone(state), None).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body)
}

#[tokio::test]
async fn serves_file_bytes_verbatim() {
    let dir = fixture_dir("verbatim");
    let path = dir.join("list.json");
    std::fs::write(&path, br#"{"scenes":[]}"#).unwrap();
    let state = state_for(&path);

    let (status, content_type, body) = get(&state, "GET", "/deovr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(&body[..], br#"{"scenes":[]}"#);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn non_json_content_is_not_rewritten() {
    let dir = fixture_dir("raw");
    let path = dir.join("list.json");
    let raw = b"{ \"scenes\" : [ ] }\n\n  trailing garbage";
    std::fs::write(&path, raw).unwrap();
    let state = state_for(&path);

    let (status, _, body) = get(&state, "GET", "/deovr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], raw);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn missing_file_is_json_404() {
    let dir = fixture_dir("missing");
    let state = state_for(&dir.join("absent.json"));

    let (status, content_type, body) = get(&state, "GET", "/deovr").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, serde_json::json!({ "error": "List file not found" }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn unreadable_path_is_empty_500() {
    // A directory at the list path exists but cannot be read as a file
    let dir = fixture_dir("unreadable");
    let state = state_for(&dir);

    let (status, content_type, body) = get(&state, "GET", "/deovr").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.is_none());
    assert!(body.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn every_method_gets_the_same_answer() {
    let dir = fixture_dir("methods");
    let path = dir.join("list.json");
    let payload = br#"{"scenes":[{"name":"Library","list":[]}]}"#;
    std::fs::write(&path, payload).unwrap();
    let state = state_for(&path);

    for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
        let (status, content_type, body) = get(&state, method, "/deovr").await;
        assert_eq!(status, StatusCode::OK, "method {method}");
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(&body[..], payload);
    }
    assert_eq!(std::fs::read(&path).unwrap(), payload);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn request_body_is_ignored() {
    let dir = fixture_dir("body");
    let state = state_for(&dir.join("absent.json"));

    let req = Request::builder()
        .method("POST")
        .uri("/deovr")
        .body(Full::new(Bytes::from_static(b"{\"ignored\":true}")))
        .unwrap();
    let resp = handle_request(req, Arc::clone(&state), None).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let dir = fixture_dir("routes");
    let state = state_for(&dir.join("list.json"));

    let (status, _, body) = get(&state, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], br#"{"status":"ok"}"#);

    let (status, _, _) = get(&state, "GET", "/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, content_type, _) = get(&state, "GET", "/deovr/extra").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(content_type.as_deref(), Some("text/plain"));

    let _ = std::fs::remove_dir_all(&dir);
}
