//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route matching, dispatch and
//! access logging.

use crate::config::AppState;
use crate::handler::list_file;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub method: &'a str,
    pub http_version: &'static str,
    pub peer_addr: Option<SocketAddr>,
    pub referer: Option<&'a str>,
    pub user_agent: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_request<B>(req: &'a Request<B>, peer_addr: Option<SocketAddr>) -> Self {
        let header = move |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());

        Self {
            path: req.uri().path(),
            query: req.uri().query(),
            method: req.method().as_str(),
            http_version: version_label(req.version()),
            peer_addr,
            referer: header("referer"),
            user_agent: header("user-agent"),
        }
    }

    fn access_entry(&self, resp: &Response<Full<Bytes>>, started: Instant) -> AccessLogEntry {
        let remote = self
            .peer_addr
            .map_or_else(|| "-".to_string(), |addr| addr.ip().to_string());
        let mut entry = AccessLogEntry::new(remote, self.method.to_string(), self.path.to_string());
        entry.query = self.query.map(ToString::to_string);
        entry.http_version = self.http_version.to_string();
        entry.status = resp.status().as_u16();
        entry.body_bytes = resp
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_default();
        entry.referer = self.referer.map(ToString::to_string);
        entry.user_agent = self.user_agent.map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        entry
    }
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

/// Main entry point for HTTP request handling.
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req, peer_addr);

    let response = route_request(&ctx, &state).await;

    if state.access_log_enabled() {
        logger::log_access(
            &ctx.access_entry(&response, started),
            &state.config.logging.access_log_format,
        );
    }

    Ok(response)
}

/// Route request based on path and configuration
async fn route_request(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Health check endpoints
    if state.config.health.matches(ctx.path) {
        return http::build_health_response("ok");
    }

    // 2. The list file, whatever the method
    if ctx.path == state.config.list.route {
        return list_file::serve_list_file(&state.list_path).await;
    }

    http::build_404_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_extracts_log_fields() {
        let req = Request::builder()
            .method("POST")
            .uri("/deovr?x=1")
            .header("user-agent", "DeoVR/12")
            .body(())
            .unwrap();
        let peer: SocketAddr = "192.168.1.20:5555".parse().unwrap();
        let ctx = RequestContext::from_request(&req, Some(peer));

        assert_eq!(ctx.path, "/deovr");
        assert_eq!(ctx.query, Some("x=1"));
        assert_eq!(ctx.method, "POST");
        assert_eq!(ctx.http_version, "1.1");
        assert_eq!(ctx.user_agent, Some("DeoVR/12"));
        assert!(ctx.referer.is_none());

        let resp = http::build_404_response();
        let entry = ctx.access_entry(&resp, Instant::now());
        assert_eq!(entry.remote_addr, "192.168.1.20");
        assert_eq!(entry.status, 404);
        assert_eq!(entry.body_bytes, "404 Not Found".len());
    }
}
