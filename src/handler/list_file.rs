//! List file serving module
//!
//! Reads the JSON list file in one go and maps the outcome to a response:
//! the raw bytes on success, a JSON error object when the file is missing,
//! and a bare 500 for any other I/O failure.

use crate::http::response::{log_build_error, APPLICATION_JSON};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

pub const NOT_FOUND_MESSAGE: &str = "List file not found";

/// Why a list file read failed, as far as the client is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFailure {
    NotFound,
    Other,
}

impl From<io::ErrorKind> for ReadFailure {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ListFileError {
    #[error("list file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read list file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ListFileError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match ReadFailure::from(source.kind()) {
            ReadFailure::NotFound => Self::NotFound {
                path: path.to_path_buf(),
            },
            ReadFailure::Other => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    pub const fn kind(&self) -> ReadFailure {
        match self {
            Self::NotFound { .. } => ReadFailure::NotFound,
            Self::Io { .. } => ReadFailure::Other,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Read the whole list file. A single attempt, no retries.
pub async fn read_list_file(path: &Path) -> Result<Bytes, ListFileError> {
    fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|e| ListFileError::from_io(path, e))
}

/// Success: content type, then the raw bytes. The status is left at the
/// builder default (200).
pub fn success_response(data: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .header("Content-Type", APPLICATION_JSON)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Map a failure kind to its response.
///
/// `NotFound` writes status, then content type, then the JSON error body.
/// `Other` writes only the status.
pub fn failure_response(failure: ReadFailure) -> Response<Full<Bytes>> {
    match failure {
        ReadFailure::NotFound => {
            let body = serde_json::to_vec(&ErrorBody {
                error: NOT_FOUND_MESSAGE,
            })
            .unwrap_or_default();

            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .header("Content-Type", APPLICATION_JSON)
                .body(Full::new(Bytes::from(body)))
                .unwrap_or_else(|e| {
                    log_build_error("404", &e);
                    Response::new(Full::new(Bytes::new()))
                })
        }
        ReadFailure::Other => Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Full::new(Bytes::new()))
            .unwrap_or_else(|e| {
                log_build_error("500", &e);
                Response::new(Full::new(Bytes::new()))
            }),
    }
}

/// Read the list file at `path` and build the response for it
pub async fn serve_list_file(path: &Path) -> Response<Full<Bytes>> {
    match read_list_file(path).await {
        Ok(data) => success_response(data),
        Err(e) => {
            match e.kind() {
                ReadFailure::NotFound => logger::log_warning(&e.to_string()),
                ReadFailure::Other => logger::log_error(&e.to_string()),
            }
            failure_response(e.kind())
        }
    }
}
