//! DeoVR list server
//!
//! Serves a JSON list file over HTTP, telling a missing file apart from
//! other read failures.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
