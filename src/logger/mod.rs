//! Logger module
//!
//! Server lifecycle lines, per-request access logging and error/warning
//! output, optionally redirected to files.

mod format;
mod level;
pub mod writer;

pub use format::AccessLogEntry;
pub use level::{enabled, set_level, LogLevel};

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    set_level(config.logging.level);
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("DeoVR list server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Serving {} on {}",
        config.list.path, config.list.route
    ));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_info(&format!("[INFO] {message}"));
}

pub fn log_port_fallback(requested: u16, bound: u16) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_info(&format!(
        "[INFO] Port {requested} in use, bound to {bound} instead"
    ));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if !enabled(LogLevel::Debug) {
        return;
    }
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    if !enabled(LogLevel::Warn) {
        return;
    }
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_info(&format!(
        "[SHUTDOWN] Listener closed, {active_connections} connection(s) still finishing"
    ));
}
