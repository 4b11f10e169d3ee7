// 服务器模块入口
// 提供监听绑定、连接处理、主循环和信号处理

pub mod connection;
pub mod listener;
pub mod signal;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use thiserror::Error;

pub use listener::{bind_with_fallback, create_listener};
pub use server_loop::start_server_loop;
pub use signal::start_signal_handler;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("no free port in {attempts} attempt(s) starting at {addr}")]
    PortsExhausted { addr: SocketAddr, attempts: u16 },
}
