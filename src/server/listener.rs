// Listener module
// Creates TCP listeners and walks forward to the next free port when the
// configured one is taken

use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::ServerError;
use crate::logger;

/// Create a `TcpListener` with `SO_REUSEADDR` enabled.
///
/// `SO_REUSEPORT` stays off: a port held by another process must surface
/// as `AddrInUse`.
pub fn create_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Allows binding to a port in TIME_WAIT state
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

/// Bind `addr`, trying up to `attempts` consecutive ports while the
/// current one is in use. Port 0 is never retried.
pub fn bind_with_fallback(addr: SocketAddr, attempts: u16) -> Result<TcpListener, ServerError> {
    let start = addr.port();

    for offset in 0..attempts.max(1) {
        let Some(port) = start.checked_add(offset) else {
            break;
        };
        let candidate = SocketAddr::new(addr.ip(), port);

        match create_listener(candidate) {
            Ok(listener) => {
                if offset > 0 {
                    logger::log_port_fallback(start, port);
                }
                return Ok(listener);
            }
            Err(e) if e.kind() == io::ErrorKind::AddrInUse && start != 0 => {
                logger::log_info(&format!("Port {port} is in use, trying {}", port.saturating_add(1)));
            }
            Err(source) => {
                return Err(ServerError::Bind {
                    addr: candidate,
                    source,
                })
            }
        }
    }

    Err(ServerError::PortsExhausted { addr, attempts })
}
