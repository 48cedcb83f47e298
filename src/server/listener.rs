// Listener module
// Binds the TCP listener through socket2 before handing it to tokio

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Accept backlog queue size
const LISTEN_BACKLOG: i32 = 128;

/// Bind a `TcpListener` on `addr` with address reuse enabled.
///
/// `SO_REUSEADDR` lets consecutive CI runs rebind the port while the previous
/// socket is still in TIME_WAIT; on Unix `SO_REUSEPORT` is set as well. The
/// socket is switched to non-blocking mode before it is handed to tokio.
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(
        Domain::for_address(addr),
        Type::STREAM,
        Some(Protocol::TCP),
    )?;

    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    // socket2::Socket -> std::net::TcpListener -> tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
