// Listener module
// Binds the fixture's TCP listener through socket2

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::FixtureError;

/// A listener that is already accepting, plus the address it actually got
///
/// `local_addr` differs from the requested address when port 0 was asked for.
#[derive(Debug)]
pub struct BoundListener {
    pub listener: TcpListener,
    pub local_addr: SocketAddr,
}

/// Bind `addr` and start listening.
///
/// No retry: any failure is returned as [`FixtureError::Bind`] and the caller
/// decides what to do with it. `SO_REUSEPORT` stays off: a second instance on
/// an occupied port must fail rather than share it.
///
/// Must be called from within a tokio runtime.
pub fn bind(addr: SocketAddr) -> Result<BoundListener, FixtureError> {
    let listener = create_listener(addr).map_err(|source| FixtureError::Bind { addr, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| FixtureError::Bind { addr, source })?;
    Ok(BoundListener {
        listener,
        local_addr,
    })
}

fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Accept IPv4 clients too when listening on an IPv6 wildcard
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }

    // Allows rebinding a port left in TIME_WAIT by a previous test run.
    // On Windows this would allow stealing a live port, so unix only.
    #[cfg(unix)]
    socket.set_reuse_address(true)?;

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    // socket2::Socket -> std::net::TcpListener -> tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
