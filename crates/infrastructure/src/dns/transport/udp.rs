use async_trait::async_trait;
use dnsfwd_application::ports::UpstreamTransportPort;
use dnsfwd_domain::{DomainError, UpstreamServer};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// The single upstream socket shared by every forwarded query.
///
/// Queries go out through [`UpstreamTransportPort::send`]; a dedicated task
/// drains replies with [`UdpUpstream::recv`]. The socket is bound to an
/// ephemeral port and is not connected, so the source check happens here.
pub struct UdpUpstream {
    socket: UdpSocket,
    server: UpstreamServer,
}

impl UdpUpstream {
    pub async fn bind(server: UpstreamServer) -> Result<Self, DomainError> {
        let bind_addr: SocketAddr = if server.socket_addr().is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to bind upstream UDP socket: {}", e))
        })?;

        debug!(
            upstream = %server,
            local = ?socket.local_addr().ok(),
            "Upstream UDP socket bound"
        );

        Ok(Self { socket, server })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.socket.local_addr()?)
    }

    /// Waits for the next datagram from the upstream and returns its length.
    /// Datagrams from any other address are logged and discarded.
    pub async fn recv(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        let expected = self.server.socket_addr();
        loop {
            let (len, from) = self.socket.recv_from(buf).await.map_err(|e| {
                DomainError::IoError(format!("Failed to receive from upstream socket: {}", e))
            })?;

            if from == expected {
                return Ok(len);
            }

            warn!(
                expected = %expected,
                received_from = %from,
                bytes = len,
                "Discarding UDP datagram from unexpected source"
            );
        }
    }
}

#[async_trait]
impl UpstreamTransportPort for UdpUpstream {
    async fn send(&self, datagram: &[u8]) -> Result<(), DomainError> {
        let addr = self.server.socket_addr();
        let sent = self.socket.send_to(datagram, addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to send UDP query to {}: {}", addr, e))
        })?;

        if sent != datagram.len() {
            return Err(DomainError::IoError(format!(
                "Short UDP send to {}: {} of {} bytes",
                addr,
                sent,
                datagram.len()
            )));
        }
        Ok(())
    }

    fn upstream(&self) -> UpstreamServer {
        self.server
    }
}
