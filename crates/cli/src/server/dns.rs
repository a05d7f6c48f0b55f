use crate::di::ForwarderServices;
use dnsfwd_application::ports::UpstreamTransportPort;
use dnsfwd_application::use_cases::{ForwardQueryUseCase, QueryOutcome, ReplyOutcome};
use dnsfwd_domain::dns_message::MAX_UDP_MESSAGE_SIZE;
use dnsfwd_infrastructure::dns::UdpUpstream;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub async fn start_dns_server(
    bind_addr: SocketAddr,
    services: &ForwarderServices,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = Arc::new(create_udp_socket(bind_addr)?);
    info!(
        bind_address = %bind_addr,
        upstream = %services.upstream.upstream(),
        "DNS forwarder ready"
    );

    serve(
        listener,
        services.engine.clone(),
        services.upstream.clone(),
        shutdown,
    )
    .await;

    info!("DNS forwarder stopped");
    Ok(())
}

/// Runs the client listener and the upstream receive loop until `shutdown`
/// is cancelled.
pub async fn serve(
    listener: Arc<UdpSocket>,
    engine: Arc<ForwardQueryUseCase>,
    upstream: Arc<UdpUpstream>,
    shutdown: CancellationToken,
) {
    let replies = tokio::spawn(run_upstream_receiver(
        listener.clone(),
        engine.clone(),
        upstream,
        shutdown.clone(),
    ));

    run_client_listener(listener, engine, shutdown).await;

    if let Err(e) = replies.await {
        error!(error = %e, "Upstream receive task panicked");
    }
}

async fn run_client_listener(
    listener: Arc<UdpSocket>,
    engine: Arc<ForwardQueryUseCase>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let (len, client) = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = listener.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    // Includes ICMP port-unreachable reports for earlier replies.
                    debug!(error = %e, "UDP recv error on listener");
                    continue;
                }
            },
        };

        if let QueryOutcome::Answered(response) =
            engine.handle_query(&recv_buf[..len], client).await
        {
            if let Err(e) = listener.send_to(&response, client).await {
                warn!(client = %client, error = %e, "Failed to send cached answer");
            }
        }
    }
}

async fn run_upstream_receiver(
    listener: Arc<UdpSocket>,
    engine: Arc<ForwardQueryUseCase>,
    upstream: Arc<UdpUpstream>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

    loop {
        let len = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = upstream.recv(&mut recv_buf) => match result {
                Ok(len) => len,
                Err(e) => {
                    debug!(error = %e, "UDP recv error on upstream socket");
                    continue;
                }
            },
        };

        if let ReplyOutcome::Deliver { client, response } =
            engine.handle_upstream_reply(&recv_buf[..len])
        {
            if let Err(e) = listener.send_to(&response, client).await {
                warn!(client = %client, error = %e, "Failed to relay upstream reply");
            }
        }
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
