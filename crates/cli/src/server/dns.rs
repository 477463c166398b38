use anyhow::Context;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tinu_dns_infrastructure::dns::{DnsServerHandler, UdpListener};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::info;

const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

pub fn bind_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket
        .bind(&socket_addr.into())
        .with_context(|| format!("failed to bind DNS socket on {}", socket_addr))?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

pub async fn run_dns_server(
    socket: UdpSocket,
    handler: Arc<DnsServerHandler>,
    max_in_flight: usize,
    shutdown: CancellationToken,
) {
    let listener = UdpListener::new(socket, handler, max_in_flight);
    listener.run(shutdown.cancelled()).await;
    info!("DNS server stopped");
}
