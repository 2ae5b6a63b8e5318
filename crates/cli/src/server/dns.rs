use ferrous_proxy_domain::ClientIdentity;
use ferrous_proxy_infrastructure::dns::transport::read_with_length_prefix;
use ferrous_proxy_infrastructure::dns::{DnsServerHandler, TcpResponseSink, UdpResponseSink};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_UDP_QUERY_SIZE: usize = 65_535;

pub struct DnsListeners {
    pub udp: Arc<UdpSocket>,
    pub tcp: TcpListener,
}

impl DnsListeners {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.udp.local_addr()
    }
}

/// Binds UDP and TCP on `socket_addr`. IPv6 addresses also accept IPv4
/// clients.
pub fn bind_listeners(socket_addr: SocketAddr) -> anyhow::Result<DnsListeners> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp = create_udp_socket(domain, socket_addr)?;
    // port 0 must resolve to the same port for both transports
    let tcp_addr = udp.local_addr()?;
    let tcp = create_tcp_listener(domain, tcp_addr)?;

    info!(bind_address = %tcp_addr, "DNS proxy listening on UDP and TCP");

    Ok(DnsListeners {
        udp: Arc::new(udp),
        tcp,
    })
}

pub async fn run_dns_server(
    listeners: DnsListeners,
    handler: Arc<DnsServerHandler>,
    tcp_idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    let mut join_set: JoinSet<()> = JoinSet::new();

    join_set.spawn(run_udp_listener(
        listeners.udp,
        handler.clone(),
        shutdown.clone(),
    ));
    join_set.spawn(run_tcp_listener(
        listeners.tcp,
        handler,
        tcp_idle_timeout,
        shutdown,
    ));

    while join_set.join_next().await.is_some() {}
}

async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) {
    let mut recv_buf = vec![0u8; MAX_UDP_QUERY_SIZE];

    loop {
        let (n, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            received = socket.recv_from(&mut recv_buf) => match received {
                Ok(received) => received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    // ICMP errors from earlier replies surface here on some platforms
                    debug!(error = %e, "UDP recv error");
                    continue;
                }
            },
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();

        tokio::spawn(async move {
            let mut sink = UdpResponseSink::new(socket, peer);
            handler
                .handle(&query, ClientIdentity::udp(peer), &mut sink)
                .await;
        });
    }

    info!("UDP listener: shutting down");
}

async fn run_tcp_listener(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "TCP accept failed");
                    continue;
                }
            },
        };

        let handler = handler.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, handler, idle_timeout, shutdown).await;
        });
    }

    info!("TCP listener: shutting down");
}

/// Queries on one connection are answered in order, so a transfer stream
/// is never interleaved with another reply.
async fn serve_tcp_connection(
    stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsServerHandler>,
    idle_timeout: Duration,
    shutdown: CancellationToken,
) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!(client = %peer, error = %e, "Failed to set TCP_NODELAY");
    }

    let (mut reader, writer) = stream.into_split();
    let mut sink = TcpResponseSink::new(writer);
    let client = ClientIdentity::tcp(peer);

    loop {
        let query = tokio::select! {
            _ = shutdown.cancelled() => break,
            read = tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut reader)) => match read {
                Ok(Ok(query)) => query,
                Ok(Err(e)) => {
                    if e.kind() != io::ErrorKind::UnexpectedEof {
                        debug!(client = %peer, error = %e, "TCP read failed");
                    }
                    break;
                }
                Err(_) => {
                    debug!(client = %peer, "Closing idle TCP connection");
                    break;
                }
            },
        };

        handler.handle(&query, client, &mut sink).await;
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
