use super::supervisor::ListenerSupervisor;
use queried_domain::Config;
use queried_infrastructure::dns::transport::tcp::{
    read_with_length_prefix, send_with_length_prefix,
};
use queried_infrastructure::dns::{Connection, DnsRequestHandler};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tracing::{debug, info, warn};

const MAX_UDP_REQUEST_SIZE: usize = 4096;
const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Spawns a UDP and a TCP listener for every configured listen address.
pub fn start_listeners(
    config: &Config,
    handler: Arc<DnsRequestHandler>,
) -> anyhow::Result<ListenerSupervisor> {
    let mut supervisor = ListenerSupervisor::new(config.listener_failure);

    for listen in config.listen_addrs()? {
        let addr = listen.socket_addr();

        let udp_handler = Arc::clone(&handler);
        supervisor.spawn(format!("udp://{}", addr), async move {
            let socket = UdpSocket::bind(addr).await?;
            info!(listen = %addr, proto = "udp", "DNS listener ready");
            serve_udp(Arc::new(socket), udp_handler).await
        });

        let tcp_handler = Arc::clone(&handler);
        supervisor.spawn(format!("tcp://{}", addr), async move {
            let listener = TcpListener::bind(addr).await?;
            info!(listen = %addr, proto = "tcp", "DNS listener ready");
            serve_tcp(listener, tcp_handler).await
        });
    }

    info!(
        listeners = supervisor.len(),
        policy = config.listener_failure.as_str(),
        "DNS server starting"
    );

    Ok(supervisor)
}

/// Errors a listener should shrug off rather than report.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
    )
}

pub async fn serve_udp(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsRequestHandler>,
) -> anyhow::Result<()> {
    let mut recv_buf = [0u8; MAX_UDP_REQUEST_SIZE];

    loop {
        let (n, peer) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient UDP receive error");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let request: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            let connection = Connection::Datagram { peer };
            if let Some(reply) = handler.handle(&request, &connection).await {
                if let Err(e) = socket.send_to(&reply, peer).await {
                    debug!(client = %peer, error = %e, "Failed to send UDP reply");
                }
            }
        });
    }
}

pub async fn serve_tcp(listener: TcpListener, handler: Arc<DnsRequestHandler>) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) if is_transient(&e) => {
                debug!(error = %e, "Transient TCP accept error");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, handler).await;
        });
    }
}

/// Serves queries on one TCP connection until the client goes quiet or hangs up.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<DnsRequestHandler>,
) {
    let connection = Connection::Stream { peer };

    loop {
        let request =
            match tokio::time::timeout(TCP_IDLE_TIMEOUT, read_with_length_prefix(&mut stream)).await {
                Ok(Ok(request)) => request,
                Ok(Err(e)) => {
                    if e.kind() != io::ErrorKind::UnexpectedEof {
                        debug!(client = %peer, error = %e, "TCP read failed");
                    }
                    return;
                }
                Err(_) => {
                    debug!(client = %peer, "TCP connection idle, closing");
                    return;
                }
            };

        if let Some(reply) = handler.handle(&request, &connection).await {
            if let Err(e) = send_with_length_prefix(&mut stream, &reply).await {
                warn!(client = %peer, error = %e, "Failed to send TCP reply");
                return;
            }
        }
    }
}
