use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use queried_infrastructure::dns::transport::tcp::{read_with_length_prefix, send_with_length_prefix};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::JoinHandle;

/// Loopback upstream answering every A question with `answer_ip`, on UDP and
/// TCP at the same port.
pub struct MockUpstream {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockUpstream {
    pub async fn start(answer_ip: Ipv4Addr) -> Self {
        let (udp, tcp) = bind_pair().await;
        let addr = udp.local_addr().unwrap();

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let udp_count = Arc::clone(&udp_queries);
        let udp_task = tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            while let Ok((len, peer)) = udp.recv_from(&mut buf).await {
                udp_count.fetch_add(1, Ordering::SeqCst);
                if let Some(reply) = answer(&buf[..len], answer_ip) {
                    let _ = udp.send_to(&reply, peer).await;
                }
            }
        });

        let tcp_count = Arc::clone(&tcp_queries);
        let tcp_task = tokio::spawn(async move {
            while let Ok((mut stream, _)) = tcp.accept().await {
                let tcp_count = Arc::clone(&tcp_count);
                tokio::spawn(async move {
                    while let Ok(request) = read_with_length_prefix(&mut stream).await {
                        tcp_count.fetch_add(1, Ordering::SeqCst);
                        if let Some(reply) = answer(&request, answer_ip) {
                            if send_with_length_prefix(&mut stream, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                });
            }
        });

        Self {
            addr,
            udp_queries,
            tcp_queries,
            tasks: vec![udp_task, tcp_task],
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn bind_pair() -> (UdpSocket, TcpListener) {
    loop {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        if let Ok(tcp) = TcpListener::bind(addr).await {
            return (udp, tcp);
        }
    }
}

fn answer(request_bytes: &[u8], answer_ip: Ipv4Addr) -> Option<Vec<u8>> {
    let request = Message::from_vec(request_bytes).ok()?;

    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(request.queries().to_vec());

    for query in request.queries() {
        if query.query_type() == RecordType::A {
            reply.add_answer(Record::from_rdata(
                query.name().clone(),
                300,
                RData::A(A(answer_ip)),
            ));
        }
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    reply.emit(&mut encoder).ok()?;
    Some(buf)
}
