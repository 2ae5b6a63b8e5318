#![allow(dead_code)]
use ferrous_proxy_domain::UpstreamAddr;
use ferrous_proxy_infrastructure::dns::transport::{read_with_length_prefix, send_with_length_prefix};
use hickory_proto::op::{Message, MessageType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub enum MockBehavior {
    /// One A record answer per query.
    Answer(Ipv4Addr),
    /// Reply whose id is off by one.
    WrongId,
    /// One message per answer set, then the connection is closed.
    Transfer(Vec<Vec<Record>>),
}

pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(behavior: MockBehavior) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let seen = queries.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            seen.fetch_add(1, Ordering::SeqCst);
                            for response in build_responses(&behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub async fn start_tcp(behavior: MockBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let behavior = Arc::new(behavior);

        let seen = queries.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let behavior = behavior.clone();
                        let seen = seen.clone();
                        tokio::spawn(async move {
                            while let Ok(query) = read_with_length_prefix(&mut stream).await {
                                seen.fetch_add(1, Ordering::SeqCst);
                                for response in build_responses(&behavior, &query) {
                                    if send_with_length_prefix(&mut stream, &response).await.is_err() {
                                        return;
                                    }
                                }
                                if matches!(*behavior, MockBehavior::Transfer(_)) {
                                    return;
                                }
                            }
                        });
                    }
                }
            }
        });

        Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn upstream(&self) -> UpstreamAddr {
        UpstreamAddr::Resolved(self.addr)
    }

    pub fn queries_seen(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new();
    reply.set_id(request.id());
    reply.set_message_type(MessageType::Response);
    reply.set_op_code(request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(request.queries().to_vec());
    reply
}

fn build_responses(behavior: &MockBehavior, raw: &[u8]) -> Vec<Vec<u8>> {
    let Ok(request) = Message::from_vec(raw) else {
        return vec![];
    };

    match behavior {
        MockBehavior::Answer(ip) => {
            let mut reply = reply_to(&request);
            if let Some(query) = request.queries().first() {
                reply.add_answer(Record::from_rdata(
                    query.name().clone(),
                    60,
                    RData::A(A(*ip)),
                ));
            }
            vec![reply.to_vec().unwrap()]
        }
        MockBehavior::WrongId => {
            let mut reply = reply_to(&request);
            reply.set_id(request.id().wrapping_add(1));
            vec![reply.to_vec().unwrap()]
        }
        MockBehavior::Transfer(answer_sets) => answer_sets
            .iter()
            .map(|answers| {
                let mut reply = reply_to(&request);
                reply.add_answers(answers.clone());
                reply.to_vec().unwrap()
            })
            .collect(),
    }
}
