use bytes::{BufMut, BytesMut};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

pub const CHALLENGE: [u8; 4] = [0x0A, 0x0B, 0x0C, 0x0D];

#[derive(Debug, Clone, Copy)]
pub struct MockA2sBehavior {
    /// Answer unchallenged requests with `S2C_CHALLENGE`.
    pub require_challenge: bool,
    /// Send the info response as two split fragments.
    pub split_info: bool,
    /// Ignore player requests entirely.
    pub ignore_players: bool,
    /// Never answer anything.
    pub silent: bool,
}

impl Default for MockA2sBehavior {
    fn default() -> Self {
        Self {
            require_challenge: true,
            split_info: false,
            ignore_players: false,
            silent: false,
        }
    }
}

/// Local UDP server speaking just enough A2S for client tests.
pub struct MockA2sServer {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockA2sServer {
    pub async fn start(behavior: MockA2sBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 1400];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::Relaxed);
                            for datagram in Self::respond(&buf[..len], behavior) {
                                let _ = socket.send_to(&datagram, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn respond(request: &[u8], behavior: MockA2sBehavior) -> Vec<Vec<u8>> {
        if behavior.silent || request.len() < 5 || request[..4] != [0xFF; 4] {
            return vec![];
        }

        match request[4] {
            0x54 => {
                let challenged = request.len() >= 29 && request[25..29] == CHALLENGE;
                if behavior.require_challenge && !challenged {
                    return vec![challenge_packet()];
                }
                let info = info_packet();
                if behavior.split_info {
                    split(&info)
                } else {
                    vec![info]
                }
            }
            0x55 => {
                if behavior.ignore_players {
                    return vec![];
                }
                if request.len() < 9 || request[5..9] != CHALLENGE {
                    return vec![challenge_packet()];
                }
                vec![players_packet()]
            }
            _ => vec![],
        }
    }
}

impl Drop for MockA2sServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn challenge_packet() -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_i32_le(-1);
    buf.put_u8(0x41);
    buf.put_slice(&CHALLENGE);
    buf.to_vec()
}

fn info_packet() -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_i32_le(-1);
    buf.put_u8(0x49);
    buf.put_u8(17);
    buf.put_slice(b"Saka Main\0");
    buf.put_slice(b"ctf_2fort\0");
    buf.put_slice(b"tf\0");
    buf.put_slice(b"Team Fortress\0");
    buf.put_u16_le(440);
    buf.put_u8(2);
    buf.put_u8(32);
    buf.put_u8(0);
    buf.put_u8(b'd');
    buf.put_u8(b'l');
    buf.put_u8(0);
    buf.put_u8(1);
    buf.put_slice(b"1.0.0\0");
    buf.to_vec()
}

fn players_packet() -> Vec<u8> {
    let mut buf = BytesMut::new();
    buf.put_i32_le(-1);
    buf.put_u8(0x44);
    buf.put_u8(2);
    buf.put_u8(0);
    buf.put_slice(b"heavy\0");
    buf.put_i32_le(7);
    buf.put_f32_le(120.0);
    buf.put_u8(1);
    buf.put_slice(b"\0");
    buf.put_i32_le(0);
    buf.put_f32_le(3.5);
    buf.to_vec()
}

fn split(message: &[u8]) -> Vec<Vec<u8>> {
    let (first, second) = message.split_at(message.len() / 2);
    [first, second]
        .iter()
        .enumerate()
        .map(|(number, part)| {
            let mut buf = BytesMut::new();
            buf.put_i32_le(-2);
            buf.put_u32_le(42);
            buf.put_u8(2);
            buf.put_u8(number as u8);
            buf.put_u16_le(1248);
            buf.put_slice(part);
            buf.to_vec()
        })
        .collect()
}
