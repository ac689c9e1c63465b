use super::a2s::{self, Packet, Response, ServerInfo, SplitAssembler};
use async_trait::async_trait;
use serverwatch_application::ports::ServerQueryPort;
use serverwatch_domain::{DomainError, GameServerState, QueryOptions, RawPlayer, ServerTarget};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// A2S client over UDP.
///
/// Each attempt opens a fresh socket, fetches `A2S_INFO` and then
/// `A2S_PLAYER`. A failed player query leaves the player list empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceQueryClient;

impl SourceQueryClient {
    pub fn new() -> Self {
        Self
    }

    async fn attempt(
        &self,
        target: &ServerTarget,
        options: &QueryOptions,
    ) -> Result<GameServerState, DomainError> {
        let server_addr = resolve(target).await?;
        let socket = connect(server_addr).await?;
        let exchange = Exchange {
            socket: &socket,
            server: server_addr,
            timeout: options.socket_timeout(),
        };

        let info = exchange.info().await?;
        let players = match exchange.players().await {
            Ok(players) => players,
            Err(e) => {
                debug!(server = %server_addr, error = %e, "Player query failed, reporting no players");
                Vec::new()
            }
        };

        debug!(
            server = %server_addr,
            name = %info.name,
            map = %info.map,
            players = players.len(),
            max_players = info.max_players,
            "A2S query completed"
        );

        Ok(a2s::into_state(info, players))
    }
}

#[async_trait]
impl ServerQueryPort for SourceQueryClient {
    async fn query(
        &self,
        target: &ServerTarget,
        options: &QueryOptions,
    ) -> Result<GameServerState, DomainError> {
        let mut last_error = DomainError::QueryFailed(format!("no attempts made for {}", target.id));

        for attempt in 1..=options.max_attempts {
            match tokio::time::timeout(options.attempt_timeout(), self.attempt(target, options))
                .await
            {
                Ok(Ok(state)) => return Ok(state),
                Ok(Err(e)) => last_error = e,
                Err(_) => {
                    last_error = DomainError::QueryTimeout {
                        server: target.address(),
                        timeout_ms: options.attempt_timeout_ms,
                    }
                }
            }

            debug!(
                server_id = %target.id,
                attempt,
                max_attempts = options.max_attempts,
                error = %last_error,
                "A2S attempt failed"
            );
        }

        Err(last_error)
    }
}

async fn resolve(target: &ServerTarget) -> Result<SocketAddr, DomainError> {
    let address = target.address();
    let mut addrs = tokio::net::lookup_host(address.as_str())
        .await
        .map_err(|e| DomainError::QueryFailed(format!("cannot resolve {}: {}", address, e)))?;
    let resolved = addrs
        .next()
        .ok_or_else(|| DomainError::QueryFailed(format!("no address for {}", address)));
    resolved
}

async fn connect(server_addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let bind_addr = if server_addr.is_ipv4() {
        SocketAddr::from(([0, 0, 0, 0], 0))
    } else {
        SocketAddr::from(([0u16; 8], 0))
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
    socket
        .connect(server_addr)
        .await
        .map_err(|e| map_io_error(server_addr, e))?;
    Ok(socket)
}

struct Exchange<'a> {
    socket: &'a UdpSocket,
    server: SocketAddr,
    timeout: Duration,
}

impl Exchange<'_> {
    async fn info(&self) -> Result<ServerInfo, DomainError> {
        match self.request(&a2s::info_request(None)).await? {
            Response::Info(info) => Ok(info),
            Response::Challenge(challenge) => {
                match self.request(&a2s::info_request(Some(challenge))).await? {
                    Response::Info(info) => Ok(info),
                    other => Err(unexpected("info", &other)),
                }
            }
            other => Err(unexpected("info", &other)),
        }
    }

    async fn players(&self) -> Result<Vec<RawPlayer>, DomainError> {
        match self.request(&a2s::player_request(None)).await? {
            Response::Players(players) => Ok(players),
            Response::Challenge(challenge) => {
                match self.request(&a2s::player_request(Some(challenge))).await? {
                    Response::Players(players) => Ok(players),
                    other => Err(unexpected("player", &other)),
                }
            }
            other => Err(unexpected("player", &other)),
        }
    }

    async fn request(&self, message: &[u8]) -> Result<Response, DomainError> {
        tokio::time::timeout(self.timeout, self.socket.send(message))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| map_io_error(self.server, e))?;

        let payload = self.receive().await?;
        a2s::decode_response(&payload)
    }

    /// Reads one complete message, reassembling split responses.
    async fn receive(&self) -> Result<Vec<u8>, DomainError> {
        let mut assembler = SplitAssembler::new();
        let mut buf = vec![0u8; a2s::MAX_PACKET_SIZE * 2];

        loop {
            let len = tokio::time::timeout(self.timeout, self.socket.recv(&mut buf))
                .await
                .map_err(|_| self.timed_out())?
                .map_err(|e| map_io_error(self.server, e))?;

            match a2s::parse_packet(&buf[..len])? {
                Packet::Single(payload) => return Ok(payload),
                Packet::Split(fragment) => {
                    if let Some(message) = assembler.push(fragment)? {
                        return match a2s::parse_packet(&message)? {
                            Packet::Single(payload) => Ok(payload),
                            Packet::Split(_) => Err(DomainError::MalformedResponse(
                                "nested split packet".to_string(),
                            )),
                        };
                    }
                }
            }
        }
    }

    fn timed_out(&self) -> DomainError {
        DomainError::QueryTimeout {
            server: self.server.to_string(),
            timeout_ms: self.timeout.as_millis() as u64,
        }
    }
}

fn unexpected(expected: &str, response: &Response) -> DomainError {
    warn!(expected, response = ?response, "Unexpected A2S response");
    DomainError::MalformedResponse(format!("expected {} response", expected))
}

fn map_io_error(server: SocketAddr, e: std::io::Error) -> DomainError {
    match e.kind() {
        ErrorKind::ConnectionRefused => DomainError::ConnectionRefused {
            server: server.to_string(),
        },
        _ => DomainError::QueryFailed(format!("{}: {}", server, e)),
    }
}
