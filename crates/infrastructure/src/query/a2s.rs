//! Source engine server query (A2S) wire format.
//!
//! Every datagram starts with a 4-byte header: `FF FF FF FF` for a single
//! packet or `FE FF FF FF` for one fragment of a split response. All
//! integers are little-endian; strings are NUL-terminated.

use bytes::{Buf, BufMut, BytesMut};
use serverwatch_domain::{DomainError, GameServerState, RawPlayer};
use std::collections::BTreeMap;

pub const SINGLE_PACKET_HEADER: i32 = -1;
pub const SPLIT_PACKET_HEADER: i32 = -2;

const A2S_INFO: u8 = 0x54;
const A2S_PLAYER: u8 = 0x55;
const S2C_CHALLENGE: u8 = 0x41;
const S2A_INFO: u8 = 0x49;
const S2A_PLAYER: u8 = 0x44;

const INFO_PAYLOAD: &[u8] = b"Source Engine Query\0";
const NO_CHALLENGE: [u8; 4] = [0xFF; 4];
const COMPRESSED_FLAG: u32 = 0x8000_0000;

/// Largest datagram a server is expected to send.
pub const MAX_PACKET_SIZE: usize = 1400;

pub fn info_request(challenge: Option<[u8; 4]>) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(29);
    buf.put_i32_le(SINGLE_PACKET_HEADER);
    buf.put_u8(A2S_INFO);
    buf.put_slice(INFO_PAYLOAD);
    if let Some(challenge) = challenge {
        buf.put_slice(&challenge);
    }
    buf.to_vec()
}

/// Without a challenge the request asks the server to issue one.
pub fn player_request(challenge: Option<[u8; 4]>) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(9);
    buf.put_i32_le(SINGLE_PACKET_HEADER);
    buf.put_u8(A2S_PLAYER);
    buf.put_slice(&challenge.unwrap_or(NO_CHALLENGE));
    buf.to_vec()
}

/// Server information from an `S2A_INFO` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    pub protocol: u8,
    pub name: String,
    pub map: String,
    pub folder: String,
    pub game: String,
    pub app_id: u16,
    pub players: u8,
    pub max_players: u8,
    pub bots: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Challenge([u8; 4]),
    Info(ServerInfo),
    Players(Vec<RawPlayer>),
}

/// One datagram, before reassembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// Payload following the `FF FF FF FF` header.
    Single(Vec<u8>),
    Split(SplitFragment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitFragment {
    pub id: u32,
    pub total: u8,
    pub number: u8,
    pub payload: Vec<u8>,
}

pub fn parse_packet(datagram: &[u8]) -> Result<Packet, DomainError> {
    let mut buf = datagram;
    ensure(&buf, 4, "packet header")?;

    match buf.get_i32_le() {
        SINGLE_PACKET_HEADER => Ok(Packet::Single(buf.to_vec())),
        SPLIT_PACKET_HEADER => {
            ensure(&buf, 8, "split packet header")?;
            let id = buf.get_u32_le();
            if id & COMPRESSED_FLAG != 0 {
                return Err(malformed("compressed split packets are not supported"));
            }
            let total = buf.get_u8();
            let number = buf.get_u8();
            let _size = buf.get_u16_le();

            if total == 0 || number >= total {
                return Err(malformed(format!(
                    "split packet {} of {} is out of range",
                    number, total
                )));
            }

            Ok(Packet::Split(SplitFragment {
                id,
                total,
                number,
                payload: buf.to_vec(),
            }))
        }
        other => Err(malformed(format!("unknown packet header {:#010x}", other))),
    }
}

/// Collects split fragments until the full message is available.
#[derive(Debug, Default)]
pub struct SplitAssembler {
    id: Option<u32>,
    total: u8,
    parts: BTreeMap<u8, Vec<u8>>,
}

impl SplitAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the reassembled message once every fragment has arrived.
    ///
    /// The message still carries its own `FF FF FF FF` header.
    pub fn push(&mut self, fragment: SplitFragment) -> Result<Option<Vec<u8>>, DomainError> {
        match self.id {
            None => {
                self.id = Some(fragment.id);
                self.total = fragment.total;
            }
            Some(id) if id != fragment.id || self.total != fragment.total => {
                return Err(malformed("split fragments belong to different responses"));
            }
            Some(_) => {}
        }

        self.parts.insert(fragment.number, fragment.payload);

        if self.parts.len() < self.total as usize {
            return Ok(None);
        }

        let message = std::mem::take(&mut self.parts)
            .into_values()
            .flatten()
            .collect();
        self.id = None;
        Ok(Some(message))
    }
}

/// Decodes the payload of a single (or reassembled, header-stripped) packet.
pub fn decode_response(payload: &[u8]) -> Result<Response, DomainError> {
    let mut buf = payload;
    ensure(&buf, 1, "response type")?;

    match buf.get_u8() {
        S2C_CHALLENGE => {
            ensure(&buf, 4, "challenge")?;
            let mut challenge = [0u8; 4];
            buf.copy_to_slice(&mut challenge);
            Ok(Response::Challenge(challenge))
        }
        S2A_INFO => decode_info(buf).map(Response::Info),
        S2A_PLAYER => decode_players(buf).map(Response::Players),
        other => Err(malformed(format!("unexpected response type {:#04x}", other))),
    }
}

fn decode_info(mut buf: &[u8]) -> Result<ServerInfo, DomainError> {
    ensure(&buf, 1, "protocol")?;
    let protocol = buf.get_u8();
    let name = read_cstring(&mut buf, "server name")?;
    let map = read_cstring(&mut buf, "map")?;
    let folder = read_cstring(&mut buf, "folder")?;
    let game = read_cstring(&mut buf, "game")?;
    ensure(&buf, 5, "player counts")?;
    let app_id = buf.get_u16_le();
    let players = buf.get_u8();
    let max_players = buf.get_u8();
    let bots = buf.get_u8();

    Ok(ServerInfo {
        protocol,
        name,
        map,
        folder,
        game,
        app_id,
        players,
        max_players,
        bots,
    })
}

fn decode_players(mut buf: &[u8]) -> Result<Vec<RawPlayer>, DomainError> {
    ensure(&buf, 1, "player count")?;
    let count = buf.get_u8() as usize;
    let mut players = Vec::with_capacity(count);

    for _ in 0..count {
        ensure(&buf, 1, "player index")?;
        let _index = buf.get_u8();
        let name = read_cstring(&mut buf, "player name")?;
        ensure(&buf, 8, "player score")?;
        let score = buf.get_i32_le();
        let duration = buf.get_f32_le();

        players.push(RawPlayer {
            name: Some(name),
            score: Some(score as i64),
            connected_seconds: Some(duration as f64),
        });
    }

    Ok(players)
}

/// Combines the info and player responses into protocol-neutral state.
pub fn into_state(info: ServerInfo, players: Vec<RawPlayer>) -> GameServerState {
    GameServerState {
        name: Some(info.name),
        map: Some(info.map),
        max_players: Some(info.max_players as u32),
        players,
    }
}

fn read_cstring(buf: &mut &[u8], field: &str) -> Result<String, DomainError> {
    let end = buf
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| malformed(format!("unterminated {}", field)))?;
    let value = String::from_utf8_lossy(&buf[..end]).into_owned();
    buf.advance(end + 1);
    Ok(value)
}

fn ensure(buf: &&[u8], needed: usize, field: &str) -> Result<(), DomainError> {
    if buf.remaining() < needed {
        return Err(malformed(format!("truncated {}", field)));
    }
    Ok(())
}

fn malformed(msg: impl Into<String>) -> DomainError {
    DomainError::MalformedResponse(msg.into())
}
