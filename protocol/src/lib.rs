//! Wire records exchanged with the host: the authoritative player-info
//! message the server sends every frame, and the movement command the
//! client produces every tick.
//!
//! Both use bincode's legacy configuration (fixed-width little-endian
//! integers, no length prefixes for arrays), which matches the host's packed
//! record layout byte for byte.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Bits of [`MoveCommand::buttons`].
pub mod buttons {
    pub const IN_ATTACK: u16 = 1 << 0;
    pub const IN_JUMP: u16 = 1 << 1;
    pub const IN_DUCK: u16 = 1 << 2;
    pub const IN_FORWARD: u16 = 1 << 3;
    pub const IN_BACK: u16 = 1 << 4;
    pub const IN_USE: u16 = 1 << 5;
    pub const IN_CANCEL: u16 = 1 << 6;
    pub const IN_LEFT: u16 = 1 << 7;
    pub const IN_RIGHT: u16 = 1 << 8;
    pub const IN_MOVELEFT: u16 = 1 << 9;
    pub const IN_MOVERIGHT: u16 = 1 << 10;
    pub const IN_ATTACK2: u16 = 1 << 11;
    pub const IN_RUN: u16 = 1 << 12;
    pub const IN_RELOAD: u16 = 1 << 13;
    pub const IN_ALT1: u16 = 1 << 14;
    pub const IN_SCORE: u16 = 1 << 15;
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("record is {actual} bytes, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("codec: {0}")]
    Codec(#[from] bincode::Error),
}

/// Authoritative body state pushed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub velocity: [f32; 3],
    pub origin: [f32; 3],
    pub base_velocity: [f32; 3],
    pub flags: i32,
    pub friction: f32,
    pub gravity: f32,
    pub water_level: u8,
    pub in_duck: u8,
}

impl PlayerInfo {
    pub const WIRE_SIZE: usize = 9 * 4 + 4 + 4 + 4 + 1 + 1;
}

/// One tick of client input as sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Pitch, yaw, roll in degrees.
    pub view_angles: [f32; 3],
    pub forward_move: f32,
    pub side_move: f32,
    pub up_move: f32,
    pub buttons: u16,
    pub impulse: u8,
    pub weapon_select: u8,
}

impl MoveCommand {
    #[inline]
    pub fn has(&self, bit: u16) -> bool {
        self.buttons & bit != 0
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(bincode::serialize(value)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Decodes a player-info message, rejecting truncated or padded records.
pub fn decode_player_info(bytes: &[u8]) -> Result<PlayerInfo, ProtocolError> {
    if bytes.len() != PlayerInfo::WIRE_SIZE {
        return Err(ProtocolError::Length {
            expected: PlayerInfo::WIRE_SIZE,
            actual: bytes.len(),
        });
    }
    decode(bytes)
}
