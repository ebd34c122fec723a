use protocol::{decode_player_info, PlayerInfo, ProtocolError};
use strafe::{SimulatedBody, Vec3f, FL_ONGROUND};
use tracing::debug;

/// Overwrites the body with the server's authoritative state.
pub fn apply_player_info(body: &mut SimulatedBody, info: &PlayerInfo) {
    body.velocity = Vec3f::from_array(info.velocity);
    body.origin = Vec3f::from_array(info.origin);
    body.base_velocity = Vec3f::from_array(info.base_velocity);
    body.flags = info.flags as u32;
    body.ground_entity = (body.flags & FL_ONGROUND != 0).then_some(0);
    body.friction = info.friction;
    body.gravity = info.gravity;
    body.water_level = info.water_level;
    body.in_duck = info.in_duck != 0;
}

/// Handles a raw player-info message.
pub fn handle_player_info(body: &mut SimulatedBody, bytes: &[u8]) -> Result<(), ProtocolError> {
    let info = decode_player_info(bytes)?;
    apply_player_info(body, &info);
    debug!(on_ground = body.on_ground(), speed = body.horizontal_speed(), "player info");
    Ok(())
}
