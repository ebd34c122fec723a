use protocol::MoveCommand;

use crate::buttons::{Button, ButtonTable};
use crate::config::MovementConfig;
use crate::frame::{clamp_pitch, Host, PITCH, YAW};

/// Applies accumulated mouse movement: turns the view, or with strafe held
/// (or lookstrafe under mlook) moves sideways; vertical movement pitches
/// under mlook and otherwise walks.
pub fn mouse_move(
    host: &mut impl Host,
    config: &MovementConfig,
    buttons: &ButtonTable,
    cmd: &mut MoveCommand,
) {
    let (dx, dy) = host.mouse_delta();
    if dx == 0.0 && dy == 0.0 {
        return;
    }

    let sens = config.sensitivity;
    let mlook = buttons.get(Button::MLook).held;
    let strafe = buttons.get(Button::Strafe).held;
    let mut angles = host.view_angles();

    if strafe || (config.lookstrafe && mlook) {
        cmd.side_move += config.m_side * sens * dx;
    } else {
        angles[YAW] -= config.m_yaw * sens * dx;
    }

    if mlook && !strafe {
        angles[PITCH] = clamp_pitch(angles[PITCH] + config.m_pitch * sens * dy, config);
        host.stop_pitch_drift();
    } else {
        cmd.forward_move -= config.m_forward * sens * dy;
    }

    host.set_view_angles(angles);
}
