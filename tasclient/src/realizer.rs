//! Turns a strafe decision into held buttons.
//!
//! The host adds forward/back and side contributions as independent axes,
//! so a 45° posture needs equal magnitudes on both and "back" has to push
//! forward relative to the chosen view. Both are handled by adjusting a
//! per-tick copy of the axis speeds; the configuration itself is never
//! touched.

use strafe::{Lean, Posture};

use crate::buttons::{Button, ButtonTable};
use crate::config::MovementConfig;

/// Axis speed magnitudes for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpeeds {
    pub forward: f32,
    pub back: f32,
    pub side: f32,
    pub up: f32,
}

impl AxisSpeeds {
    pub fn from_config(cfg: &MovementConfig) -> Self {
        Self {
            forward: cfg.forward_speed,
            back: cfg.back_speed,
            side: cfg.side_speed,
            up: cfg.up_speed,
        }
    }
}

fn side_buttons(lean: Lean) -> (Button, Button) {
    match lean {
        Lean::Right => (Button::MoveRight, Button::MoveLeft),
        Lean::Left => (Button::MoveLeft, Button::MoveRight),
    }
}

pub fn realize(buttons: &mut ButtonTable, speeds: &mut AxisSpeeds, posture: Posture, lean: Lean) {
    let (toward, away) = side_buttons(lean);
    buttons.force_release(Button::Forward);

    match posture {
        Posture::Strafe => {
            buttons.force_press(toward);
            buttons.force_release(away);
            buttons.force_release(Button::Back);
        }
        Posture::Diagonal => {
            buttons.force_press(toward);
            buttons.force_release(away);
            buttons.force_press(Button::Back);
            speeds.back = -speeds.back;

            // A button that only just went down samples below full strength
            // (0.5 for a fresh press, 0.75 when it was also let go earlier in
            // the window). Scale the weaker axis so both contribute equally.
            let side = buttons.get(toward).fraction();
            let back = buttons.get(Button::Back).fraction();
            if side > 0.0 && back > 0.0 {
                if side < back {
                    speeds.side *= back / side;
                } else if back < side {
                    speeds.back *= side / back;
                }
            }
        }
        Posture::Back => {
            buttons.force_release(toward);
            buttons.force_release(away);
            buttons.force_press(Button::Back);
            speeds.back = -speeds.back;
        }
    }
}

pub fn realize_backpedal(buttons: &mut ButtonTable) {
    buttons.force_release(Button::Forward);
    buttons.force_release(Button::MoveRight);
    buttons.force_release(Button::MoveLeft);
    buttons.force_press(Button::Back);
}
