//! Per-tick command construction.

use protocol::buttons::{IN_ATTACK, IN_CANCEL, IN_SCORE};
use protocol::MoveCommand;
use strafe::{
    anglemod, backpedal_yaw, linestrafe, plan_turn, sidestrafe, DVec2, Lean, SimulatedBody,
    StrafeDecision, StrafeMode,
};
use tracing::debug;

use crate::buttons::{Button, ButtonTable};
use crate::commands::Command;
use crate::config::MovementConfig;
use crate::controller::StrafeController;
use crate::look::mouse_move;
use crate::overrides::PendingOverrides;
use crate::realizer::{realize, realize_backpedal, AxisSpeeds};

pub const PITCH: usize = 0;
pub const YAW: usize = 1;
pub const ROLL: usize = 2;

const ROLL_LIMIT: f32 = 50.0;

/// Pitch limited to the configured range; the lower bound wins if the
/// configuration is inverted.
pub fn clamp_pitch(pitch: f32, config: &MovementConfig) -> f32 {
    let mut pitch = pitch;
    if pitch > config.pitch_down {
        pitch = config.pitch_down;
    }
    if pitch < -config.pitch_up {
        pitch = -config.pitch_up;
    }
    pitch
}

/// What the core needs from the game client around it.
pub trait Host {
    /// Pitch, yaw, roll in degrees.
    fn view_angles(&self) -> [f32; 3];
    fn set_view_angles(&mut self, angles: [f32; 3]);
    fn stop_pitch_drift(&mut self);
    fn start_pitch_drift(&mut self);
    /// Mouse movement accumulated since the last call.
    fn mouse_delta(&mut self) -> (f32, f32);
    fn is_alive(&self) -> bool;
    fn is_dead(&self) -> bool;
    fn in_intermission(&self) -> bool;
    /// A modal voice dialog is open.
    fn voice_squelched(&self) -> bool;
    /// A benchmark is driving input.
    fn bench_active(&self) -> bool;
}

/// Plain in-memory host.
#[derive(Debug, Clone, PartialEq)]
pub struct HostState {
    pub view_angles: [f32; 3],
    pub mouse: (f32, f32),
    pub alive: bool,
    pub health: i32,
    pub intermission: bool,
    pub squelched: bool,
    pub bench: bool,
    pub pitch_drifting: bool,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            view_angles: [0.0; 3],
            mouse: (0.0, 0.0),
            alive: true,
            health: 100,
            intermission: false,
            squelched: false,
            bench: false,
            pitch_drifting: false,
        }
    }
}

impl Host for HostState {
    fn view_angles(&self) -> [f32; 3] {
        self.view_angles
    }

    fn set_view_angles(&mut self, angles: [f32; 3]) {
        self.view_angles = angles;
    }

    fn stop_pitch_drift(&mut self) {
        self.pitch_drifting = false;
    }

    fn start_pitch_drift(&mut self) {
        self.pitch_drifting = true;
    }

    fn mouse_delta(&mut self) -> (f32, f32) {
        std::mem::take(&mut self.mouse)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_dead(&self) -> bool {
        self.health <= 0
    }

    fn in_intermission(&self) -> bool {
        self.intermission
    }

    fn voice_squelched(&self) -> bool {
        self.squelched
    }

    fn bench_active(&self) -> bool {
        self.bench
    }
}

/// All input state carried between ticks.
#[derive(Debug, Clone, Default)]
pub struct TasInput {
    pub buttons: ButtonTable,
    pub strafe: StrafeController,
    pub overrides: PendingOverrides,
    impulse: u8,
    weapon_select: u8,
    cancel: bool,
    old_angles: [f32; 3],
}

impl TasInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every held button and pending one-shot.
    pub fn shutdown(&mut self) {
        self.buttons.reset();
        self.strafe.deactivate();
        self.overrides = PendingOverrides::default();
    }

    pub fn select_weapon(&mut self, id: u8) {
        self.weapon_select = id;
    }

    #[inline]
    pub fn cancel_pending(&self) -> bool {
        self.cancel
    }

    /// Applies one console command. `Wait` and `Exec` are left to whoever
    /// drives the command stream.
    pub fn execute(
        &mut self,
        command: &Command,
        host: &mut impl Host,
        body: &SimulatedBody,
        config: &mut MovementConfig,
    ) {
        match *command {
            Command::Strafe { mode, active: true } => {
                let yaw = host.view_angles()[YAW] as f64;
                self.strafe.activate(mode, body, yaw);
            }
            Command::Strafe { active: false, .. } => self.strafe.deactivate(),
            Command::Button {
                button,
                down: true,
                source,
            } => {
                self.buttons.press(button, source);
            }
            Command::Button {
                button,
                down: false,
                source,
            } => {
                self.buttons.release(button, source);
                match button {
                    Button::Attack => self.cancel = false,
                    Button::MLook if !self.buttons.get(Button::MLook).held && config.lookspring => {
                        host.start_pitch_drift();
                    }
                    _ => {}
                }
            }
            Command::SetYaw(v) => self.overrides.yaw.arm(v),
            Command::SetPitch(v) => self.overrides.pitch.arm(v),
            Command::LineShift(v) => self.overrides.line_shift.arm(v),
            Command::Set { tunable, value } => config.set(tunable, value),
            Command::Impulse(n) => self.impulse = n,
            Command::Cancel => self.cancel = true,
            Command::Wait | Command::Exec(_) => {}
        }
    }

    /// Builds this tick's command. With `active` false (demo playback, not
    /// signed on) only the button bits and view angles pass through and no
    /// press edges are consumed.
    pub fn create_move(
        &mut self,
        host: &mut impl Host,
        body: &mut SimulatedBody,
        config: &mut MovementConfig,
        frame_time: f32,
        active: bool,
    ) -> MoveCommand {
        let mut cmd = MoveCommand::default();

        if active && !host.bench_active() {
            body.begin_tick(frame_time);
            self.buttons.clear_assists();
            self.angles_and_moves(host, body, config, frame_time, &mut cmd);
            if !self.strafe.mode().is_auto() {
                mouse_move(host, config, &self.buttons, &mut cmd);
            }
        }

        cmd.impulse = std::mem::take(&mut self.impulse);
        cmd.weapon_select = std::mem::take(&mut self.weapon_select);

        let mut bits = self.buttons.button_bits(active);
        if self.cancel {
            bits |= IN_CANCEL;
        }
        if host.is_dead() || host.in_intermission() {
            bits |= IN_SCORE;
        }
        if host.voice_squelched() {
            bits &= !IN_ATTACK;
        }
        cmd.buttons = bits;

        let angles = host.view_angles();
        if host.is_alive() {
            cmd.view_angles = angles;
            self.old_angles = angles;
        } else {
            cmd.view_angles = self.old_angles;
        }
        cmd
    }

    fn angles_and_moves(
        &mut self,
        host: &mut impl Host,
        body: &SimulatedBody,
        config: &mut MovementConfig,
        frame_time: f32,
        cmd: &mut MoveCommand,
    ) {
        let mut angles = host.view_angles();
        let mut speeds = AxisSpeeds::from_config(config);

        let yaw_override = self.overrides.yaw.take();
        if let Some(yaw) = yaw_override {
            angles[YAW] = yaw as f32;
        }

        let view_yaw = angles[YAW] as f64;
        let decision = match self.strafe.mode() {
            StrafeMode::None => {
                if yaw_override.is_none() {
                    self.manual_look(host, config, frame_time, &mut angles);
                }
                None
            }
            mode @ (StrafeMode::Left | StrafeMode::Right) => {
                let lean = if mode == StrafeMode::Right {
                    Lean::Right
                } else {
                    Lean::Left
                };
                let plan = plan_turn(body, config.angle_mode);
                Some(sidestrafe(&plan, view_yaw, lean, config.angle_mode))
            }
            StrafeMode::Line => {
                let plan = plan_turn(body, config.angle_mode);
                let shift = self.overrides.line_shift.take();
                let line = self.strafe.line_or_capture(body, view_yaw);
                if let Some(yaw) = yaw_override {
                    line.set_direction_yaw(yaw);
                }
                let origin = DVec2::new(body.origin.x as f64, body.origin.y as f64);
                Some(linestrafe(
                    line,
                    &plan,
                    origin,
                    view_yaw,
                    shift,
                    config.angle_mode,
                ))
            }
            StrafeMode::Backpedal => {
                realize_backpedal(&mut self.buttons);
                angles[YAW] = backpedal_yaw(body.horizontal_velocity()) as f32;
                None
            }
        };

        if let Some(StrafeDecision { yaw, posture, lean }) = decision {
            realize(&mut self.buttons, &mut speeds, posture, lean);
            debug!(?posture, ?lean, yaw, "strafe");
            angles[YAW] = yaw as f32;
        }

        angles[YAW] = anglemod(angles[YAW] as f64) as f32;
        self.overrides.line_shift.clear();

        angles[PITCH] = clamp_pitch(angles[PITCH], config);
        if let Some(pitch) = self.overrides.pitch.take() {
            let pitch = pitch as f32;
            angles[PITCH] = pitch;
            // The clamp widens for good so the requested pitch sticks.
            if pitch > config.pitch_down {
                config.pitch_down = pitch;
            }
            if pitch < -config.pitch_up {
                config.pitch_up = -pitch;
            }
            debug!(pitch, "pitch override");
        }
        angles[ROLL] = angles[ROLL].clamp(-ROLL_LIMIT, ROLL_LIMIT);
        host.set_view_angles(angles);

        if self.strafe.end_tick() {
            for button in [Button::Forward, Button::MoveRight, Button::MoveLeft, Button::Back] {
                self.buttons.end_forced(button);
            }
        }

        let b = &mut self.buttons;
        cmd.side_move += speeds.side * b.sample(Button::MoveRight);
        cmd.side_move -= speeds.side * b.sample(Button::MoveLeft);
        cmd.forward_move += speeds.forward * b.sample(Button::Forward);
        cmd.forward_move -= speeds.back * b.sample(Button::Back);
        cmd.up_move += speeds.up * b.sample(Button::MoveUp);
        cmd.up_move -= speeds.up * b.sample(Button::MoveDown);
    }

    fn manual_look(
        &mut self,
        host: &mut impl Host,
        config: &MovementConfig,
        frame_time: f32,
        angles: &mut [f32; 3],
    ) {
        let b = &mut self.buttons;
        angles[YAW] -= frame_time * config.yaw_speed * b.sample(Button::Right);
        angles[YAW] += frame_time * config.yaw_speed * b.sample(Button::Left);

        let up = b.sample(Button::LookUp);
        let down = b.sample(Button::LookDown);
        angles[PITCH] -= frame_time * config.pitch_speed * up;
        angles[PITCH] += frame_time * config.pitch_speed * down;
        if up != 0.0 || down != 0.0 {
            host.stop_pitch_drift();
        }
    }
}
