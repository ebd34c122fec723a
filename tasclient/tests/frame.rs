use protocol::buttons::{IN_ATTACK, IN_CANCEL, IN_FORWARD, IN_JUMP, IN_MOVERIGHT, IN_SCORE};
use strafe::{SimulatedBody, StrafeMode, Vec3f, DUCK_SPEED_FACTOR, FL_DUCKING};
use tasclient::frame::{PITCH, ROLL, YAW};
use tasclient::{Button, Command, HostState, MovementConfig, Source, TasInput};

struct Rig {
    input: TasInput,
    host: HostState,
    body: SimulatedBody,
    config: MovementConfig,
}

impl Rig {
    fn new() -> Self {
        Self {
            input: TasInput::new(),
            host: HostState::default(),
            body: SimulatedBody::default(),
            config: MovementConfig::default(),
        }
    }

    fn airborne(vx: f32, vy: f32) -> Self {
        let mut rig = Self::new();
        rig.body.velocity = Vec3f::new(vx, vy, 0.0);
        rig
    }

    fn run(&mut self, line: &str) {
        let command = Command::parse(line).expect("parse");
        self.input
            .execute(&command, &mut self.host, &self.body, &mut self.config);
    }

    fn tick(&mut self) -> protocol::MoveCommand {
        self.input
            .create_move(&mut self.host, &mut self.body, &mut self.config, 0.01, true)
    }
}

#[test]
fn manual_turn_uses_key_fraction() {
    let mut rig = Rig::new();
    rig.run("+left");
    let cmd = rig.tick();
    // 0.01 s * 210 deg/s * 0.5
    assert!((cmd.view_angles[YAW] - 1.05).abs() < 0.01, "yaw {}", cmd.view_angles[YAW]);
}

#[test]
fn forward_ramps_from_half_to_full() {
    let mut rig = Rig::new();
    rig.run("+forward 17");
    assert_eq!(rig.tick().forward_move, 200.0);
    let cmd = rig.tick();
    assert_eq!(cmd.forward_move, 400.0);
    assert!(cmd.has(IN_FORWARD));
}

#[test]
fn yaw_override_applies_once() {
    let mut rig = Rig::new();
    rig.run("tas_yaw 90");
    let cmd = rig.tick();
    assert!((cmd.view_angles[YAW] - 90.0).abs() < 1e-3);
    assert!(!rig.input.overrides.yaw.is_pending());

    rig.host.view_angles[YAW] = 10.0;
    let cmd = rig.tick();
    assert!((cmd.view_angles[YAW] - 10.0).abs() < 0.01);
}

#[test]
fn pitch_override_widens_clamp_for_good() {
    let mut rig = Rig::new();
    rig.run("tas_pitch 95");
    let cmd = rig.tick();
    assert_eq!(cmd.view_angles[PITCH], 95.0);
    assert_eq!(rig.config.pitch_down, 95.0);
    assert!(!rig.input.overrides.pitch.is_pending());

    rig.run("tas_pitch -100");
    rig.tick();
    assert_eq!(rig.config.pitch_up, 100.0);
    assert_eq!(rig.config.pitch_down, 95.0);
}

#[test]
fn view_is_clamped() {
    let mut rig = Rig::new();
    rig.host.view_angles = [120.0, 0.0, 80.0];
    let cmd = rig.tick();
    assert_eq!(cmd.view_angles[PITCH], 89.0);
    assert_eq!(cmd.view_angles[ROLL], 50.0);
}

#[test]
fn right_strafe_holds_moveright() {
    let mut rig = Rig::airborne(400.0, 0.0);
    rig.run("+rightstrafe");
    let cmd = rig.tick();
    assert_eq!(cmd.side_move, 200.0);
    assert_eq!(cmd.forward_move, 0.0);
    assert!(cmd.has(IN_MOVERIGHT));
    assert!(!cmd.has(IN_FORWARD));
}

#[test]
fn leaving_strafe_releases_synthetic_holds() {
    let mut rig = Rig::airborne(400.0, 0.0);
    rig.run("+rightstrafe");
    rig.tick();
    rig.run("-rightstrafe");
    let cmd = rig.tick();
    assert_eq!(cmd.side_move, 0.0);
    assert!(!cmd.has(IN_MOVERIGHT));
    assert!(!rig.input.buttons.get(Button::MoveRight).held);
}

#[test]
fn leaving_strafe_keeps_real_holds() {
    let mut rig = Rig::airborne(400.0, 0.0);
    rig.run("+moveright 32");
    rig.run("+rightstrafe");
    rig.tick();
    rig.run("-rightstrafe");
    let cmd = rig.tick();
    assert!(cmd.has(IN_MOVERIGHT));
    assert_eq!(cmd.side_move, 400.0);
}

#[test]
fn back_posture_hides_key_hold_until_strafe_ends() {
    // At rest the strafer picks the back posture and lets go of both sides.
    let mut rig = Rig::new();
    rig.run("+moveright 32");
    rig.run("+rightstrafe");
    let cmd = rig.tick();
    assert_eq!(cmd.side_move, 0.0);
    assert!(!cmd.has(IN_MOVERIGHT));
    assert!(rig.input.buttons.get(Button::MoveRight).held_by_input());

    rig.run("-rightstrafe");
    let cmd = rig.tick();
    let moveright = rig.input.buttons.get(Button::MoveRight);
    assert!(moveright.held, "key hold lost across the strafe");
    assert!(cmd.has(IN_MOVERIGHT));
    assert_eq!(cmd.side_move, 200.0);
    assert_eq!(cmd.forward_move, 0.0);

    assert_eq!(rig.tick().side_move, 400.0);
    rig.run("-moveright 32");
    rig.tick();
    assert!(!rig.input.buttons.get(Button::MoveRight).held);
}

#[test]
fn forward_key_comes_back_after_strafe() {
    let mut rig = Rig::airborne(400.0, 0.0);
    rig.run("+forward 17");
    rig.run("+rightstrafe");
    let cmd = rig.tick();
    assert_eq!(cmd.forward_move, 0.0);
    assert!(!cmd.has(IN_FORWARD));

    rig.run("-rightstrafe");
    let cmd = rig.tick();
    assert!(cmd.has(IN_FORWARD));
    assert_eq!(cmd.forward_move, 200.0);
}

#[test]
fn backpedal_faces_away_and_backs_up() {
    let mut rig = Rig::airborne(100.0, 0.0);
    rig.run("+forward");
    rig.run("+backpedal");
    let cmd = rig.tick();
    assert_eq!(cmd.view_angles[YAW], 180.0);
    assert_eq!(cmd.forward_move, -200.0);
}

#[test]
fn line_strafe_captures_line_on_activation() {
    let mut rig = Rig::airborne(0.0, 300.0);
    rig.body.origin = Vec3f::new(5.0, 6.0, 0.0);
    rig.run("+linestrafe");
    assert_eq!(rig.input.strafe.mode(), StrafeMode::Line);
    let line = *rig.input.strafe.line().expect("line");
    assert_eq!(line.origin.x, 5.0);
    assert!((line.dir.y - 1.0).abs() < 1e-12);

    rig.run("tas_olsshift 4");
    rig.tick();
    let line = rig.input.strafe.line().expect("line");
    // Shifting right of +Y moves the origin toward +X.
    assert!((line.origin.x - 9.0).abs() < 1e-9);
    assert!(!rig.input.overrides.line_shift.is_pending());

    rig.run("-linestrafe");
    assert!(rig.input.strafe.line().is_none());
}

#[test]
fn ducking_scales_speed_cap() {
    let mut rig = Rig::new();
    rig.body.flags = FL_DUCKING;
    rig.tick();
    assert!((rig.body.max_speed - 320.0 * DUCK_SPEED_FACTOR).abs() < 1e-3);
}

#[test]
fn flags_and_one_shots_reach_the_command() {
    let mut rig = Rig::new();
    rig.run("impulse 101");
    rig.run("cancel");
    rig.input.select_weapon(3);
    let cmd = rig.tick();
    assert_eq!(cmd.impulse, 101);
    assert_eq!(cmd.weapon_select, 3);
    assert!(cmd.has(IN_CANCEL));
    let cmd = rig.tick();
    assert_eq!(cmd.impulse, 0);
    assert_eq!(cmd.weapon_select, 0);

    rig.run("+attack");
    rig.run("-attack");
    assert!(!rig.input.cancel_pending());
}

#[test]
fn squelch_and_death_adjust_bits() {
    let mut rig = Rig::new();
    rig.run("+attack");
    rig.host.squelched = true;
    rig.host.health = 0;
    let cmd = rig.tick();
    assert!(!cmd.has(IN_ATTACK));
    assert!(cmd.has(IN_SCORE));
}

#[test]
fn dead_player_repeats_last_angles() {
    let mut rig = Rig::new();
    rig.host.view_angles = [10.0, 20.0, 0.0];
    let first = rig
        .input
        .create_move(&mut rig.host, &mut rig.body, &mut rig.config, 0.01, false);

    rig.host.alive = false;
    rig.host.view_angles = [0.0, 90.0, 0.0];
    let second = rig
        .input
        .create_move(&mut rig.host, &mut rig.body, &mut rig.config, 0.01, false);
    assert_eq!(second.view_angles, first.view_angles);
}

#[test]
fn inactive_tick_keeps_edges() {
    let mut rig = Rig::new();
    rig.input.buttons.press(Button::Jump, Source::Console);
    let cmd = rig
        .input
        .create_move(&mut rig.host, &mut rig.body, &mut rig.config, 0.01, false);
    assert!(cmd.has(IN_JUMP));
    assert_eq!(cmd.forward_move, 0.0);
    assert!(rig.input.buttons.get(Button::Jump).pressed);
}

#[test]
fn mouse_turns_view_without_auto_regime() {
    let mut rig = Rig::new();
    rig.host.mouse = (10.0, 0.0);
    let cmd = rig.tick();
    assert!((cmd.view_angles[YAW] + 0.66).abs() < 1e-4, "yaw {}", cmd.view_angles[YAW]);
}

#[test]
fn mlook_release_starts_pitch_drift_with_lookspring() {
    let mut rig = Rig::new();
    rig.config.lookspring = true;
    rig.run("+mlook");
    rig.run("-mlook");
    assert!(rig.host.pitch_drifting);
}

#[test]
fn shutdown_returns_to_neutral() {
    let mut rig = Rig::airborne(300.0, 0.0);
    rig.run("+forward 17");
    rig.run("+linestrafe");
    rig.run("tas_yaw 45");
    rig.input.shutdown();

    assert_eq!(rig.input.strafe.mode(), StrafeMode::None);
    assert!(!rig.input.buttons.get(Button::Forward).held);
    assert!(!rig.input.overrides.yaw.is_pending());
    assert_eq!(rig.tick().forward_move, 0.0);
}
