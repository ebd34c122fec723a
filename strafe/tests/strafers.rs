use strafe::{
    anglemod, backpedal_yaw, choose_lean, linestrafe, plan_turn, projected_speed, sidestrafe,
    AngleMode, DVec2, Lean, Posture, SimulatedBody, StrafeLine, Vec3f, ANGLE_UNIT,
};

fn airborne(vx: f32, vy: f32) -> SimulatedBody {
    SimulatedBody {
        velocity: Vec3f::new(vx, vy, 0.0),
        ..Default::default()
    }
}

#[test]
fn posture_thresholds() {
    assert_eq!(Posture::from_angle(90.0), Posture::Strafe);
    assert_eq!(Posture::from_angle(67.5), Posture::Strafe);
    assert_eq!(Posture::from_angle(67.4), Posture::Diagonal);
    assert_eq!(Posture::from_angle(22.6), Posture::Diagonal);
    assert_eq!(Posture::from_angle(22.5), Posture::Back);
    assert_eq!(Posture::from_angle(0.0), Posture::Back);
}

#[test]
fn right_strafe_turns_view_back_by_excess_angle() {
    // Strafe posture: the view turns back from the velocity heading by the
    // amount the planned angle exceeds 90°.
    let body = airborne(0.0, 400.0);
    let plan = plan_turn(&body, AngleMode::ConstSpeed);
    let decision = sidestrafe(&plan, 0.0, Lean::Right, AngleMode::ConstSpeed);
    assert_eq!(decision.posture, Posture::Strafe);
    assert_eq!(decision.lean, Lean::Right);

    let expected = 90.0 + (90.0 - plan.angle);
    assert!((decision.yaw - expected).abs() < 1e-9, "yaw {}", decision.yaw);
}

#[test]
fn optimal_yaw_picks_the_faster_bracketing_unit() {
    let mut picked_exact = 0;
    let mut picked_next = 0;
    for (vx, vy) in [(400.0, 0.0), (300.0, 300.0), (250.0, 137.0), (-200.0, 350.0)] {
        let plan = plan_turn(&airborne(vx, vy), AngleMode::Optimal);
        for lean in [Lean::Left, Lean::Right] {
            let exact = sidestrafe(&plan, 0.0, lean, AngleMode::ConstSpeed).yaw;
            let next = exact + ANGLE_UNIT.copysign(exact);
            let decision = sidestrafe(&plan, 0.0, lean, AngleMode::Optimal);
            let chosen = decision.yaw;
            let other = if chosen == exact {
                picked_exact += 1;
                next
            } else {
                assert_eq!(chosen, next, "chose {} from {} / {}", chosen, exact, next);
                picked_next += 1;
                exact
            };

            let offset = decision.posture.angle() * lean.sign();
            let gained = projected_speed(&plan, anglemod(chosen) - offset);
            let skipped = projected_speed(&plan, anglemod(other) - offset);
            assert!(
                gained >= skipped,
                "({}, {}) {:?}: kept {} over {}",
                vx,
                vy,
                lean,
                gained,
                skipped
            );
        }
    }
    assert!(picked_exact > 0, "never kept the truncated unit");
    assert!(picked_next > 0, "never stepped to the next unit");
}

#[test]
fn sidestrafe_from_standstill_uses_view_yaw() {
    let plan = plan_turn(&airborne(0.0, 0.0), AngleMode::Optimal);
    let decision = sidestrafe(&plan, 45.0, Lean::Left, AngleMode::ConstSpeed);
    assert_eq!(decision.posture, Posture::Back);
    assert_eq!(decision.yaw, 45.0);
}

#[test]
fn line_tie_leans_right() {
    let body = airborne(100.0, 0.0);
    let plan = plan_turn(&body, AngleMode::Optimal);
    let line = StrafeLine {
        origin: DVec2::ZERO,
        dir: DVec2::X,
    };
    assert_eq!(choose_lean(&line, &plan, DVec2::ZERO), Lean::Right);
}

#[test]
fn line_to_the_left_leans_left() {
    let body = airborne(100.0, 0.0);
    let plan = plan_turn(&body, AngleMode::Optimal);
    let mut line = StrafeLine {
        origin: DVec2::ZERO,
        dir: DVec2::X,
    };
    line.shift(-5.0);
    assert!((line.origin.y - 5.0).abs() < 1e-12);
    assert_eq!(choose_lean(&line, &plan, DVec2::ZERO), Lean::Left);
}

#[test]
fn linestrafe_applies_pending_shift_once() {
    let body = airborne(100.0, 0.0);
    let plan = plan_turn(&body, AngleMode::Optimal);
    let mut line = StrafeLine::capture(&body, 0.0);
    assert_eq!(line.dir, DVec2::X);

    let decision = linestrafe(&mut line, &plan, DVec2::ZERO, 0.0, Some(10.0), AngleMode::Optimal);
    assert!((line.origin.y + 10.0).abs() < 1e-12);
    assert_eq!(decision.lean, Lean::Right);
}

#[test]
fn line_capture_at_rest_uses_view() {
    let line = StrafeLine::capture(&airborne(0.0, 0.0), 90.0);
    assert!(line.dir.x.abs() < 1e-12);
    assert!((line.dir.y - 1.0).abs() < 1e-12);
}

#[test]
fn backpedal_faces_away_from_velocity() {
    assert_eq!(backpedal_yaw(DVec2::new(100.0, 0.0)), 180.0);
    assert_eq!(backpedal_yaw(DVec2::new(0.0, 100.0)), -90.0);
}

#[test]
fn anglemod_wraps_into_one_turn() {
    assert_eq!(anglemod(-90.0), 270.0);
    assert_eq!(anglemod(360.0), 0.0);
    assert_eq!(anglemod(ANGLE_UNIT * 1.5), ANGLE_UNIT);
}
