use strafe::{
    angle_const_speed, angle_optimal, is_air_accel_greater, plan_turn, projected_speed, AngleMode,
    Regime, SimulatedBody, Vec3f,
};

fn grounded(vx: f32, vy: f32) -> SimulatedBody {
    SimulatedBody {
        velocity: Vec3f::new(vx, vy, 0.0),
        ground_entity: Some(0),
        ..Default::default()
    }
}

fn airborne(vx: f32, vy: f32) -> SimulatedBody {
    SimulatedBody {
        velocity: Vec3f::new(vx, vy, 0.0),
        ..Default::default()
    }
}

#[test]
fn slow_ground_speed_accelerates_straight_ahead() {
    // 230 ups decays to 220.8; cap minus budget (288) is above that.
    let plan = plan_turn(&grounded(230.0, 0.0), AngleMode::Optimal);
    assert!((plan.speed - 220.8).abs() < 1e-3, "speed {}", plan.speed);
    assert_eq!(plan.angle, 0.0);
}

#[test]
fn optimal_angle_matches_closed_form() {
    let regime = Regime {
        cap: 320.0,
        accel: 10.0,
        frame_time: 0.02,
        max_speed: 320.0,
        grounded: true,
    };
    // cap - budget = 256; acos(256 / 320) = 36.87°
    let theta = angle_optimal(320.0, &regime);
    assert!((theta - 36.8699).abs() < 1e-3, "theta {}", theta);
}

#[test]
fn air_budget_above_cap_gives_right_angle() {
    let plan = plan_turn(&airborne(500.0, 0.0), AngleMode::Optimal);
    assert!(!plan.regime.grounded);
    assert_eq!(plan.angle, 90.0);
}

#[test]
fn optimal_angle_is_bounded_and_grows_with_speed() {
    let regime = Regime::ground(&grounded(0.0, 0.0));
    let mut last = 0.0;
    for step in 0..200 {
        let speed = step as f64 * 10.0;
        let theta = angle_optimal(speed, &regime);
        assert!((0.0..=90.0).contains(&theta), "theta {} at {}", theta, speed);
        assert!(theta >= last, "angle shrank at speed {}", speed);
        last = theta;
    }
}

fn ground_regime(accel: f64, frame_time: f64) -> Regime {
    Regime {
        cap: 320.0,
        accel,
        frame_time,
        max_speed: 320.0,
        grounded: true,
    }
}

#[test]
fn optimal_angle_grows_with_acceleration() {
    let speed = 300.0;
    let mut last = 0.0;
    for step in 0..=80 {
        let accel = step as f64 * 0.25;
        let theta = angle_optimal(speed, &ground_regime(accel, 0.01));
        assert!((0.0..=90.0).contains(&theta), "theta {} at accel {}", theta, accel);
        assert!(theta >= last, "angle shrank at accel {}", accel);
        last = theta;
    }
    assert!(last > 0.0);
}

#[test]
fn optimal_angle_grows_with_frame_time() {
    let speed = 300.0;
    let mut last = 0.0;
    for step in 1..=100 {
        let frame_time = step as f64 * 0.001;
        let theta = angle_optimal(speed, &ground_regime(10.0, frame_time));
        assert!(theta >= last, "angle shrank at frame time {}", frame_time);
        last = theta;
    }
    // 0.1 s * 320 * 10 uses the whole cap.
    assert_eq!(last, 90.0);
}

#[test]
fn budget_over_cap_gives_right_angle_even_when_slow() {
    let regime = Regime::air(&airborne(0.0, 0.0));
    assert!(regime.budget() > regime.cap);
    assert_eq!(angle_optimal(5.0, &regime), 90.0);
    assert_eq!(angle_optimal(0.5, &regime), 90.0);
}

#[test]
fn near_zero_speed_plans_no_turn() {
    for mode in [AngleMode::Optimal, AngleMode::ConstSpeed] {
        let plan = plan_turn(&airborne(0.05, 0.0), mode);
        assert_eq!(plan.angle, 0.0);
    }
}

#[test]
fn const_speed_in_air_keeps_speed() {
    let body = airborne(400.0, 0.0);
    let plan = plan_turn(&body, AngleMode::ConstSpeed);
    let expected = (-16.0f64 / 400.0).acos().to_degrees();
    assert!((plan.angle - expected).abs() < 1e-9, "angle {}", plan.angle);

    let after = projected_speed(&plan, plan.angle);
    assert!((after - 400.0).abs() < 1e-3, "speed after {}", after);
}

#[test]
fn const_speed_on_ground_recovers_friction_loss() {
    // 400 decays to 384; accelerating at acos(360/768) brings it back to 400.
    let body = grounded(400.0, 0.0);
    let plan = plan_turn(&body, AngleMode::ConstSpeed);
    assert!((plan.prev_speed - 400.0).abs() < 1e-6);
    assert!((plan.speed - 384.0).abs() < 1e-3);

    let after = projected_speed(&plan, plan.angle);
    assert!((after - 400.0).abs() < 1e-2, "speed after {}", after);
}

#[test]
fn const_speed_without_budget_falls_back_to_optimal() {
    let regime = Regime {
        cap: 30.0,
        accel: 0.0,
        frame_time: 0.01,
        max_speed: 320.0,
        grounded: false,
    };
    assert_eq!(
        angle_const_speed(400.0, 400.0, &regime),
        angle_optimal(400.0, &regime)
    );
}

#[test]
fn standing_still_prefers_ground() {
    assert!(!is_air_accel_greater(&grounded(0.0, 0.0)));
}

#[test]
fn very_fast_body_prefers_air_at_default_and_doubled_accel() {
    let mut body = grounded(1000.0, 0.0);
    assert!(is_air_accel_greater(&body));

    body.movevars.accelerate *= 2.0;
    body.movevars.air_accelerate *= 2.0;
    assert!(is_air_accel_greater(&body));
}

#[test]
fn air_preference_can_flip_when_both_accelerations_scale() {
    // The comparison is not invariant under scaling both coefficients: at
    // 675 ups air wins with 10/10 and ground wins with 20/20.
    let mut body = grounded(675.0, 0.0);
    assert!(is_air_accel_greater(&body));

    body.movevars.accelerate = 20.0;
    body.movevars.air_accelerate = 20.0;
    assert!(!is_air_accel_greater(&body));
}
