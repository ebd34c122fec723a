use super::types::{AngleMode, Regime, TurnPlan};
use crate::body::SimulatedBody;
use crate::math::MIN_SPEED;

/// Angle (degrees) between velocity and acceleration that gains the most
/// speed this tick without the projected speed along the acceleration
/// exceeding the regime cap.
pub fn angle_optimal(speed: f64, regime: &Regime) -> f64 {
    let tmp = regime.cap - regime.budget();
    if tmp <= 0.0 {
        90.0
    } else if tmp <= speed {
        (tmp / speed).acos().to_degrees()
    } else {
        0.0
    }
}

/// Largest turn angle that keeps speed unchanged from `prev_speed` (pre-friction)
/// to the next tick. Falls back to [`angle_optimal`] when no such angle exists.
pub fn angle_const_speed(prev_speed: f64, speed: f64, regime: &Regime) -> f64 {
    let tau_ma = regime.budget();
    if tau_ma <= 0.0 || speed < MIN_SPEED {
        return angle_optimal(speed, regime);
    }
    let l = regime.cap;

    if regime.grounded {
        // Friction already took `sqdiff` off the squared speed; the
        // acceleration has to give exactly that back.
        let sqdiff = prev_speed * prev_speed - speed * speed;
        let tmp = sqdiff / tau_ma;
        if tmp + tau_ma < l + l && speed + speed >= (tmp - tau_ma).abs() {
            return ((tmp - tau_ma) / (speed + speed)).acos().to_degrees();
        }
        let tmp = (l * l - sqdiff).sqrt();
        if tau_ma - l > tmp && speed >= tmp {
            return (-tmp / speed).acos().to_degrees();
        }
    } else {
        let half = tau_ma * 0.5;
        if half <= l && speed >= half {
            return (-half / speed).acos().to_degrees();
        } else if speed >= l {
            return (-l / speed).acos().to_degrees();
        }
    }

    angle_optimal(speed, regime)
}

/// Squared speed after accelerating by `mu` at angle `cos_theta` to the velocity.
#[inline]
fn composed_speed_sq(speed: f64, mu: f64, cos_theta: f64) -> f64 {
    speed * speed + mu * mu + 2.0 * speed * mu * cos_theta
}

/// Whether being airborne this tick would reach at least the speed that
/// staying on the ground would, both at their optimal angles.
pub fn is_air_accel_greater(body: &SimulatedBody) -> bool {
    let speed_air = body.horizontal_speed();
    let speed_grnd = body.friction_decayed_speed(speed_air);
    let air = Regime::air(body);
    let ground = Regime::ground(body);

    let ct_air = angle_optimal(speed_air, &air).to_radians().cos();
    let ct_grnd = angle_optimal(speed_grnd, &ground).to_radians().cos();
    let mu_air = air.budget().min(air.cap - speed_air * ct_air);
    let mu_grnd = ground.budget().min(ground.cap - speed_grnd * ct_grnd);

    composed_speed_sq(speed_air, mu_air, ct_air) >= composed_speed_sq(speed_grnd, mu_grnd, ct_grnd)
}

/// Determines the regime, the speed the acceleration will act on, and the
/// turn angle for this tick.
pub fn plan_turn(body: &SimulatedBody, mode: AngleMode) -> TurnPlan {
    let prev_velocity = body.horizontal_velocity();
    let prev_speed = prev_velocity.length();
    let (regime, velocity) = if body.on_ground() {
        (Regime::ground(body), body.predict_ground_velocity())
    } else {
        (Regime::air(body), prev_velocity)
    };
    let speed = velocity.length();

    let angle = if speed < MIN_SPEED {
        0.0
    } else {
        match mode {
            AngleMode::Optimal => angle_optimal(speed, &regime),
            AngleMode::ConstSpeed => angle_const_speed(prev_speed, speed, &regime),
        }
    };

    TurnPlan {
        angle,
        regime,
        prev_speed,
        speed,
        velocity,
    }
}
