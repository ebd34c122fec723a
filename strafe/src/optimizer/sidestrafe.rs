use super::types::{AngleMode, Lean, Posture, StrafeDecision, TurnPlan};
use crate::math::{anglemod, heading_deg, unit_from_yaw, DVec2, ANGLE_UNIT, MIN_SPEED};

/// Chooses the posture approximating `plan.angle` on the `lean` side and the
/// view yaw that points that posture's acceleration where the plan wants it.
///
/// In optimal mode the yaw is one of the two encodable angles bracketing the
/// exact target, whichever gives more speed once the host has quantized it.
pub fn sidestrafe(plan: &TurnPlan, view_yaw: f64, lean: Lean, mode: AngleMode) -> StrafeDecision {
    let posture = Posture::from_angle(plan.angle);
    let dir = lean.sign();
    let base = if plan.speed > MIN_SPEED {
        heading_deg(plan.velocity)
    } else {
        view_yaw
    };
    let beta = base + dir * (posture.angle() - plan.angle);

    let yaw = match mode {
        AngleMode::ConstSpeed => beta,
        AngleMode::Optimal => {
            let candidates = [beta, beta + ANGLE_UNIT.copysign(beta)];
            let speeds = candidates
                .map(|alpha| projected_speed(plan, anglemod(alpha) - posture.angle() * dir));
            if speeds[0] > speeds[1] {
                candidates[0]
            } else {
                candidates[1]
            }
        }
    };

    StrafeDecision { yaw, posture, lean }
}

/// Horizontal speed after one tick of acceleration toward `accel_yaw` (degrees).
pub fn projected_speed(plan: &TurnPlan, accel_yaw: f64) -> f64 {
    let a = unit_from_yaw(accel_yaw);
    let gamma = plan.regime.cap - plan.velocity.dot(a);
    if gamma < 0.0 {
        return plan.speed;
    }
    let mu = plan.regime.budget().min(gamma);
    (plan.velocity + a * mu).length()
}

/// Yaw facing directly away from `velocity`, nudged by one angle unit when the
/// exact value sits more than half a unit past a unit boundary.
pub fn backpedal_yaw(velocity: DVec2) -> f64 {
    let mut yaw = heading_deg(velocity) + 180.0;
    if yaw > 180.0 {
        yaw -= 360.0;
    }
    let units = yaw / ANGLE_UNIT;
    let frac = units - units.trunc();
    if frac > 0.5 {
        yaw += ANGLE_UNIT;
    } else if frac < -0.5 {
        yaw -= ANGLE_UNIT;
    }
    yaw
}
