use super::sidestrafe::sidestrafe;
use super::types::{AngleMode, Lean, StrafeDecision, TurnPlan};
use crate::body::SimulatedBody;
use crate::math::{unit_from_yaw, DVec2, MIN_SPEED};

/// Line the line strafer keeps the body close to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrafeLine {
    pub origin: DVec2,
    /// Unit direction.
    pub dir: DVec2,
}

impl StrafeLine {
    /// Line through the body's position along its velocity, or along the
    /// view when the body is (nearly) standing still.
    pub fn capture(body: &SimulatedBody, view_yaw: f64) -> Self {
        let origin = DVec2::new(body.origin.x as f64, body.origin.y as f64);
        let velocity = body.horizontal_velocity();
        let speed = velocity.length();
        let dir = if speed > MIN_SPEED {
            velocity / speed
        } else {
            unit_from_yaw(view_yaw)
        };
        Self { origin, dir }
    }

    pub fn set_direction_yaw(&mut self, yaw: f64) {
        self.dir = unit_from_yaw(yaw);
    }

    /// Moves the line sideways; positive amounts move it to the right of `dir`.
    pub fn shift(&mut self, amount: f64) {
        self.origin.x += amount * self.dir.y;
        self.origin.y -= amount * self.dir.x;
    }

    pub fn distance_to(&self, p: DVec2) -> f64 {
        let d = self.origin - p;
        let along = self.dir.dot(d);
        (d - self.dir * along).length()
    }
}

/// Lean whose predicted next position ends up closer to the line. Equal
/// distances lean right.
pub fn choose_lean(line: &StrafeLine, plan: &TurnPlan, origin: DVec2) -> Lean {
    let (st, ct) = plan.angle.to_radians().sin_cos();
    let gamma = plan.regime.cap - plan.speed * ct;
    let mu = if gamma < 0.0 || plan.speed < MIN_SPEED {
        0.0
    } else {
        plan.regime.budget().min(gamma) / plan.speed
    };

    let v = plan.velocity;
    let t = plan.regime.frame_time;
    let right_accel = DVec2::new(v.x * ct + v.y * st, -v.x * st + v.y * ct) * mu;
    let left_accel = DVec2::new(v.x * ct - v.y * st, v.x * st + v.y * ct) * mu;
    let right = origin + (v + right_accel) * t;
    let left = origin + (v + left_accel) * t;

    if line.distance_to(right) <= line.distance_to(left) {
        Lean::Right
    } else {
        Lean::Left
    }
}

/// Strafes on whichever side keeps the body closer to `line`. A pending
/// sideways `shift` is applied to the line first.
pub fn linestrafe(
    line: &mut StrafeLine,
    plan: &TurnPlan,
    origin: DVec2,
    view_yaw: f64,
    shift: Option<f64>,
    mode: AngleMode,
) -> StrafeDecision {
    if plan.speed < MIN_SPEED {
        return sidestrafe(plan, view_yaw, Lean::Right, mode);
    }
    if let Some(amount) = shift {
        line.shift(amount);
    }
    let lean = choose_lean(line, plan, origin);
    sidestrafe(plan, view_yaw, lean, mode)
}
