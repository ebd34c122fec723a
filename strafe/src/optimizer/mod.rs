mod types;
mod angles;
mod sidestrafe;
mod line;

pub use types::{AngleMode, Lean, Posture, Regime, StrafeDecision, StrafeMode, TurnPlan};
pub use angles::{angle_const_speed, angle_optimal, is_air_accel_greater, plan_turn};
pub use sidestrafe::{backpedal_yaw, projected_speed, sidestrafe};
pub use line::{choose_lean, linestrafe, StrafeLine};
