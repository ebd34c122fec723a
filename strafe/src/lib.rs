//! Movement-angle optimizer for tool-assisted strafing.
//!
//! This crate is pure arithmetic over a snapshot of the simulated player body.
//! It never touches buttons or console state: it returns decisions (a yaw and a
//! posture) that the input side turns into held buttons.

mod math;
pub use math::{anglemod, heading_deg, horizontal, unit_from_yaw, DVec2, Vec3f, ANGLE_UNIT, MIN_SPEED};

pub mod body;
pub use body::{MoveVars, SimulatedBody, AIR_SPEED_CAP, DUCK_SPEED_FACTOR, FL_DUCKING, FL_ONGROUND};

pub mod optimizer;
pub use optimizer::{
    angle_const_speed, angle_optimal, backpedal_yaw, choose_lean, is_air_accel_greater, linestrafe,
    plan_turn, projected_speed, sidestrafe, AngleMode, Lean, Posture, Regime, StrafeDecision,
    StrafeLine, StrafeMode, TurnPlan,
};
