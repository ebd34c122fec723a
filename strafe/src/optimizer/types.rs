use serde::{Deserialize, Serialize};

use crate::body::{SimulatedBody, AIR_SPEED_CAP};
use crate::math::DVec2;

/// Auto-turn regime. Exactly one is active; `None` leaves the view to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrafeMode {
    #[default]
    None,
    Left,
    Right,
    Line,
    Backpedal,
}

impl StrafeMode {
    #[inline]
    pub fn is_auto(self) -> bool {
        self != StrafeMode::None
    }
}

/// How the turn angle is chosen each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// Maximize speed gained this tick.
    #[default]
    Optimal,
    /// Turn as hard as possible without losing speed.
    ConstSpeed,
}

impl AngleMode {
    /// Maps the host's numeric movement-type setting (2 = constant speed).
    pub fn from_mtype(value: f32) -> Self {
        if value == 2.0 {
            AngleMode::ConstSpeed
        } else {
            AngleMode::Optimal
        }
    }

    pub fn mtype(self) -> f32 {
        match self {
            AngleMode::Optimal => 1.0,
            AngleMode::ConstSpeed => 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lean {
    Left,
    Right,
}

impl Lean {
    /// +1 turns clockwise (right), -1 counter-clockwise.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Lean::Right => 1.0,
            Lean::Left => -1.0,
        }
    }
}

/// Discrete directional-button combination approximating a turn angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posture {
    /// Back only (with the back speed sign flipped): accelerate along the view.
    Back,
    /// Back plus the lean-side strafe key: accelerate 45° off the view.
    Diagonal,
    /// Lean-side strafe key only: accelerate 90° off the view.
    Strafe,
}

impl Posture {
    pub fn from_angle(theta: f64) -> Self {
        if theta >= 67.5 {
            Posture::Strafe
        } else if theta > 22.5 {
            Posture::Diagonal
        } else {
            Posture::Back
        }
    }

    /// Angle between the view and the acceleration this posture produces.
    pub fn angle(self) -> f64 {
        match self {
            Posture::Back => 0.0,
            Posture::Diagonal => 45.0,
            Posture::Strafe => 90.0,
        }
    }
}

/// Speed cap and acceleration coefficient of the regime the body is in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regime {
    /// Wish-speed cap `L`.
    pub cap: f64,
    /// Acceleration coefficient `A`.
    pub accel: f64,
    pub frame_time: f64,
    /// Body speed cap; scales the acceleration budget in both regimes.
    pub max_speed: f64,
    pub grounded: bool,
}

impl Regime {
    pub fn ground(body: &SimulatedBody) -> Self {
        Self {
            cap: body.max_speed as f64,
            accel: body.movevars.accelerate as f64,
            frame_time: body.frame_time as f64,
            max_speed: body.max_speed as f64,
            grounded: true,
        }
    }

    pub fn air(body: &SimulatedBody) -> Self {
        Self {
            cap: AIR_SPEED_CAP,
            accel: body.movevars.air_accelerate as f64,
            frame_time: body.frame_time as f64,
            max_speed: body.max_speed as f64,
            grounded: false,
        }
    }

    /// `frame_time * max_speed * accel`: speed one tick can add at most.
    #[inline]
    pub fn budget(&self) -> f64 {
        self.frame_time * self.max_speed * self.accel
    }
}

/// Result of the angle search for one tick, consumed by the strafers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnPlan {
    /// Angle between velocity and acceleration, degrees.
    pub angle: f64,
    pub regime: Regime,
    /// Horizontal speed before friction.
    pub prev_speed: f64,
    /// Horizontal speed the acceleration acts on (after friction when grounded).
    pub speed: f64,
    /// Horizontal velocity the acceleration acts on.
    pub velocity: DVec2,
}

/// What the input side must realize this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrafeDecision {
    /// View yaw in degrees, not yet wrapped.
    pub yaw: f64,
    pub posture: Posture,
    pub lean: Lean,
}
