//! Read access to the simulated player body.
//!
//! The host's movement simulator owns collision, ducking and jumping. This
//! module only mirrors the body state it publishes and the handful of
//! formulas the optimizer has to predict: ground friction, and a
//! collision-free accelerate step used when no host is attached.

use serde::{Deserialize, Serialize};

use crate::math::{anglemod, horizontal, DVec2, Vec3f, MIN_SPEED};

/// Host flag bit set while the body touches the ground.
pub const FL_ONGROUND: u32 = 1 << 9;
/// Host flag bit set while the body is fully ducked.
pub const FL_DUCKING: u32 = 1 << 14;

/// Wish-speed cap applied to air acceleration, independent of the body's own cap.
pub const AIR_SPEED_CAP: f64 = 30.0;
/// Speed cap multiplier while ducked.
pub const DUCK_SPEED_FACTOR: f32 = 0.333;

/// Server-wide movement coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveVars {
    pub accelerate: f32,
    pub air_accelerate: f32,
    pub friction: f32,
    pub stop_speed: f32,
}

impl Default for MoveVars {
    fn default() -> Self {
        Self {
            accelerate: 10.0,
            air_accelerate: 10.0,
            friction: 4.0,
            stop_speed: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedBody {
    pub origin: Vec3f,
    pub velocity: Vec3f,
    pub base_velocity: Vec3f,
    pub flags: u32,
    /// Entity the body stands on; `None` while airborne.
    pub ground_entity: Option<i32>,
    /// Duration of the current tick in seconds.
    pub frame_time: f32,
    /// Speed cap for the current tick (already reduced while ducked).
    pub max_speed: f32,
    /// Unducked speed cap the per-tick cap is derived from.
    pub client_max_speed: f32,
    /// Surface friction multiplier, 1 on ordinary ground.
    pub friction: f32,
    pub gravity: f32,
    pub water_level: u8,
    pub in_duck: bool,
    pub movevars: MoveVars,
}

impl Default for SimulatedBody {
    fn default() -> Self {
        Self {
            origin: Vec3f::ZERO,
            velocity: Vec3f::ZERO,
            base_velocity: Vec3f::ZERO,
            flags: 0,
            ground_entity: None,
            frame_time: 0.01,
            max_speed: 320.0,
            client_max_speed: 320.0,
            friction: 1.0,
            gravity: 1.0,
            water_level: 0,
            in_duck: false,
            movevars: MoveVars::default(),
        }
    }
}

impl SimulatedBody {
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.ground_entity.is_some()
    }

    #[inline]
    pub fn is_ducking(&self) -> bool {
        self.flags & FL_DUCKING != 0
    }

    #[inline]
    pub fn horizontal_velocity(&self) -> DVec2 {
        horizontal(self.velocity)
    }

    #[inline]
    pub fn horizontal_speed(&self) -> f64 {
        self.horizontal_velocity().length()
    }

    /// Sets the tick duration and derives this tick's speed cap.
    pub fn begin_tick(&mut self, frame_time: f32) {
        self.frame_time = frame_time;
        self.max_speed = if self.is_ducking() {
            self.client_max_speed * DUCK_SPEED_FACTOR
        } else {
            self.client_max_speed
        };
    }

    /// Speed one tick of acceleration with coefficient `accel` can add at most.
    #[inline]
    pub fn accel_budget(&self, accel: f64) -> f64 {
        self.frame_time as f64 * self.max_speed as f64 * accel
    }

    /// One step of the host's ground friction. Edge friction needs a trace and
    /// is left to the host.
    pub fn apply_friction(&mut self) {
        let speed = self.velocity.length();
        if (speed as f64) < MIN_SPEED {
            return;
        }
        let friction = self.movevars.friction * self.friction;
        let control = speed.max(self.movevars.stop_speed);
        let drop = control * friction * self.frame_time;
        let new_speed = (speed - drop).max(0.0);
        self.velocity *= new_speed / speed;
    }

    /// Horizontal velocity after the vertical component is zeroed and one
    /// friction step is applied, as happens before ground acceleration.
    pub fn predict_ground_velocity(&self) -> DVec2 {
        let mut next = self.clone();
        next.velocity.z = 0.0;
        next.apply_friction();
        next.horizontal_velocity()
    }

    /// Closed form of the friction step applied to a horizontal speed.
    pub fn friction_decayed_speed(&self, speed: f64) -> f64 {
        if speed < MIN_SPEED {
            return speed;
        }
        let mv = &self.movevars;
        let control = (mv.stop_speed as f64 / speed).max(1.0);
        let decay = control * self.friction as f64 * mv.friction as f64 * self.frame_time as f64;
        speed * (1.0 - decay).max(0.0)
    }

    /// Runs one tick of the host's walk/air move without collision: friction,
    /// accelerate toward the commanded direction, integrate position.
    pub fn advance(&mut self, forward_move: f32, side_move: f32, yaw: f64) {
        if self.frame_time <= 0.0 {
            return;
        }

        let (sy, cy) = anglemod(yaw).to_radians().sin_cos();
        let forward = DVec2::new(cy, sy);
        let right = DVec2::new(sy, -cy);
        let wish = forward * forward_move as f64 + right * side_move as f64;
        let wish_dir = wish.normalize_or_zero();
        let wish_speed = wish.length().min(self.max_speed as f64);

        if self.on_ground() {
            self.velocity.z = 0.0;
            self.apply_friction();
            let accel = self.movevars.accelerate as f64;
            self.accelerate(wish_dir, wish_speed, wish_speed, accel);
        } else {
            let accel = self.movevars.air_accelerate as f64;
            self.accelerate(wish_dir, wish_speed.min(AIR_SPEED_CAP), wish_speed, accel);
        }

        self.origin += self.velocity * self.frame_time;
    }

    fn accelerate(&mut self, wish_dir: DVec2, cap: f64, wish_speed: f64, accel: f64) {
        let add = cap - self.horizontal_velocity().dot(wish_dir);
        if add <= 0.0 {
            return;
        }
        let accel_speed =
            (accel * wish_speed * self.frame_time as f64 * self.friction as f64).min(add);
        self.velocity.x += (wish_dir.x * accel_speed) as f32;
        self.velocity.y += (wish_dir.y * accel_speed) as f32;
    }
}
