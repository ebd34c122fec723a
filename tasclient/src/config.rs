use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strafe::{AngleMode, SimulatedBody};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown tunable '{0}'")]
    UnknownTunable(String),
}

/// Movement assists carried out by the physics side. Only their on/off state
/// lives here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistToggles {
    pub cont_jump: bool,
    pub duck_tap: bool,
    pub duck_when_jump: bool,
    pub lgagst: bool,
    pub jump_bug: bool,
    pub duck_before_collision: bool,
    pub duck_before_land: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub yaw_speed: f32,
    pub pitch_speed: f32,
    pub up_speed: f32,
    pub forward_speed: f32,
    pub back_speed: f32,
    pub side_speed: f32,
    pub move_speed_key: f32,
    pub angle_speed_key: f32,
    /// Largest upward pitch, as a positive number of degrees.
    pub pitch_up: f32,
    pub pitch_down: f32,
    pub lookspring: bool,
    pub lookstrafe: bool,
    pub sensitivity: f32,
    pub m_pitch: f32,
    pub m_yaw: f32,
    pub m_forward: f32,
    pub m_side: f32,
    pub view_smoothing: f32,
    pub angle_mode: AngleMode,
    pub duck_before_collision_ceiling: bool,
    pub assists: AssistToggles,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            yaw_speed: 210.0,
            pitch_speed: 225.0,
            up_speed: 320.0,
            forward_speed: 400.0,
            back_speed: 400.0,
            side_speed: 400.0,
            move_speed_key: 0.3,
            angle_speed_key: 0.67,
            pitch_up: 89.0,
            pitch_down: 89.0,
            lookspring: false,
            lookstrafe: false,
            sensitivity: 3.0,
            m_pitch: 0.022,
            m_yaw: 0.022,
            m_forward: 1.0,
            m_side: 0.8,
            view_smoothing: 0.05,
            angle_mode: AngleMode::Optimal,
            duck_before_collision_ceiling: false,
            assists: AssistToggles::default(),
        }
    }
}

/// Every console-settable movement variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tunable {
    YawSpeed,
    PitchSpeed,
    UpSpeed,
    ForwardSpeed,
    BackSpeed,
    SideSpeed,
    MoveSpeedKey,
    AngleSpeedKey,
    PitchUp,
    PitchDown,
    LookSpring,
    LookStrafe,
    Sensitivity,
    MPitch,
    MYaw,
    MForward,
    MSide,
    ViewSmoothing,
    MoveType,
    DuckBeforeCollisionCeiling,
    ContJump,
    DuckTap,
    DuckWhenJump,
    Lgagst,
    JumpBug,
    DuckBeforeCollision,
    DuckBeforeLand,
}

impl Tunable {
    pub const ALL: [Tunable; 27] = [
        Tunable::YawSpeed,
        Tunable::PitchSpeed,
        Tunable::UpSpeed,
        Tunable::ForwardSpeed,
        Tunable::BackSpeed,
        Tunable::SideSpeed,
        Tunable::MoveSpeedKey,
        Tunable::AngleSpeedKey,
        Tunable::PitchUp,
        Tunable::PitchDown,
        Tunable::LookSpring,
        Tunable::LookStrafe,
        Tunable::Sensitivity,
        Tunable::MPitch,
        Tunable::MYaw,
        Tunable::MForward,
        Tunable::MSide,
        Tunable::ViewSmoothing,
        Tunable::MoveType,
        Tunable::DuckBeforeCollisionCeiling,
        Tunable::ContJump,
        Tunable::DuckTap,
        Tunable::DuckWhenJump,
        Tunable::Lgagst,
        Tunable::JumpBug,
        Tunable::DuckBeforeCollision,
        Tunable::DuckBeforeLand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tunable::YawSpeed => "cl_yawspeed",
            Tunable::PitchSpeed => "cl_pitchspeed",
            Tunable::UpSpeed => "cl_upspeed",
            Tunable::ForwardSpeed => "cl_forwardspeed",
            Tunable::BackSpeed => "cl_backspeed",
            Tunable::SideSpeed => "cl_sidespeed",
            Tunable::MoveSpeedKey => "cl_movespeedkey",
            Tunable::AngleSpeedKey => "cl_anglespeedkey",
            Tunable::PitchUp => "cl_pitchup",
            Tunable::PitchDown => "cl_pitchdown",
            Tunable::LookSpring => "lookspring",
            Tunable::LookStrafe => "lookstrafe",
            Tunable::Sensitivity => "sensitivity",
            Tunable::MPitch => "m_pitch",
            Tunable::MYaw => "m_yaw",
            Tunable::MForward => "m_forward",
            Tunable::MSide => "m_side",
            Tunable::ViewSmoothing => "cl_vsmoothing",
            Tunable::MoveType => "cl_mtype",
            Tunable::DuckBeforeCollisionCeiling => "cl_db4c_ceil",
            Tunable::ContJump => "tas_cjmp",
            Tunable::DuckTap => "tas_dtap",
            Tunable::DuckWhenJump => "tas_dwj",
            Tunable::Lgagst => "tas_lgagst",
            Tunable::JumpBug => "tas_jb",
            Tunable::DuckBeforeCollision => "tas_db4c",
            Tunable::DuckBeforeLand => "tas_db4l",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Whether the host saves this variable to the user's config file.
    pub fn is_archived(self) -> bool {
        matches!(
            self,
            Tunable::LookSpring
                | Tunable::LookStrafe
                | Tunable::ForwardSpeed
                | Tunable::BackSpeed
                | Tunable::ViewSmoothing
                | Tunable::MPitch
                | Tunable::MYaw
                | Tunable::MForward
                | Tunable::MSide
        )
    }
}

#[inline]
fn flag(v: bool) -> f32 {
    if v {
        1.0
    } else {
        0.0
    }
}

impl MovementConfig {
    pub fn get(&self, tunable: Tunable) -> f32 {
        let a = &self.assists;
        match tunable {
            Tunable::YawSpeed => self.yaw_speed,
            Tunable::PitchSpeed => self.pitch_speed,
            Tunable::UpSpeed => self.up_speed,
            Tunable::ForwardSpeed => self.forward_speed,
            Tunable::BackSpeed => self.back_speed,
            Tunable::SideSpeed => self.side_speed,
            Tunable::MoveSpeedKey => self.move_speed_key,
            Tunable::AngleSpeedKey => self.angle_speed_key,
            Tunable::PitchUp => self.pitch_up,
            Tunable::PitchDown => self.pitch_down,
            Tunable::LookSpring => flag(self.lookspring),
            Tunable::LookStrafe => flag(self.lookstrafe),
            Tunable::Sensitivity => self.sensitivity,
            Tunable::MPitch => self.m_pitch,
            Tunable::MYaw => self.m_yaw,
            Tunable::MForward => self.m_forward,
            Tunable::MSide => self.m_side,
            Tunable::ViewSmoothing => self.view_smoothing,
            Tunable::MoveType => self.angle_mode.mtype(),
            Tunable::DuckBeforeCollisionCeiling => flag(self.duck_before_collision_ceiling),
            Tunable::ContJump => flag(a.cont_jump),
            Tunable::DuckTap => flag(a.duck_tap),
            Tunable::DuckWhenJump => flag(a.duck_when_jump),
            Tunable::Lgagst => flag(a.lgagst),
            Tunable::JumpBug => flag(a.jump_bug),
            Tunable::DuckBeforeCollision => flag(a.duck_before_collision),
            Tunable::DuckBeforeLand => flag(a.duck_before_land),
        }
    }

    /// Sets a tunable from its numeric console form; toggles treat any
    /// nonzero value as on.
    pub fn set(&mut self, tunable: Tunable, value: f32) {
        let on = value != 0.0;
        let a = &mut self.assists;
        match tunable {
            Tunable::YawSpeed => self.yaw_speed = value,
            Tunable::PitchSpeed => self.pitch_speed = value,
            Tunable::UpSpeed => self.up_speed = value,
            Tunable::ForwardSpeed => self.forward_speed = value,
            Tunable::BackSpeed => self.back_speed = value,
            Tunable::SideSpeed => self.side_speed = value,
            Tunable::MoveSpeedKey => self.move_speed_key = value,
            Tunable::AngleSpeedKey => self.angle_speed_key = value,
            Tunable::PitchUp => self.pitch_up = value,
            Tunable::PitchDown => self.pitch_down = value,
            Tunable::LookSpring => self.lookspring = on,
            Tunable::LookStrafe => self.lookstrafe = on,
            Tunable::Sensitivity => self.sensitivity = value,
            Tunable::MPitch => self.m_pitch = value,
            Tunable::MYaw => self.m_yaw = value,
            Tunable::MForward => self.m_forward = value,
            Tunable::MSide => self.m_side = value,
            Tunable::ViewSmoothing => self.view_smoothing = value,
            Tunable::MoveType => self.angle_mode = AngleMode::from_mtype(value),
            Tunable::DuckBeforeCollisionCeiling => self.duck_before_collision_ceiling = on,
            Tunable::ContJump => a.cont_jump = on,
            Tunable::DuckTap => a.duck_tap = on,
            Tunable::DuckWhenJump => a.duck_when_jump = on,
            Tunable::Lgagst => a.lgagst = on,
            Tunable::JumpBug => a.jump_bug = on,
            Tunable::DuckBeforeCollision => a.duck_before_collision = on,
            Tunable::DuckBeforeLand => a.duck_before_land = on,
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<f32, ConfigError> {
        let tunable =
            Tunable::from_name(name).ok_or_else(|| ConfigError::UnknownTunable(name.to_string()))?;
        Ok(self.get(tunable))
    }

    pub fn set_by_name(&mut self, name: &str, value: f32) -> Result<(), ConfigError> {
        let tunable =
            Tunable::from_name(name).ok_or_else(|| ConfigError::UnknownTunable(name.to_string()))?;
        self.set(tunable, value);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seconds per simulated tick.
    pub frame_time: f32,
    /// Ticks to run past the end of the script.
    pub max_ticks: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frame_time: 0.01,
            max_ticks: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub movement: MovementConfig,
    /// Initial body state.
    pub body: SimulatedBody,
    pub run: RunConfig,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
