//! Input side of the strafe tool: button tracking, console commands,
//! configuration and the per-tick movement command.

pub mod args;
pub mod buttons;
pub mod commands;
pub mod config;
pub mod controller;
pub mod frame;
pub mod look;
pub mod network;
pub mod overrides;
pub mod realizer;
pub mod runner;
pub mod script;

pub use args::Args;
pub use buttons::{Button, ButtonState, ButtonTable, PressOutcome, Source};
pub use commands::{Command, CommandError};
pub use config::{load_config, AssistToggles, Config, ConfigError, MovementConfig, RunConfig, Tunable};
pub use frame::{Host, HostState, TasInput};
pub use runner::{RunSummary, Runner};
pub use script::{preprocess, ScriptError};
