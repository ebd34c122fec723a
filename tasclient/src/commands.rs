//! Console command surface.

use strafe::StrafeMode;
use thiserror::Error;

use crate::buttons::{Button, Source};
use crate::config::Tunable;

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(String),
    #[error("'{command}': bad argument '{value}'")]
    BadArgument { command: String, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `+/-linestrafe`, `+/-backpedal`, `+/-leftstrafe`, `+/-rightstrafe`.
    Strafe { mode: StrafeMode, active: bool },
    /// `+/-<button> [keycode]`.
    Button {
        button: Button,
        down: bool,
        source: Source,
    },
    SetYaw(f64),
    SetPitch(f64),
    LineShift(f64),
    Set { tunable: Tunable, value: f32 },
    Impulse(u8),
    Cancel,
    /// Tick boundary.
    Wait,
    Exec(String),
}

fn strafe_mode(name: &str) -> Option<StrafeMode> {
    match name {
        "linestrafe" => Some(StrafeMode::Line),
        "backpedal" => Some(StrafeMode::Backpedal),
        "leftstrafe" => Some(StrafeMode::Left),
        "rightstrafe" => Some(StrafeMode::Right),
        _ => None,
    }
}

fn number<T: std::str::FromStr>(command: &str, arg: Option<&str>) -> Result<T, CommandError> {
    let value = arg.ok_or_else(|| CommandError::MissingArgument(command.to_string()))?;
    value.parse().map_err(|_| CommandError::BadArgument {
        command: command.to_string(),
        value: value.to_string(),
    })
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next().ok_or(CommandError::Empty)?;
        let arg = tokens.next();

        if let Some((down, name)) = head
            .strip_prefix('+')
            .map(|n| (true, n))
            .or_else(|| head.strip_prefix('-').map(|n| (false, n)))
        {
            if let Some(mode) = strafe_mode(name) {
                return Ok(Command::Strafe { mode, active: down });
            }
            let button =
                Button::from_name(name).ok_or_else(|| CommandError::Unknown(head.to_string()))?;
            let source = match arg {
                Some(_) => Source::Key(number(head, arg)?),
                None => Source::Console,
            };
            return Ok(Command::Button {
                button,
                down,
                source,
            });
        }

        match head {
            "tas_yaw" => Ok(Command::SetYaw(number(head, arg)?)),
            "tas_pitch" => Ok(Command::SetPitch(number(head, arg)?)),
            "tas_olsshift" => Ok(Command::LineShift(number(head, arg)?)),
            "impulse" => Ok(Command::Impulse(number(head, arg)?)),
            "cancel" => Ok(Command::Cancel),
            "wait" => Ok(Command::Wait),
            "exec" => {
                let file = arg.ok_or_else(|| CommandError::MissingArgument(head.to_string()))?;
                Ok(Command::Exec(file.to_string()))
            }
            "set" => {
                let name = arg.ok_or_else(|| CommandError::MissingArgument(head.to_string()))?;
                let tunable =
                    Tunable::from_name(name).ok_or_else(|| CommandError::Unknown(name.to_string()))?;
                let value = number(name, tokens.next())?;
                Ok(Command::Set { tunable, value })
            }
            _ => {
                let tunable =
                    Tunable::from_name(head).ok_or_else(|| CommandError::Unknown(head.to_string()))?;
                Ok(Command::Set {
                    tunable,
                    value: number(head, arg)?,
                })
            }
        }
    }
}
