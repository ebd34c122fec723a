use protocol::MoveCommand;
use strafe::{SimulatedBody, Vec3f};
use tracing::{debug, info};

use crate::commands::{Command, CommandError};
use crate::config::{Config, MovementConfig};
use crate::frame::{HostState, TasInput, YAW};

/// Drives a command stream against the collision-free body: every `wait`
/// builds one movement command and advances the body by one tick.
#[derive(Debug, Clone)]
pub struct Runner {
    pub input: TasInput,
    pub host: HostState,
    pub body: SimulatedBody,
    pub config: MovementConfig,
    frame_time: f32,
    ticks: u64,
    peak_speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub final_speed: f64,
    pub peak_speed: f64,
    pub origin: Vec3f,
}

impl Runner {
    pub fn new(cfg: Config) -> Self {
        let peak_speed = cfg.body.horizontal_speed();
        Self {
            input: TasInput::new(),
            host: HostState::default(),
            body: cfg.body,
            config: cfg.movement,
            frame_time: cfg.run.frame_time,
            ticks: 0,
            peak_speed,
        }
    }

    /// Runs one console line; returns the command built if it was a `wait`.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<MoveCommand>, CommandError> {
        let command = Command::parse(line)?;
        match &command {
            Command::Wait => return Ok(Some(self.tick())),
            Command::Exec(file) => debug!(%file, "exec skipped"),
            _ => self
                .input
                .execute(&command, &mut self.host, &self.body, &mut self.config),
        }
        Ok(None)
    }

    pub fn run_script<S: AsRef<str>>(
        &mut self,
        lines: &[S],
    ) -> Result<Vec<MoveCommand>, CommandError> {
        let mut emitted = Vec::new();
        for line in lines {
            if let Some(cmd) = self.execute_line(line.as_ref())? {
                emitted.push(cmd);
            }
        }
        Ok(emitted)
    }

    pub fn run_ticks(&mut self, n: u32) -> Vec<MoveCommand> {
        (0..n).map(|_| self.tick()).collect()
    }

    pub fn tick(&mut self) -> MoveCommand {
        let cmd = self.input.create_move(
            &mut self.host,
            &mut self.body,
            &mut self.config,
            self.frame_time,
            true,
        );
        self.body
            .advance(cmd.forward_move, cmd.side_move, cmd.view_angles[YAW] as f64);
        self.ticks += 1;
        self.peak_speed = self.peak_speed.max(self.body.horizontal_speed());
        cmd
    }

    pub fn summary(&self) -> RunSummary {
        let summary = RunSummary {
            ticks: self.ticks,
            final_speed: self.body.horizontal_speed(),
            peak_speed: self.peak_speed,
            origin: self.body.origin,
        };
        info!(
            ticks = summary.ticks,
            final_speed = summary.final_speed,
            peak_speed = summary.peak_speed,
            origin = ?summary.origin,
            "run finished"
        );
        summary
    }
}
