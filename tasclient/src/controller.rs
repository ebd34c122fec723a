use strafe::{SimulatedBody, StrafeLine, StrafeMode};
use tracing::debug;

/// Which auto-turn regime is active, and the line while line strafing.
#[derive(Debug, Clone, Default)]
pub struct StrafeController {
    mode: StrafeMode,
    /// Mode at the end of the previous tick.
    previous: StrafeMode,
    line: Option<StrafeLine>,
}

impl StrafeController {
    #[inline]
    pub fn mode(&self) -> StrafeMode {
        self.mode
    }

    #[inline]
    pub fn line(&self) -> Option<&StrafeLine> {
        self.line.as_ref()
    }

    /// Enters `mode`, replacing whatever regime was active. Line strafing
    /// captures its line from the body here.
    pub fn activate(&mut self, mode: StrafeMode, body: &SimulatedBody, view_yaw: f64) {
        self.line = match mode {
            StrafeMode::Line => Some(StrafeLine::capture(body, view_yaw)),
            _ => None,
        };
        debug!(from = ?self.mode, to = ?mode, "strafe mode");
        self.mode = mode;
    }

    /// Any regime release drops back to manual control.
    pub fn deactivate(&mut self) {
        if self.mode.is_auto() {
            debug!(from = ?self.mode, "strafe mode off");
        }
        self.mode = StrafeMode::None;
        self.line = None;
    }

    /// The active line, captured on the spot if line strafing somehow
    /// started without one.
    pub fn line_or_capture(&mut self, body: &SimulatedBody, view_yaw: f64) -> &mut StrafeLine {
        self.line
            .get_or_insert_with(|| StrafeLine::capture(body, view_yaw))
    }

    /// Closes the tick; true when this tick left an auto regime.
    pub fn end_tick(&mut self) -> bool {
        let left = !self.mode.is_auto() && self.previous.is_auto();
        self.previous = self.mode;
        left
    }
}
