/// A value applied exactly once, on the next tick that looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingValue {
    value: f64,
    pending: bool,
}

impl PendingValue {
    pub fn arm(&mut self, value: f64) {
        self.value = value;
        self.pending = true;
    }

    /// Returns the value and disarms.
    pub fn take(&mut self) -> Option<f64> {
        let value = self.peek();
        self.pending = false;
        value
    }

    /// Returns the value without disarming.
    pub fn peek(&self) -> Option<f64> {
        self.pending.then_some(self.value)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendingOverrides {
    /// `tas_yaw`: view yaw for the next tick.
    pub yaw: PendingValue,
    /// `tas_pitch`: view pitch for the next tick.
    pub pitch: PendingValue,
    /// `tas_olsshift`: sideways shift of the strafe line.
    pub line_shift: PendingValue,
}
