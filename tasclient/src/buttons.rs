//! Logical buttons and the per-button hold/edge tracking.
//!
//! Two physical sources (say a mouse button and a key) may hold the same
//! button; it only goes up once both have let go. The input realizer drives
//! the same buttons through [`Source::Synthetic`] so it never disturbs the
//! slots real input occupies.

use protocol::buttons::*;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Forward,
    Back,
    MoveLeft,
    MoveRight,
    Left,
    Right,
    LookUp,
    LookDown,
    MoveUp,
    MoveDown,
    Strafe,
    Speed,
    Use,
    Jump,
    Attack,
    Attack2,
    Duck,
    Reload,
    Alt1,
    Score,
    Break,
    Graph,
    MLook,
    KLook,
    JLook,
}

impl Button {
    pub const COUNT: usize = 25;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Forward,
        Button::Back,
        Button::MoveLeft,
        Button::MoveRight,
        Button::Left,
        Button::Right,
        Button::LookUp,
        Button::LookDown,
        Button::MoveUp,
        Button::MoveDown,
        Button::Strafe,
        Button::Speed,
        Button::Use,
        Button::Jump,
        Button::Attack,
        Button::Attack2,
        Button::Duck,
        Button::Reload,
        Button::Alt1,
        Button::Score,
        Button::Break,
        Button::Graph,
        Button::MLook,
        Button::KLook,
        Button::JLook,
    ];

    /// Console name without the `+`/`-` prefix.
    pub fn name(self) -> &'static str {
        match self {
            Button::Forward => "forward",
            Button::Back => "back",
            Button::MoveLeft => "moveleft",
            Button::MoveRight => "moveright",
            Button::Left => "left",
            Button::Right => "right",
            Button::LookUp => "lookup",
            Button::LookDown => "lookdown",
            Button::MoveUp => "moveup",
            Button::MoveDown => "movedown",
            Button::Strafe => "strafe",
            Button::Speed => "speed",
            Button::Use => "use",
            Button::Jump => "jump",
            Button::Attack => "attack",
            Button::Attack2 => "attack2",
            Button::Duck => "duck",
            Button::Reload => "reload",
            Button::Alt1 => "alt1",
            Button::Score => "score",
            Button::Break => "break",
            Button::Graph => "graph",
            Button::MLook => "mlook",
            Button::KLook => "klook",
            Button::JLook => "jlook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("showscores") {
            return Some(Button::Score);
        }
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }

    /// Buttons the engine may query directly (for saving look state to
    /// config files), by their `in_` name.
    pub fn find(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        match lower.as_str() {
            "in_graph" => Some(Button::Graph),
            "in_mlook" => Some(Button::MLook),
            "in_jlook" => Some(Button::JLook),
            _ => None,
        }
    }

    /// Bit this button sets in the outgoing command, if any.
    pub fn command_bit(self) -> Option<u16> {
        let bit = match self {
            Button::Attack => IN_ATTACK,
            Button::Jump => IN_JUMP,
            Button::Duck => IN_DUCK,
            Button::Forward => IN_FORWARD,
            Button::Back => IN_BACK,
            Button::Use => IN_USE,
            Button::Left => IN_LEFT,
            Button::Right => IN_RIGHT,
            Button::MoveLeft => IN_MOVELEFT,
            Button::MoveRight => IN_MOVERIGHT,
            Button::Attack2 => IN_ATTACK2,
            Button::Reload => IN_RELOAD,
            Button::Alt1 => IN_ALT1,
            Button::Score => IN_SCORE,
            _ => return None,
        };
        Some(bit)
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Who is holding a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A bound key, identified by its key code.
    Key(u32),
    /// Typed at the console. A console release clears every slot.
    Console,
    /// The input realizer.
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Pressed,
    /// Already held; only the slot was recorded (or the source repeated).
    AlreadyDown,
    /// Both slots taken by other sources; nothing changed.
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub held: bool,
    /// Went down since the last sample.
    pub pressed: bool,
    /// Went up since the last sample.
    pub released: bool,
    sources: [Option<Source>; 2],
    /// Real holds hidden by the realizer until its regime ends.
    suppressed: bool,
    /// One-tick override from the movement assists: `Some(true)` forces the
    /// command bit on, `Some(false)` forces it off.
    pub assist: Option<bool>,
}

impl ButtonState {
    pub fn sources(&self) -> impl Iterator<Item = Source> + '_ {
        self.sources.iter().flatten().copied()
    }

    /// Held by the realizer rather than by real input.
    pub fn forced(&self) -> bool {
        self.sources().any(|s| s == Source::Synthetic)
    }

    /// Held by a key or the console.
    pub fn held_by_input(&self) -> bool {
        self.sources().any(|s| s != Source::Synthetic)
    }

    pub fn press(&mut self, source: Source) -> PressOutcome {
        if self.sources.contains(&Some(source)) {
            return PressOutcome::AlreadyDown;
        }
        match self.sources.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => *slot = Some(source),
            None => return PressOutcome::Rejected,
        }
        self.suppressed = false;
        if self.held {
            return PressOutcome::AlreadyDown;
        }
        self.held = true;
        self.pressed = true;
        PressOutcome::Pressed
    }

    pub fn release(&mut self, source: Source) {
        if source == Source::Console {
            self.sources = [None, None];
            self.suppressed = false;
            self.held = false;
            self.pressed = false;
            self.released = true;
            return;
        }
        match self.sources.iter_mut().find(|slot| **slot == Some(source)) {
            Some(slot) => *slot = None,
            None => return,
        }
        if !self.held_by_input() {
            self.suppressed = false;
        }
        if self.sources().next().is_some() || !self.held {
            return;
        }
        self.held = false;
        self.released = true;
    }

    /// Holds the button for the realizer. No-op while it is already down,
    /// whoever holds it. A real hold hidden by `force_release` comes back.
    pub fn force_press(&mut self) {
        if self.suppressed {
            self.suppressed = false;
            self.held = true;
            self.pressed = true;
            return;
        }
        if self.held || self.forced() {
            return;
        }
        let _ = self.press(Source::Synthetic);
    }

    /// Lets the button go for the realizer. Keys and the console keep their
    /// slots; their hold is only hidden until `end_forced`.
    pub fn force_release(&mut self) {
        self.drop_synthetic();
        self.suppressed = self.held_by_input();
        if self.held {
            self.held = false;
            self.pressed = false;
            self.released = true;
        }
    }

    /// Hands the button back to real input: the realizer's hold goes away
    /// and holds it hid are restored.
    pub fn end_forced(&mut self) {
        self.drop_synthetic();
        self.suppressed = false;
        let down = self.held_by_input();
        if down && !self.held {
            self.held = true;
            self.pressed = true;
        } else if !down && self.held {
            self.held = false;
            self.pressed = false;
            self.released = true;
        }
    }

    /// Hidden by the realizer while a key or the console still holds it.
    pub fn suppressed(&self) -> bool {
        self.suppressed
    }

    fn drop_synthetic(&mut self) {
        if let Some(slot) = self
            .sources
            .iter_mut()
            .find(|slot| **slot == Some(Source::Synthetic))
        {
            *slot = None;
        }
    }

    /// Fraction of the sampling window the button was down, quantized to
    /// quarters. Clears the edges.
    pub fn sample(&mut self) -> f32 {
        let value = self.fraction();
        self.pressed = false;
        self.released = false;
        value
    }

    /// What `sample` would return, without touching the edges.
    pub fn fraction(&self) -> f32 {
        match (self.pressed, self.released) {
            (true, false) => {
                if self.held {
                    0.5
                } else {
                    0.0
                }
            }
            (false, true) => 0.0,
            (false, false) => {
                if self.held {
                    1.0
                } else {
                    0.0
                }
            }
            (true, true) => {
                if self.held {
                    0.75
                } else {
                    0.25
                }
            }
        }
    }

    /// Down, or went down since the last sample.
    #[inline]
    pub fn active(&self) -> bool {
        self.held || self.pressed
    }
}

/// State of every logical button.
#[derive(Debug, Clone, Default)]
pub struct ButtonTable {
    states: [ButtonState; Button::COUNT],
}

impl ButtonTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, button: Button) -> &ButtonState {
        &self.states[button.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, button: Button) -> &mut ButtonState {
        &mut self.states[button.index()]
    }

    pub fn press(&mut self, button: Button, source: Source) -> PressOutcome {
        let outcome = self.get_mut(button).press(source);
        if outcome == PressOutcome::Rejected {
            warn!(button = button.name(), ?source, "three sources down for one button");
        }
        outcome
    }

    pub fn release(&mut self, button: Button, source: Source) {
        self.get_mut(button).release(source);
    }

    pub fn force_press(&mut self, button: Button) {
        self.get_mut(button).force_press();
    }

    pub fn force_release(&mut self, button: Button) {
        self.get_mut(button).force_release();
    }

    pub fn end_forced(&mut self, button: Button) {
        self.get_mut(button).end_forced();
    }

    pub fn sample(&mut self, button: Button) -> f32 {
        self.get_mut(button).sample()
    }

    pub fn set_assist(&mut self, button: Button, value: Option<bool>) {
        self.get_mut(button).assist = value;
    }

    pub fn clear_assists(&mut self) {
        for state in &mut self.states {
            state.assist = None;
        }
    }

    /// Command bits for every button that is down or went down this window.
    /// With `reset_edges` the press edges are consumed.
    pub fn button_bits(&mut self, reset_edges: bool) -> u16 {
        let mut bits = 0;
        for button in Button::ALL {
            let Some(bit) = button.command_bit() else {
                continue;
            };
            let state = self.get_mut(button);
            let on = match (button, state.assist) {
                (Button::Jump | Button::Duck, Some(forced)) => forced,
                _ => state.active(),
            };
            if on {
                bits |= bit;
            }
            if reset_edges {
                state.pressed = false;
            }
        }
        bits
    }

    /// Brings the attack button in line with `bits` after the host rewrote
    /// the command (for instance while spectating).
    pub fn reset_button_bits(&mut self, bits: u16) {
        let changed = self.button_bits(false) ^ bits;
        if changed & IN_ATTACK == 0 {
            return;
        }
        if bits & IN_ATTACK != 0 {
            self.press(Button::Attack, Source::Console);
        } else {
            let attack = self.get_mut(Button::Attack);
            let assist = attack.assist;
            *attack = ButtonState {
                assist,
                ..Default::default()
            };
        }
    }

    /// Drops every hold and edge.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
