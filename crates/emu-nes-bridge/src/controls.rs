//! Control table: host inputs mapped to NES controller buttons.
//!
//! The NES controller is a serial shift register read through $4016/$4017,
//! one bit per button. Button ids passed to the core are those bit
//! positions.

/// NES button indices (bit positions).
pub mod button {
    pub const A: u8 = 0;
    pub const B: u8 = 1;
    pub const SELECT: u8 = 2;
    pub const START: u8 = 3;
    pub const UP: u8 = 4;
    pub const DOWN: u8 = 5;
    pub const LEFT: u8 = 6;
    pub const RIGHT: u8 = 7;
}

/// Controller port the control table drives.
pub const PRIMARY_PORT: u8 = 1;

/// Logical button on the NES controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NesButton {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl NesButton {
    /// Return the bit position for this button.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::A => button::A,
            Self::B => button::B,
            Self::Select => button::SELECT,
            Self::Start => button::START,
            Self::Up => button::UP,
            Self::Down => button::DOWN,
            Self::Left => button::LEFT,
            Self::Right => button::RIGHT,
        }
    }
}

/// One row of the control table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Host input id, queried on the frontend channel.
    pub input: u16,
    /// Controller button it drives.
    pub button: NesButton,
    /// Host glyph token shown in the overlay.
    pub name: &'static str,
    /// Overlay label.
    pub label: &'static str,
}

/// The fixed control table, in sampling and overlay order.
///
/// Inputs are the host's frontend actions: bumpers for B/A, accept and
/// pause for Select/Start, the d-pad for directions.
pub const CONTROLS: [Control; 8] = [
    Control {
        input: 206,
        button: NesButton::B,
        name: "~INPUT_FRONTEND_RB~",
        label: "B",
    },
    Control {
        input: 205,
        button: NesButton::A,
        name: "~INPUT_FRONTEND_LB~",
        label: "A",
    },
    Control {
        input: 201,
        button: NesButton::Select,
        name: "~INPUT_FRONTEND_ACCEPT~",
        label: "Select",
    },
    Control {
        input: 199,
        button: NesButton::Start,
        name: "~INPUT_FRONTEND_PAUSE~",
        label: "Start",
    },
    Control {
        input: 190,
        button: NesButton::Right,
        name: "~INPUT_FRONTEND_RIGHT~",
        label: "Right",
    },
    Control {
        input: 189,
        button: NesButton::Left,
        name: "~INPUT_FRONTEND_LEFT~",
        label: "Left",
    },
    Control {
        input: 188,
        button: NesButton::Up,
        name: "~INPUT_FRONTEND_UP~",
        label: "Up",
    },
    Control {
        input: 187,
        button: NesButton::Down,
        name: "~INPUT_FRONTEND_DOWN~",
        label: "Down",
    },
];
