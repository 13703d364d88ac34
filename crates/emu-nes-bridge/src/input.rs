//! Once-per-tick input sampling.
//!
//! Levels, not edges: every mapped button is reported every tick, pressed or
//! released. The core's controller latches whatever level was set last.

use emu_core::{EmulatorCore, InputChannel, InputSource};

use crate::controls::{Control, NesButton, PRIMARY_PORT};

/// The host's player-control channel. Blocked while a session samples so
/// the same buttons do not also drive the host.
pub const PLAYER_CHANNEL: InputChannel = InputChannel(0);

/// The host's frontend channel. Blocked, then queried for every control.
pub const FRONTEND_CHANNEL: InputChannel = InputChannel(2);

/// Buttons seen held by the last sample (bit per button).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// Set a button state (true = pressed).
    pub fn set(&mut self, button: NesButton, pressed: bool) {
        if pressed {
            self.0 |= 1 << button.bit();
        } else {
            self.0 &= !(1 << button.bit());
        }
    }

    #[must_use]
    pub fn is_pressed(self, button: NesButton) -> bool {
        self.0 & (1 << button.bit()) != 0
    }

    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

/// Sample every control in table order and push its level to the primary
/// controller port.
pub fn sample<C>(table: &[Control], input: &mut dyn InputSource, core: &mut C) -> ButtonMask
where
    C: EmulatorCore + ?Sized,
{
    input.disable_channel(PLAYER_CHANNEL);
    input.disable_channel(FRONTEND_CHANNEL);

    let mut held = ButtonMask::default();
    for control in table {
        let pressed = input.is_held(FRONTEND_CHANNEL, control.input);
        core.set_button(PRIMARY_PORT, control.button.bit(), pressed);
        held.set(control.button, pressed);
    }
    held
}
