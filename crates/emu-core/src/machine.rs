//! Emulator core interface.

/// Receives completed frames from an emulator core.
pub trait FrameSink {
    /// Called once per completed frame with the native scanout buffer:
    /// one packed `0x00RRGGBB` value per pixel, row-major.
    fn frame(&mut self, pixels: &[u32]);
}

/// An emulated machine advanced one whole frame at a time.
///
/// The core's internals (CPU, PPU, APU, mapper) are opaque to the host.
/// Everything the host needs goes through these five calls.
pub trait EmulatorCore {
    /// Load a program image and leave the machine ready to run from reset.
    ///
    /// # Errors
    ///
    /// Returns a description of why the image was rejected.
    fn load_program(&mut self, image: &[u8]) -> Result<(), String>;

    /// Run exactly one frame, handing the finished scanout to `sink`.
    fn step_frame(&mut self, sink: &mut dyn FrameSink);

    /// Return the machine to a quiescent power-on state.
    fn reset(&mut self);

    /// Set a controller button level (true = pressed).
    ///
    /// Called every host tick for every mapped button, so repeating the
    /// current level must be harmless.
    fn set_button(&mut self, port: u8, button: u8, pressed: bool);
}

/// Builds a fresh core for each run.
pub trait CoreFactory {
    type Core: EmulatorCore;

    /// Construct a core producing audio at `sample_rate` Hz.
    fn construct(&mut self, sample_rate: u32) -> Self::Core;
}

impl<C, F> CoreFactory for F
where
    C: EmulatorCore,
    F: FnMut(u32) -> C,
{
    type Core = C;

    fn construct(&mut self, sample_rate: u32) -> C {
        self(sample_rate)
    }
}
