//! NES session presented through a host runtime texture.
//!
//! The host owns the clock, the screen and the buttons. On every host tick
//! the session:
//! 1. adds the wall-clock time since the previous tick to an accumulator,
//! 2. samples the control table and pushes button levels to controller 1,
//! 3. steps the core one whole frame per target frame time held in the
//!    accumulator (zero, one or several),
//! 4. converts the last completed 256×240 frame to RGBA and uploads it,
//! 5. draws the controls overlay, if enabled.
//!
//! Emulated time therefore advances at the configured frame rate no matter
//! how irregularly the host ticks.

#[cfg(feature = "capture")]
pub mod capture;
mod config;
pub mod controls;
mod error;
pub mod framebuffer;
mod host;
pub mod input;
mod overlay;
mod session;
pub mod timestep;

pub use config::{
    DEFAULT_SAMPLE_RATE, FrameTime, InitPayload, ResourceManifest, SessionConfig, keys,
};
pub use controls::{CONTROLS, Control, NesButton, PRIMARY_PORT};
pub use error::{ConfigError, HostError, ResourceError, Result, SessionError};
pub use framebuffer::{FB_HEIGHT, FB_WIDTH, FrameBuffer, RgbaFrame};
pub use host::NesHost;
pub use input::ButtonMask;
pub use overlay::{OVERLAY_MOVIE, OverlayState};
pub use session::{Platform, Session, TickReport};
pub use timestep::Timestep;
