//! Core traits and types for host-driven emulation.
//!
//! An emulated machine never owns its clock, its screen or its buttons.
//! The host hands it wall-clock time, takes its pixels and pushes its
//! input. The traits here are the seams between the two: the machine side
//! (`EmulatorCore`, `FrameSink`, `CoreFactory`) and the host side (tick
//! source, presentation surface, input source, overlay renderer, resource
//! metadata).

mod host;
mod machine;
mod millis;
mod observable;

pub use host::{
    DictionaryId, InitChannel, InputChannel, InputSource, MetadataSource, OverlayId,
    OverlayRenderer, PresentationSurface, TextureId, TickHandle, TickSource,
};
pub use machine::{CoreFactory, EmulatorCore, FrameSink};
pub use millis::Millis;
pub use observable::{Observable, Value};
